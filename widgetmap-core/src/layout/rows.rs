use super::Positioned;

/// Vertical distance from a row's first item under which items join that row.
pub const ROW_CLUSTER_THRESHOLD: f64 = 20.0;

/// Groups items into rows, top of the page first.
///
/// Items are sorted by descending y (stable), then taken greedily: an item
/// joins the open row while its y is strictly within `threshold` of the row's
/// first item, otherwise it opens a new row. Each row is finally ordered by
/// descending y, then ascending x.
pub fn cluster_rows<T: Positioned>(mut items: Vec<T>, threshold: f64) -> Vec<Vec<T>> {
    items.sort_by(|a, b| b.y().total_cmp(&a.y()));

    let mut rows: Vec<Vec<T>> = Vec::new();
    for item in items {
        match rows.last_mut() {
            Some(row) if (item.y() - row[0].y()).abs() < threshold => row.push(item),
            _ => rows.push(vec![item]),
        }
    }

    for row in &mut rows {
        row.sort_by(|a, b| b.y().total_cmp(&a.y()).then(a.x().total_cmp(&b.x())));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ys(rows: &[Vec<(f64, f64)>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| row.iter().map(|p| p.1).collect())
            .collect()
    }

    fn at(ys: &[f64]) -> Vec<(f64, f64)> {
        ys.iter().map(|&y| (0.0, y)).collect()
    }

    #[test]
    fn test_all_within_anchor_window_form_one_row() {
        let rows = cluster_rows(at(&[100.0, 95.0, 110.0]), ROW_CLUSTER_THRESHOLD);
        assert_eq!(ys(&rows), vec![vec![110.0, 100.0, 95.0]]);
    }

    #[test]
    fn test_rows_are_anchored_on_first_item() {
        // 85 joins 100 (15 < 20); 70 is 15 from 85 but 30 from the anchor.
        let rows = cluster_rows(at(&[70.0, 100.0, 85.0]), ROW_CLUSTER_THRESHOLD);
        assert_eq!(ys(&rows), vec![vec![100.0, 85.0], vec![70.0]]);
    }

    #[test]
    fn test_exact_threshold_opens_new_row() {
        let rows = cluster_rows(at(&[100.0, 80.0]), ROW_CLUSTER_THRESHOLD);
        assert_eq!(ys(&rows), vec![vec![100.0], vec![80.0]]);
    }

    #[test]
    fn test_row_order_descending_y_then_x() {
        let rows = cluster_rows(
            vec![(300.0, 500.0), (100.0, 505.0), (50.0, 500.0), (10.0, 200.0)],
            ROW_CLUSTER_THRESHOLD,
        );
        assert_eq!(
            rows,
            vec![
                vec![(100.0, 505.0), (50.0, 500.0), (300.0, 500.0)],
                vec![(10.0, 200.0)],
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<Vec<(f64, f64)>> = cluster_rows(Vec::new(), ROW_CLUSTER_THRESHOLD);
        assert!(rows.is_empty());
    }
}
