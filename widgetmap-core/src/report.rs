//! Line-oriented console reports.
//!
//! Every writer takes any [`Write`] sink so the CLI can hand in stdout and
//! tests can hand in a `Vec<u8>`.

use crate::forms::{FieldKind, FormField};
use crate::graph::PageInfo;
use crate::matcher::{Candidate, FieldLocation, SkipStats};
use std::io::{self, Write};

/// Formats `value` with a fixed number of decimals, rounding exact ties away
/// from zero and never printing a negative zero.
///
/// Infinities and NaN print the way `Display` prints them.
///
/// Rust's own formatting rounds ties to even, which would print `0.12` for
/// `0.125`; form coordinates in eighths of a point hit that case routinely.
pub fn fixed(value: f64, digits: usize) -> String {
    const GUARD: usize = 40;

    if !value.is_finite() {
        return value.to_string();
    }
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let exact = format!("{:.*}", digits + GUARD, magnitude);
    let (head, tail) = exact.split_at(exact.len() - GUARD);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let body = if is_tie {
        increment_last_digit(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, magnitude)
    };
    format!("{sign}{body}")
}

fn increment_last_digit(number: &str) -> String {
    let mut digits: Vec<char> = number.chars().collect();
    let mut i = digits.len();
    loop {
        if i == 0 {
            digits.insert(0, '1');
            break;
        }
        i -= 1;
        match digits[i] {
            '.' => continue,
            '9' => digits[i] = '0',
            d => {
                digits[i] = char::from(d as u8 + 1);
                break;
            }
        }
    }
    digits.into_iter().collect()
}

/// `Total Fields`, `Total Checkboxes` and `Total Pages` lines.
pub fn write_document_summary<W: Write>(
    out: &mut W,
    fields: &[FormField],
    page_count: u32,
) -> io::Result<()> {
    let checkboxes = fields
        .iter()
        .filter(|f| f.kind == FieldKind::Checkbox)
        .count();
    writeln!(out, "Total Fields: {}", fields.len())?;
    writeln!(out, "Total Checkboxes: {checkboxes}")?;
    writeln!(out, "Total Pages: {page_count}")
}

pub fn write_page_size<W: Write>(out: &mut W, page: &PageInfo) -> io::Result<()> {
    writeln!(
        out,
        "Page {} Size: {}x{}",
        page.number(),
        page.width(),
        page.height()
    )
}

/// Numbered checkbox candidates in the order given.
pub fn write_checkbox_candidates<W: Write>(
    out: &mut W,
    page: &PageInfo,
    candidates: &[Candidate],
) -> io::Result<()> {
    writeln!(
        out,
        "Candidates on Page {} (Sorted Bottom-Up, Left-Right):",
        page.number()
    )?;
    for (i, c) in candidates.iter().enumerate() {
        writeln!(
            out,
            "{i}: {} at ({}, {})",
            c.name,
            fixed(c.x, 2),
            fixed(c.y, 2)
        )?;
    }
    Ok(())
}

/// Text-field lines row by row. Rows may hold other kinds; only text fields
/// are printed.
pub fn write_text_rows<W: Write>(
    out: &mut W,
    page: &PageInfo,
    rows: &[Vec<Candidate>],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- INSPECTING PAGE {} ---", page.number())?;
    for c in rows.iter().flatten().filter(|c| c.kind == FieldKind::Text) {
        writeln!(
            out,
            "Name: {:<30} | Text: \"{}\" | Y: {}",
            c.name,
            c.text.as_deref().unwrap_or(""),
            fixed(c.y, 1)
        )?;
    }
    Ok(())
}

/// Every checkbox widget with its raw rectangle.
pub fn write_widget_listing<W: Write>(out: &mut W, fields: &[FormField]) -> io::Result<()> {
    for field in fields.iter().filter(|f| f.is_checkbox()) {
        for widget in &field.widgets {
            match widget.rect {
                Some(r) => writeln!(
                    out,
                    "Field: {}, Rect: x={}, y={}, w={}, h={}",
                    field.name, r.x, r.y, r.width, r.height
                )?,
                None => writeln!(out, "Field: {}, Rect: none", field.name)?,
            }
        }
    }
    Ok(())
}

pub fn write_locations<W: Write>(
    out: &mut W,
    located: &[(String, FieldLocation)],
) -> io::Result<()> {
    for (name, location) in located {
        match location {
            FieldLocation::Page(index) => writeln!(out, "{name} is on page index: {index}")?,
            FieldLocation::Unplaced => writeln!(out, "{name} has no page reference")?,
            FieldLocation::NotFound => writeln!(out, "{name} not found")?,
        }
    }
    Ok(())
}

/// One line of skip counts; nothing when no annotation was skipped.
pub fn write_skip_summary<W: Write>(out: &mut W, skipped: &SkipStats) -> io::Result<()> {
    if skipped.is_empty() {
        return Ok(());
    }
    writeln!(out, "Skipped annotations: {skipped}")
}
