//! Form PDF Builder
//!
//! Writes minimal, uncompressed PDFs with an interactive form: pages,
//! checkboxes, text fields and plain annotations, with a correct
//! cross-reference table.

/// Checkbox widget size in points
const CHECKBOX_SIZE: f64 = 12.0;
/// Text widget width and height in points
const TEXT_SIZE: (f64, f64) = (150.0, 18.0);
/// `/Ff` bit marking a rich-text field
const RICH_TEXT_FLAG: u32 = 1 << 25;

#[derive(Clone)]
struct FormPage {
    width: f64,
    height: f64,
}

#[derive(Clone)]
enum Layout {
    /// Field and widget share one dictionary
    Merged,
    /// Field lists its widgets in `/Kids`
    Kids,
    /// Widget only reachable through its `/Parent` entry
    Orphan,
}

#[derive(Clone)]
struct FieldSpec {
    name: String,
    field_type: &'static str,
    flags: u32,
    value: Option<String>,
    page: usize,
    widgets: Vec<(f64, f64)>,
    layout: Layout,
}

impl FieldSpec {
    fn size(&self) -> (f64, f64) {
        if self.field_type == "Tx" {
            TEXT_SIZE
        } else {
            (CHECKBOX_SIZE, CHECKBOX_SIZE)
        }
    }

    /// Field entries shared by every layout.
    fn entries(&self) -> String {
        let mut entries = format!(
            "/FT /{} /T ({})",
            self.field_type,
            escape_pdf_string(&self.name)
        );
        if self.flags != 0 {
            entries.push_str(&format!(" /Ff {}", self.flags));
        }
        if let Some(value) = &self.value {
            entries.push_str(&format!(" /V ({})", escape_pdf_string(value)));
        }
        entries
    }
}

#[derive(Clone)]
enum Entry {
    Field(FieldSpec),
    Link { page: usize, x: f64, y: f64 },
}

/// Builder for test PDFs carrying an AcroForm
#[derive(Clone)]
pub struct FormPdfBuilder {
    pages: Vec<FormPage>,
    entries: Vec<Entry>,
}

impl FormPdfBuilder {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// A builder with one US Letter page
    pub fn letter() -> Self {
        let mut builder = Self::new();
        builder.add_page(612.0, 792.0);
        builder
    }

    pub fn add_page(&mut self, width: f64, height: f64) -> &mut Self {
        self.pages.push(FormPage { width, height });
        self
    }

    /// Checkbox whose field and widget are one dictionary
    pub fn checkbox(&mut self, page: usize, name: &str, x: f64, y: f64) -> &mut Self {
        self.field(page, name, "Btn", 0, None, vec![(x, y)], Layout::Merged)
    }

    /// Checkbox field with one kid widget per position
    pub fn checkbox_with_kids(&mut self, page: usize, name: &str, positions: &[(f64, f64)]) -> &mut Self {
        self.field(page, name, "Btn", 0, None, positions.to_vec(), Layout::Kids)
    }

    /// Checkbox field without `/Kids`; its widget points back via `/Parent`
    pub fn orphan_checkbox(&mut self, page: usize, name: &str, x: f64, y: f64) -> &mut Self {
        self.field(page, name, "Btn", 0, None, vec![(x, y)], Layout::Orphan)
    }

    pub fn text_field(&mut self, page: usize, name: &str, value: Option<&str>, x: f64, y: f64) -> &mut Self {
        self.field(
            page,
            name,
            "Tx",
            0,
            value.map(str::to_string),
            vec![(x, y)],
            Layout::Merged,
        )
    }

    /// Text field flagged as rich text
    pub fn rich_text_field(&mut self, page: usize, name: &str, value: &str, x: f64, y: f64) -> &mut Self {
        self.field(
            page,
            name,
            "Tx",
            RICH_TEXT_FLAG,
            Some(value.to_string()),
            vec![(x, y)],
            Layout::Merged,
        )
    }

    /// Link annotation, which the matcher must skip
    pub fn link(&mut self, page: usize, x: f64, y: f64) -> &mut Self {
        self.entries.push(Entry::Link { page, x, y });
        self
    }

    #[allow(clippy::too_many_arguments)]
    fn field(
        &mut self,
        page: usize,
        name: &str,
        field_type: &'static str,
        flags: u32,
        value: Option<String>,
        widgets: Vec<(f64, f64)>,
        layout: Layout,
    ) -> &mut Self {
        assert!(page < self.pages.len(), "page {page} has not been added");
        self.entries.push(Entry::Field(FieldSpec {
            name: name.to_string(),
            field_type,
            flags,
            value,
            page,
            widgets,
            layout,
        }));
        self
    }

    /// Build the PDF
    ///
    /// Objects are numbered in the order they are written: catalog, page
    /// tree, AcroForm, pages, then fields and annotations as declared.
    pub fn build(&self) -> Vec<u8> {
        const CATALOG: u32 = 1;
        const PAGES: u32 = 2;
        const ACROFORM: u32 = 3;
        let first_page = 4;

        let page_ref = |page: usize| first_page + page as u32;
        let mut next = first_page + self.pages.len() as u32;
        let mut annots: Vec<Vec<u32>> = vec![Vec::new(); self.pages.len()];
        let mut field_refs = Vec::new();
        let mut bodies = Vec::new();

        for entry in &self.entries {
            match entry {
                Entry::Link { page, x, y } => {
                    annots[*page].push(next);
                    bodies.push(format!(
                        "<< /Type /Annot /Subtype /Link /Rect {} /P {} 0 R >>",
                        rect(*x, *y, (40.0, 10.0)),
                        page_ref(*page)
                    ));
                    next += 1;
                }
                Entry::Field(field) => {
                    let number = next;
                    next += 1;
                    field_refs.push(number);
                    let page = page_ref(field.page);
                    let size = field.size();

                    match field.layout {
                        Layout::Merged => {
                            let (x, y) = field.widgets[0];
                            annots[field.page].push(number);
                            bodies.push(format!(
                                "<< /Type /Annot /Subtype /Widget {} /Rect {} /P {page} 0 R >>",
                                field.entries(),
                                rect(x, y, size)
                            ));
                        }
                        Layout::Kids | Layout::Orphan => {
                            let kids: Vec<u32> = (0..field.widgets.len() as u32)
                                .map(|i| number + 1 + i)
                                .collect();
                            if matches!(field.layout, Layout::Kids) {
                                bodies.push(format!(
                                    "<< {} /Kids [{}] >>",
                                    field.entries(),
                                    references(&kids)
                                ));
                            } else {
                                bodies.push(format!("<< {} >>", field.entries()));
                            }
                            for (kid, &(x, y)) in kids.iter().zip(&field.widgets) {
                                annots[field.page].push(*kid);
                                bodies.push(format!(
                                    "<< /Type /Annot /Subtype /Widget /Rect {} /P {page} 0 R /Parent {number} 0 R >>",
                                    rect(x, y, size)
                                ));
                            }
                            next += kids.len() as u32;
                        }
                    }
                }
            }
        }

        let mut objects = Vec::with_capacity(next as usize);
        let acroform_entry = if field_refs.is_empty() {
            String::new()
        } else {
            format!(" /AcroForm {ACROFORM} 0 R")
        };
        objects.push(format!(
            "<< /Type /Catalog /Pages {PAGES} 0 R{acroform_entry} >>"
        ));
        let kids: Vec<u32> = (0..self.pages.len()).map(page_ref).collect();
        objects.push(format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            references(&kids),
            self.pages.len()
        ));
        objects.push(format!("<< /Fields [{}] >>", references(&field_refs)));
        for (page, page_annots) in self.pages.iter().zip(&annots) {
            let mut dict = format!(
                "<< /Type /Page /Parent {PAGES} 0 R /MediaBox [0 0 {} {}]",
                page.width, page.height
            );
            if !page_annots.is_empty() {
                dict.push_str(&format!(" /Annots [{}]", references(page_annots)));
            }
            dict.push_str(" >>");
            objects.push(dict);
        }
        objects.extend(bodies);

        let mut pdf = Vec::new();
        let mut xref_positions = Vec::with_capacity(objects.len());
        pdf.extend_from_slice(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n");
        for (i, body) in objects.iter().enumerate() {
            xref_positions.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_offset = pdf.len();
        let size = objects.len() + 1;
        pdf.extend_from_slice(format!("xref\n0 {size}\n").as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for pos in &xref_positions {
            pdf.extend_from_slice(format!("{pos:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {size} /Root {CATALOG} 0 R >>\nstartxref\n{xref_offset}\n%%EOF"
            )
            .as_bytes(),
        );
        pdf
    }
}

fn rect(x: f64, y: f64, (width, height): (f64, f64)) -> String {
    format!("[{} {} {} {}]", x, y, x + width, y + height)
}

fn references(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| format!("{n} 0 R"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special characters in PDF strings
fn escape_pdf_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            '\\' => "\\\\".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

impl Default for FormPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_page_without_form() {
        let pdf = FormPdfBuilder::letter().build();
        let text = String::from_utf8_lossy(&pdf);
        assert!(pdf.starts_with(b"%PDF-1.7"));
        assert!(pdf.ends_with(b"%%EOF"));
        assert!(!text.contains("/AcroForm"));
        assert!(text.contains("/MediaBox [0 0 612 792]"));
    }

    #[test]
    fn test_object_numbering_and_xref_size() {
        let pdf = FormPdfBuilder::letter()
            .checkbox(0, "Agree", 10.0, 20.0)
            .checkbox_with_kids(0, "Choice", &[(10.0, 50.0), (40.0, 50.0)])
            .link(0, 0.0, 0.0)
            .build();
        let text = String::from_utf8_lossy(&pdf);

        // catalog, pages, acroform, page, merged field, group + 2 kids, link
        assert!(text.contains("9 0 obj"));
        assert!(!text.contains("10 0 obj"));
        assert!(text.contains("/Size 10"));
        assert!(text.contains("/Fields [5 0 R 6 0 R]"));
        assert!(text.contains("/Annots [5 0 R 7 0 R 8 0 R 9 0 R]"));
        assert!(text.contains("/Kids [7 0 R 8 0 R]"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = FormPdfBuilder::letter()
            .text_field(0, "Name", Some("A (b)"), 10.0, 700.0)
            .build();
        let text = String::from_utf8_lossy(&pdf);
        let xref = text.find("xref\n").unwrap();
        let entries = text[xref..].lines().skip(3);
        for (i, entry) in entries.take(5).enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(pdf[offset..].starts_with(format!("{} 0 obj", i + 1).as_bytes()));
        }
        assert!(text.contains("/V (A \\(b\\))"));
    }

    #[test]
    fn test_rich_text_flag() {
        let pdf = FormPdfBuilder::letter()
            .rich_text_field(0, "Notes", "<b>x</b>", 10.0, 10.0)
            .build();
        assert!(String::from_utf8_lossy(&pdf).contains("/Ff 33554432"));
    }
}
