//! PDF export of the loaded verification log.
//!
//! Renders the same seven-column table the log screen shows into a local
//! PDF file with a fixed name, using the PDF base-14 fonts so no font files
//! need to ship with the binary.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use thiserror::Error;

use crate::domain::logs::LogRow;

/// Fixed export filename, matching the product's download artifact.
pub const EXPORT_FILE_NAME: &str = "verification-logs.pdf";

// A4 landscape.
const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 10.0;
const ROW_HEIGHT_MM: f32 = 7.0;
const HEADER_FONT_SIZE: f32 = 10.0;
const ROW_FONT_SIZE: f32 = 9.0;

/// Column headers and x offsets (mm from the left edge).
const COLUMNS: [(&str, f32, usize); 7] = [
    ("Date", 10.0, 12),
    ("Time", 40.0, 10),
    ("Medicine", 65.0, 28),
    ("Batch Number", 120.0, 16),
    ("Status", 155.0, 12),
    ("Initialized By", 182.0, 14),
    ("Transaction Hash", 212.0, 40),
];

/// Errors from writing the export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// Write the rows as a PDF table under the fixed filename in `dir`.
///
/// Returns the path of the written file.
pub fn export_pdf(rows: &[LogRow], dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);

    let (doc, page, layer) = PdfDocument::new(
        "Verification Logs",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "table",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM - ROW_HEIGHT_MM;
    write_header(&current, &bold, y);
    y -= ROW_HEIGHT_MM;

    for row in rows {
        if y < MARGIN_MM + ROW_HEIGHT_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM - ROW_HEIGHT_MM;
            write_header(&current, &bold, y);
            y -= ROW_HEIGHT_MM;
        }

        let cells = [
            row.date.as_str(),
            row.time.as_str(),
            row.medicine.as_str(),
            row.batch.as_str(),
            row.status,
            row.actor,
            row.hash.as_str(),
        ];
        for ((_, x, width), text) in COLUMNS.iter().zip(cells) {
            current.use_text(
                truncate(text, *width),
                ROW_FONT_SIZE,
                Mm(*x),
                Mm(y),
                &font,
            );
        }
        y -= ROW_HEIGHT_MM;
    }

    doc.save(&mut BufWriter::new(File::create(&path)?))?;
    Ok(path)
}

fn write_header(layer: &PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (title, x, _) in COLUMNS {
        layer.use_text(title, HEADER_FONT_SIZE, Mm(x), Mm(y), bold);
    }
}

/// Clip a cell value to its column, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &'static str) -> LogRow {
        LogRow {
            date: "2025-01-01".into(),
            time: "12:30:00".into(),
            medicine: "Aspirin".into(),
            batch: "B-1".into(),
            status,
            actor: "Manufacturer",
            hash: "0xabc".into(),
        }
    }

    #[test]
    fn writes_pdf_under_fixed_filename() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![row("Registered"), row("Verified")];

        let path = export_pdf(&rows, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn long_rows_spill_onto_additional_pages() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<LogRow> = (0..120).map(|_| row("Verified")).collect();

        // Must not panic or overflow the page.
        let path = export_pdf(&rows, dir.path()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn truncate_clips_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abcdef", 8), "0123456…");
    }
}
