//! # Report Rendering
//!
//! The three document kinds the workflow emits: tabular reports, bills and
//! under-stock notices. Rendering format is an application concern, so it
//! sits behind the [`ReportRenderer`] seam; the shipped implementation
//! writes plain-text files.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

// =============================================================================
// Document Payloads
// =============================================================================

/// Everything a bill prints for one placed order line.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub order_id: i64,
    pub client_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
    pub order_total: f64,
}

/// Everything an under-stock notice prints for a rejected order.
#[derive(Debug, Clone, PartialEq)]
pub struct UnderStockNotice {
    pub product_name: String,
    pub available: i64,
    pub requested: i64,
}

// =============================================================================
// Renderer Seam
// =============================================================================

/// Renders workflow documents. `name` is the file stem ("bill0" and so on);
/// implementations choose extension and layout and return the written path.
pub trait ReportRenderer {
    /// A tabular report: one header row, then one row per record.
    fn table_report(
        &self,
        name: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> io::Result<PathBuf>;

    /// A bill for a successfully placed order line.
    fn bill(&self, name: &str, bill: &Bill) -> io::Result<PathBuf>;

    /// An under-stock notice for a rejected order line.
    fn under_stock(&self, name: &str, notice: &UnderStockNotice) -> io::Result<PathBuf>;
}

// =============================================================================
// Plain-Text Renderer
// =============================================================================

/// Writes documents as aligned plain-text files into one directory.
#[derive(Debug, Clone)]
pub struct TextReports {
    dir: PathBuf,
}

impl TextReports {
    /// Renderer writing into `dir` (created if missing).
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(TextReports { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.txt"))
    }

    /// Pads every cell to its column's widest entry.
    fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
        let mut widths: Vec<usize> = columns.iter().map(String::len).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.len());
                }
            }
        }

        let render_row = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{cell:<width$}", width = widths.get(i).copied().unwrap_or(0)))
                .collect();
            format!("| {} |", padded.join(" | "))
        };

        let separator = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut out = String::new();
        out.push_str(&separator);
        out.push('\n');
        out.push_str(&render_row(columns));
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
        for row in rows {
            out.push_str(&render_row(row));
            out.push('\n');
        }
        out.push_str(&separator);
        out.push('\n');
        out
    }
}

impl ReportRenderer for TextReports {
    fn table_report(
        &self,
        name: &str,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> io::Result<PathBuf> {
        let path = self.path_for(name);
        let mut file = fs::File::create(&path)?;
        file.write_all(Self::render_table(columns, rows).as_bytes())?;
        Ok(path)
    }

    fn bill(&self, name: &str, bill: &Bill) -> io::Result<PathBuf> {
        let path = self.path_for(name);
        let mut file = fs::File::create(&path)?;
        writeln!(file, "BILL - order {}", bill.order_id)?;
        writeln!(file, "Client:  {}", bill.client_name)?;
        writeln!(
            file,
            "Item:    {} x {} @ {}",
            bill.quantity, bill.product_name, bill.unit_price
        )?;
        writeln!(file, "Line:    {}", bill.line_total)?;
        writeln!(file, "Total:   {}", bill.order_total)?;
        Ok(path)
    }

    fn under_stock(&self, name: &str, notice: &UnderStockNotice) -> io::Result<PathBuf> {
        let path = self.path_for(name);
        let mut file = fs::File::create(&path)?;
        writeln!(file, "UNDER-STOCK NOTICE")?;
        writeln!(file, "Product:   {}", notice.product_name)?;
        writeln!(file, "Available: {}", notice.available)?;
        writeln!(file, "Requested: {}", notice.requested)?;
        Ok(path)
    }
}

/// Shared helper for tests: does a rendered document exist?
#[cfg(test)]
pub fn exists(dir: &std::path::Path, name: &str) -> bool {
    dir.join(format!("{name}.txt")).exists()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_aligned_and_bordered() {
        let table = TextReports::render_table(
            &["id".to_string(), "name".to_string()],
            &[
                vec!["1".to_string(), "Alice".to_string()],
                vec!["2".to_string(), "Bob".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        // All lines share one width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
        assert!(lines[1].contains("name"));
        assert!(lines[3].contains("Alice"));
    }

    #[test]
    fn writes_all_three_document_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let reports = TextReports::new(dir.path()).unwrap();

        reports
            .table_report("client0", &["id".to_string()], &[vec!["1".to_string()]])
            .unwrap();
        reports
            .bill(
                "bill0",
                &Bill {
                    order_id: 1,
                    client_name: "Alice".into(),
                    product_name: "Widget".into(),
                    quantity: 3,
                    unit_price: 2.5,
                    line_total: 7.5,
                    order_total: 7.5,
                },
            )
            .unwrap();
        reports
            .under_stock(
                "understock0",
                &UnderStockNotice {
                    product_name: "Widget".into(),
                    available: 2,
                    requested: 5,
                },
            )
            .unwrap();

        assert!(exists(dir.path(), "client0"));
        assert!(exists(dir.path(), "bill0"));
        assert!(exists(dir.path(), "understock0"));
    }
}
