//! # Command Language
//!
//! Parser for the line-oriented command language the tool consumes.
//!
//! ## Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Insert client: <name>, <address>                                       │
//! │  Delete client: <name>                                                  │
//! │  Insert product: <name>, <quantity>, <price>                            │
//! │  Delete product: <name>                                                 │
//! │  Order: <client name>, <product name>, <quantity>                       │
//! │  Report <client|product|order>                                          │
//! │                                                                         │
//! │  Prefixes are case-insensitive; arguments are separated by ", ".        │
//! │  Blank lines are skipped. Anything else is a parse error - the runner   │
//! │  logs it and moves on, it is never silently reinterpreted as the        │
//! │  previous command.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Command Types
// =============================================================================

/// Which table a `Report` command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Client,
    Product,
    Order,
}

impl ReportKind {
    /// File-name stem for this report kind.
    pub fn stem(self) -> &'static str {
        match self {
            ReportKind::Client => "client",
            ReportKind::Product => "product",
            ReportKind::Order => "order",
        }
    }
}

/// One decoded command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddClient {
        name: String,
        address: String,
    },
    DeleteClient {
        name: String,
    },
    AddProduct {
        name: String,
        quantity: i64,
        price: f64,
    },
    DeleteProduct {
        name: String,
    },
    CreateOrder {
        client: String,
        product: String,
        quantity: i64,
    },
    Report {
        kind: ReportKind,
    },
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Why a line could not be decoded.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unrecognized command: '{0}'")]
    Unrecognized(String),

    #[error("'{command}' expects {expected} argument(s), got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("'{command}' has an invalid number: '{value}'")]
    BadNumber {
        command: &'static str,
        value: String,
    },

    #[error("unknown report target '{0}' (expected client, product or order)")]
    BadReportTarget(String),
}

// =============================================================================
// Parser
// =============================================================================

/// Case-insensitive ASCII prefix strip.
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    if line.len() >= prefix.len()
        && line.is_char_boundary(prefix.len())
        && line[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

/// Splits a ", "-separated argument list, requiring an exact count.
fn args<'a>(
    command: &'static str,
    rest: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, ParseError> {
    let parts: Vec<&str> = rest.split(", ").map(str::trim).collect();
    if parts.len() != expected || parts.iter().any(|p| p.is_empty()) {
        return Err(ParseError::WrongArity {
            command,
            expected,
            got: parts.iter().filter(|p| !p.is_empty()).count(),
        });
    }
    Ok(parts)
}

fn parse_i64(command: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::BadNumber {
        command,
        value: value.to_string(),
    })
}

fn parse_f64(command: &'static str, value: &str) -> Result<f64, ParseError> {
    value.parse().map_err(|_| ParseError::BadNumber {
        command,
        value: value.to_string(),
    })
}

/// Decodes one line. Blank lines decode to `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = strip_prefix_ci(line, "Insert client: ") {
        let parts = args("Insert client", rest, 2)?;
        return Ok(Some(Command::AddClient {
            name: parts[0].to_string(),
            address: parts[1].to_string(),
        }));
    }
    if let Some(rest) = strip_prefix_ci(line, "Delete client: ") {
        let parts = args("Delete client", rest, 1)?;
        return Ok(Some(Command::DeleteClient {
            name: parts[0].to_string(),
        }));
    }
    if let Some(rest) = strip_prefix_ci(line, "Insert product: ") {
        let parts = args("Insert product", rest, 3)?;
        return Ok(Some(Command::AddProduct {
            name: parts[0].to_string(),
            quantity: parse_i64("Insert product", parts[1])?,
            price: parse_f64("Insert product", parts[2])?,
        }));
    }
    if let Some(rest) = strip_prefix_ci(line, "Delete product: ") {
        let parts = args("Delete product", rest, 1)?;
        return Ok(Some(Command::DeleteProduct {
            name: parts[0].to_string(),
        }));
    }
    if let Some(rest) = strip_prefix_ci(line, "Order: ") {
        let parts = args("Order", rest, 3)?;
        return Ok(Some(Command::CreateOrder {
            client: parts[0].to_string(),
            product: parts[1].to_string(),
            quantity: parse_i64("Order", parts[2])?,
        }));
    }
    if let Some(rest) = strip_prefix_ci(line, "Report ") {
        let kind = match rest.trim().to_ascii_lowercase().as_str() {
            "client" => ReportKind::Client,
            "product" => ReportKind::Product,
            "order" => ReportKind::Order,
            other => return Err(ParseError::BadReportTarget(other.to_string())),
        };
        return Ok(Some(Command::Report { kind }));
    }

    Err(ParseError::Unrecognized(line.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_shape() {
        assert_eq!(
            parse_line("Insert client: Alice, 12 Main St").unwrap(),
            Some(Command::AddClient {
                name: "Alice".into(),
                address: "12 Main St".into()
            })
        );
        assert_eq!(
            parse_line("Delete client: Alice").unwrap(),
            Some(Command::DeleteClient {
                name: "Alice".into()
            })
        );
        assert_eq!(
            parse_line("Insert product: Widget, 10, 2.5").unwrap(),
            Some(Command::AddProduct {
                name: "Widget".into(),
                quantity: 10,
                price: 2.5
            })
        );
        assert_eq!(
            parse_line("Delete product: Widget").unwrap(),
            Some(Command::DeleteProduct {
                name: "Widget".into()
            })
        );
        assert_eq!(
            parse_line("Order: Alice, Widget, 3").unwrap(),
            Some(Command::CreateOrder {
                client: "Alice".into(),
                product: "Widget".into(),
                quantity: 3
            })
        );
        assert_eq!(
            parse_line("Report order").unwrap(),
            Some(Command::Report {
                kind: ReportKind::Order
            })
        );
    }

    #[test]
    fn prefixes_are_case_insensitive() {
        assert_eq!(
            parse_line("INSERT CLIENT: Bob, 98 High St").unwrap(),
            Some(Command::AddClient {
                name: "Bob".into(),
                address: "98 High St".into()
            })
        );
        assert_eq!(
            parse_line("report PRODUCT").unwrap(),
            Some(Command::Report {
                kind: ReportKind::Product
            })
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn unrecognized_lines_are_errors_not_repeats() {
        assert!(matches!(
            parse_line("Frobnicate: everything"),
            Err(ParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn arity_and_numbers_are_checked() {
        assert!(matches!(
            parse_line("Insert client: Alice"),
            Err(ParseError::WrongArity { .. })
        ));
        assert!(matches!(
            parse_line("Insert product: Widget, many, 2.5"),
            Err(ParseError::BadNumber { .. })
        ));
        assert!(matches!(
            parse_line("Report everything"),
            Err(ParseError::BadReportTarget(_))
        ));
    }
}
