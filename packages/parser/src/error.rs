//! Error and diagnostic types for the markup parser

use std::ops::Range;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Hard failure: the input cannot be turned into a tree at all
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Element nesting exceeds the maximum depth of {max_depth} at {pos}")]
    TooDeep { max_depth: usize, pos: usize },

    #[error("Input of {len} bytes exceeds the limit of {max_len} bytes")]
    TooLarge { len: usize, max_len: usize },
}

/// Recoverable problem found while parsing; the tree is still produced
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseDiagnostic {
    #[error("Close tag </{tag}> has no matching open element")]
    UnmatchedCloseTag { tag: String, span: Range<usize> },

    #[error("Element <{tag}> implicitly closed by </{closed_by}>")]
    ImplicitlyClosed {
        tag: String,
        closed_by: String,
        span: Range<usize>,
    },

    #[error("Element <{tag}> is never closed")]
    Unclosed { tag: String, span: Range<usize> },
}

impl ParseDiagnostic {
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseDiagnostic::UnmatchedCloseTag { span, .. }
            | ParseDiagnostic::ImplicitlyClosed { span, .. }
            | ParseDiagnostic::Unclosed { span, .. } => span.clone(),
        }
    }

    fn label(&self) -> String {
        match self {
            ParseDiagnostic::UnmatchedCloseTag { .. } => "ignored".to_string(),
            ParseDiagnostic::ImplicitlyClosed { closed_by, .. } => {
                format!("closed here by </{}>", closed_by)
            }
            ParseDiagnostic::Unclosed { .. } => "opened here".to_string(),
        }
    }
}

/// Pretty-print diagnostics with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_diagnostics(source: &str, filename: &str, diagnostics: &[ParseDiagnostic]) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let mut output = Vec::new();

    for diagnostic in diagnostics {
        let span = diagnostic.span();
        let report = Report::build(ReportKind::Warning, filename, span.start)
            .with_message(diagnostic.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_color(Color::Yellow)
                    .with_message(diagnostic.label()),
            )
            .finish();

        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            break;
        }
    }

    String::from_utf8(output).unwrap_or_else(|_| "Diagnostic formatting failed".to_string())
}

/// Plain one-line-per-diagnostic rendering
#[cfg(not(feature = "pretty-errors"))]
pub fn format_diagnostics(_source: &str, filename: &str, diagnostics: &[ParseDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| {
            format!(
                "{}:{}: {} ({})\n",
                filename,
                diagnostic.span().start,
                diagnostic,
                diagnostic.label()
            )
        })
        .collect()
}
