//! # Livedoc Parser
//!
//! Turns a pasted markup fragment into a generic element/text tree.
//!
//! The parser never rejects malformed markup: mismatched or missing close
//! tags are repaired and reported as [`ParseDiagnostic`]s. Only resource
//! limits ([`ParseOptions`]) produce a hard [`ParseError`].
//!
//! ```rust,ignore
//! use livedoc_parser::parse;
//!
//! let parsed = parse("<p>Hello <b>world</b></p>")?;
//! let root = parsed.root.expect("non-empty input");
//! assert_eq!(root.tag_name, "body");
//! ```

pub mod entities;
pub mod error;
pub mod parser;
pub mod raw;
pub mod tokenizer;

pub use error::{format_diagnostics, ParseDiagnostic, ParseError, ParseResult};
pub use parser::{parse, parse_with_options, ParseOptions, Parsed, Parser, ROOT_TAG};
pub use raw::{RawElement, RawNode};
pub use tokenizer::{tokenize, Token};
