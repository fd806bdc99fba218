//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] livedoc_parser::ParseError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Image error: {0}")]
    Image(#[from] crate::image_source::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
