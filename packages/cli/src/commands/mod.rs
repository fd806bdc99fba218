pub mod render;
pub mod replay;
pub mod tree;

pub use render::{render, RenderArgs};
pub use replay::{replay, ReplayArgs};
pub use tree::{tree, TreeArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use livedoc_editor::{EditSession, EditorConfig};
use livedoc_parser::format_diagnostics;
use std::path::Path;

/// Read `path` into a fresh session, reporting recovered markup problems
fn open_session(path: &Path, config: EditorConfig) -> Result<(EditSession, String)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut session = EditSession::new(config);
    let diagnostics = session.try_load(&source)?;

    if !diagnostics.is_empty() {
        let file_name = path.display().to_string();
        eprintln!(
            "{} {} recovered problem(s) in {}",
            "⚠".yellow(),
            diagnostics.len(),
            file_name
        );
        eprintln!("{}", format_diagnostics(&source, &file_name, &diagnostics));
    }

    Ok((session, source))
}
