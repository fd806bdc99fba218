//! Replay scripts: a JSON array of edit steps applied to a loaded document
//!
//! ```json
//! [
//!   { "op": "text", "node": "1-3", "value": "Hello" },
//!   { "op": "image", "node": "1-5", "path": "cat.png" },
//!   { "op": "undo" },
//!   { "op": "redo" },
//!   { "op": "load" }
//! ]
//! ```

use anyhow::{Context, Result};
use livedoc_editor::NodeId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Finalize a text edit
    Text { node: NodeId, value: String },

    /// Drop an image by URI or file path; neither means the empty placeholder
    Image {
        node: NodeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },

    Undo,
    Redo,

    /// Fresh parse of the given markup, or of the original file
    Load {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        markup: Option<String>,
    },
}

#[derive(Debug)]
pub struct Script {
    pub steps: Vec<Step>,

    /// Directory that relative image paths are resolved against
    pub base_dir: PathBuf,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let steps: Vec<Step> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid script {}", path.display()))?;

        Ok(Self {
            steps,
            base_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        })
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let json = r#"[
            { "op": "text", "node": "1-3", "value": "Hello" },
            { "op": "image", "node": "1-5", "src": "https://example.com/a.png" },
            { "op": "image", "node": "1-5" },
            { "op": "undo" },
            { "op": "redo" },
            { "op": "load", "markup": "<p>x</p>" },
            { "op": "load" }
        ]"#;

        let steps: Vec<Step> = serde_json::from_str(json).unwrap();
        assert_eq!(steps.len(), 7);
        assert_eq!(
            steps[0],
            Step::Text {
                node: "1-3".into(),
                value: "Hello".to_string(),
            }
        );
        assert!(matches!(&steps[2], Step::Image { src: None, path: None, .. }));
        assert_eq!(steps[3], Step::Undo);
        assert_eq!(steps[6], Step::Load { markup: None });
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result: Result<Vec<Step>, _> = serde_json::from_str(r#"[{ "op": "delete" }]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"[{ "op": "image", "node": "1-2", "path": "cat.png" }]"#).unwrap();

        let script = Script::load(&path).unwrap();
        assert_eq!(script.steps.len(), 1);
        assert_eq!(script.resolve(Path::new("cat.png")), dir.path().join("cat.png"));
    }
}
