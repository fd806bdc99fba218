use livedoc_editor::EditorConfig;
use livedoc_render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "livedoc.config.json";

/// Livedoc configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Session behavior
    pub editor: EditorConfig,

    /// HTML output
    pub render: RenderOptions,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livedoc_editor::LoadOrder;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "editor": { "historyLimit": 50, "imageLoadOrder": "last_started" },
            "render": { "editable": true, "indent": "\t" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.editor.history_limit, 50);
        assert_eq!(config.editor.image_load_order, LoadOrder::LastStarted);
        assert!(config.render.editable);
        assert!(config.render.pretty);
        assert_eq!(config.render.indent, "\t");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.history_limit, 0);
        assert_eq!(config.editor.image_load_order, LoadOrder::LastCompleted);
        assert!(!config.render.editable);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().editor.history_limit, 0);

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "editor": { "historyLimit": 3 } }"#,
        )
        .unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().editor.history_limit, 3);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
