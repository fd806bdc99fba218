use crate::loads::LoadOrder;
use serde::{Deserialize, Serialize};

/// Deepest nesting the session will load. Building, projecting and rendering
/// walk the tree recursively, so the parser limit is capped here.
pub const DEPTH_CEILING: usize = 512;

/// Session behavior, the `editor` section of `livedoc.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Maximum history entries (0 = unlimited)
    pub history_limit: usize,

    pub image_load_order: LoadOrder,

    /// Deepest element nesting accepted by the parser (0 or anything above
    /// [`DEPTH_CEILING`] means the ceiling)
    pub max_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 0,
            image_load_order: LoadOrder::default(),
            max_depth: livedoc_parser::ParseOptions::default().max_depth,
        }
    }
}

impl EditorConfig {
    /// Depth limit handed to the parser
    pub fn parse_depth(&self) -> usize {
        match self.max_depth {
            0 => DEPTH_CEILING,
            depth => depth.min(DEPTH_CEILING),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"imageLoadOrder":"last_started"}"#).unwrap();

        assert_eq!(config.image_load_order, LoadOrder::LastStarted);
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.max_depth, 256);
    }

    #[test]
    fn test_parse_depth_is_capped() {
        let depth = |max_depth| EditorConfig {
            max_depth,
            ..EditorConfig::default()
        };

        assert_eq!(EditorConfig::default().parse_depth(), 256);
        assert_eq!(depth(4).parse_depth(), 4);
        assert_eq!(depth(0).parse_depth(), DEPTH_CEILING);
        assert_eq!(depth(usize::MAX).parse_depth(), DEPTH_CEILING);
    }
}
