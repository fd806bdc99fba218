use super::open_session;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Markup file to inspect
    pub file: PathBuf,

    /// Include the edit state extracted from the tree
    #[arg(long)]
    pub state: bool,
}

pub fn tree(args: TreeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let (session, _) = open_session(&args.file, config.editor)?;

    let mut output = json!({
        "generation": session.generation(),
        "nodeCount": session.tree().node_count(),
        "root": session.tree().root(),
    });
    if args.state {
        output["editState"] = serde_json::to_value(session.edit_state())?;
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
