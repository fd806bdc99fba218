use super::open_session;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use livedoc_render::render_fragment;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markup file to render
    pub file: PathBuf,

    /// Mark leaves with node ids and make text editable
    #[arg(long)]
    pub editable: bool,

    /// Disable pretty printing
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let (session, _) = open_session(&args.file, config.editor)?;

    let mut options = config.render;
    options.editable |= args.editable;
    options.pretty &= !args.compact;

    print!("{}", render_fragment(session.project().as_ref(), &options));
    Ok(())
}
