use super::open_session;
use crate::config::Config;
use crate::script::{Script, Step};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use livedoc_editor::{CommitOutcome, EditSession, ImageSource};
use livedoc_render::render_fragment;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Markup file to load
    pub file: PathBuf,

    /// JSON script of edit steps
    pub script: PathBuf,

    /// Render the result in editable mode
    #[arg(long)]
    pub editable: bool,
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let script = Script::load(&args.script)?;
    let (mut session, source) = open_session(&args.file, config.editor)?;

    eprintln!(
        "{} {} step(s) against {}",
        "▶ Replaying".bright_blue().bold(),
        script.steps.len(),
        args.file.display()
    );

    for (index, step) in script.steps.iter().enumerate() {
        let status = apply_step(&mut session, &script, step, &source)?;
        eprintln!("  {:>3}. {:<24} {}", index + 1, describe(step), status);
    }

    let history = session.history();
    eprintln!(
        "{} history {}/{} (undo {}, redo {})",
        "✓".green(),
        history.cursor() + 1,
        history.len(),
        history.undo_levels(),
        history.redo_levels()
    );

    let mut options = config.render;
    options.editable |= args.editable;
    print!("{}", render_fragment(session.project().as_ref(), &options));
    Ok(())
}

fn apply_step(
    session: &mut EditSession,
    script: &Script,
    step: &Step,
    source: &str,
) -> Result<String> {
    let status = match step {
        Step::Text { node, value } => outcome(session.commit_text(node, value)),
        Step::Image { node, src, path } => {
            let result = match (src, path) {
                (_, Some(path)) => session
                    .accept_image_file(node, &script.resolve(path))
                    .map_err(anyhow::Error::from),
                (Some(src), None) => session
                    .accept_image(node, &ImageSource::Uri(src.clone()))
                    .map_err(anyhow::Error::from),
                (None, None) => session
                    .accept_image(node, &ImageSource::Placeholder)
                    .map_err(anyhow::Error::from),
            };
            match result {
                Ok(result) => outcome(result),
                Err(error) => format!("{} {}", "rejected".red(), error),
            }
        }
        Step::Undo => boundary(session.undo()),
        Step::Redo => boundary(session.redo()),
        Step::Load { markup } => {
            let diagnostics = session.try_load(markup.as_deref().unwrap_or(source))?;
            format!(
                "{} (generation {}, {} diagnostic(s))",
                "loaded".green(),
                session.generation(),
                diagnostics.len()
            )
        }
    };

    Ok(status)
}

fn describe(step: &Step) -> String {
    match step {
        Step::Text { node, .. } => format!("text {}", node),
        Step::Image { node, .. } => format!("image {}", node),
        Step::Undo => "undo".to_string(),
        Step::Redo => "redo".to_string(),
        Step::Load { .. } => "load".to_string(),
    }
}

fn outcome(outcome: CommitOutcome) -> String {
    match outcome {
        CommitOutcome::Recorded => "recorded".green().to_string(),
        CommitOutcome::Applied => "applied".green().to_string(),
        CommitOutcome::Unchanged => "unchanged".yellow().to_string(),
        CommitOutcome::Ignored => "ignored".dimmed().to_string(),
    }
}

fn boundary(moved: bool) -> String {
    if moved {
        "ok".green().to_string()
    } else {
        "nothing to do".dimmed().to_string()
    }
}
