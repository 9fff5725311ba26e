use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use ngrokcfg::editor::ConfigEditor;
use ngrokcfg::logging::init_tracing;
use ngrokcfg::prompt::Prompter;

/// Create or extend an ngrok agent config under ./config/.
#[derive(Parser, Debug)]
#[command(name = "ngrokcfg", version, about)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut editor = ConfigEditor::new(Prompter::new(stdin.lock(), stdout.lock()));

    let path = editor.run(&cwd)?;
    tracing::info!(path = %path.display(), "session complete");
    Ok(())
}
