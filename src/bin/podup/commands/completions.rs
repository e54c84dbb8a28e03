use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

use crate::cli::{CompletionsArgs, Podup};

pub(crate) fn handle_completions(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Podup::command();
    generate(args.shell, &mut cmd, env!("CARGO_PKG_NAME"), &mut io::stdout());
    Ok(())
}
