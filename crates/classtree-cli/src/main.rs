use anyhow::Result;
use clap::Parser;
use classtree_cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .format_timestamp(None)
        .init();

    run(&cli)?;
    Ok(())
}
