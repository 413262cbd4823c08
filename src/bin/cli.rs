// src/bin/cli.rs
use clap::Parser;
use tdec_scrape::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let code = cli::run(cli::Args::parse())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
