//! SynthArena CLI - lay out and compare retrosynthesis routes

mod cli;
mod outline;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::SynthArenaApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
