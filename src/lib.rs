// matteid - Matte ID allocator for render compositing
// Module declarations

use clap::Parser;
use env_logger::Env;

pub mod allocation;
pub mod commands;
pub mod config;
pub mod presets;
pub mod reconcile;
pub mod recorder;
pub mod scene;
pub mod session;
pub mod state;

pub fn run() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let json = cli.json;
    commands::execute(cli).map_err(|e| {
        if json {
            if let Ok(text) = serde_json::to_string_pretty(&e) {
                println!("{}", text);
            }
        }
        anyhow::anyhow!(e.message().to_string())
    })
}
