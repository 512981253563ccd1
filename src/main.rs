mod config;
mod data;
mod error;
mod render;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use config::{Cli, Config};
use data::loader;
use render::display;
use render::plot::{PlotStyle, Renderer};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Cli::parse());
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load → render → (optionally) display.
fn run(config: &Config) -> Result<()> {
    let dataset = loader::load_file(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;

    Renderer::new(PlotStyle::default())
        .render(&dataset, &config.output)
        .with_context(|| format!("rendering {}", config.output.display()))?;

    if config.display {
        display::show(&config.output);
    }
    Ok(())
}
