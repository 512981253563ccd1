use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

pub const DEFAULT_INPUT: &str = "Life/data.txt";
pub const DEFAULT_OUTPUT: &str = "Life/plot.png";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plot how many generations a Game of Life board runs for each initial density"
)]
pub struct Cli {
    /// Density/generation table: one header line, then "<density> <generation>" per line
    #[arg(
        short,
        long,
        env = "DENSITY_PLOT_INPUT",
        default_value = DEFAULT_INPUT,
        value_hint = ValueHint::FilePath
    )]
    pub input: PathBuf,

    /// PNG file to write
    #[arg(
        short,
        long,
        env = "DENSITY_PLOT_OUTPUT",
        default_value = DEFAULT_OUTPUT,
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// Do not open the written image in a viewer
    #[arg(long, env = "DENSITY_PLOT_NO_DISPLAY", action = ArgAction::SetTrue)]
    pub no_display: bool,
}

// ---------------------------------------------------------------------------
// Resolved run configuration
// ---------------------------------------------------------------------------

/// Everything one run of the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Open the image after writing it.
    pub display: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
            display: !cli.no_display,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "density-plot",
            "--input",
            "runs/a.txt",
            "-o",
            "out/a.png",
            "--no-display",
        ])
        .unwrap();
        let config = Config::from(cli);
        assert_eq!(config.input, PathBuf::from("runs/a.txt"));
        assert_eq!(config.output, PathBuf::from("out/a.png"));
        assert!(!config.display);
    }

    #[test]
    fn defaults_reproduce_fixed_paths() {
        let cli = Cli::try_parse_from(["density-plot"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.input, PathBuf::from("Life/data.txt"));
        assert_eq!(config.output, PathBuf::from("Life/plot.png"));
        assert!(config.display);
    }
}
