//! Command-line interface.
//!
//! With no text arguments the interactive workbench starts. `--old` and
//! `--new` skip the UI and print one colorized diff to stdout instead.

use crate::config::Config;
use crate::diff::Granularity;
use crate::terminal::SessionConfig;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// diffbench - compare two texts side by side with a colorized diff
#[derive(Debug, Parser)]
#[command(name = "diffbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/diffbench/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Unit of comparison, overriding the config file
    #[arg(short, long, value_enum)]
    pub granularity: Option<GranularityArg>,

    /// Log file (default: diffbench.log in the temp directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Draw on the main screen instead of the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Old text; with --new, print the diff and exit
    #[arg(long, value_name = "TEXT", requires = "new")]
    pub old: Option<String>,

    /// New text; with --old, print the diff and exit
    #[arg(long, value_name = "TEXT", requires = "old")]
    pub new: Option<String>,

    /// Wrap printed diffs to this many columns
    #[arg(short, long, value_name = "COLUMNS")]
    pub width: Option<usize>,
}

/// `--granularity` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    /// One token per character.
    Char,
    /// Words and the whitespace between them.
    Word,
    /// Whole lines.
    Line,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Char => Self::Char,
            GranularityArg::Word => Self::Word,
            GranularityArg::Line => Self::Line,
        }
    }
}

/// What `main` should do once arguments are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run the interactive workbench.
    Interactive,
    /// Print the diff of two texts.
    Print {
        /// Old text.
        old: String,
        /// New text.
        new: String,
    },
    /// Print the effective configuration.
    PrintConfig,
}

impl Cli {
    /// Fold command-line overrides into a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(granularity) = self.granularity {
            config.diff.granularity = granularity.into();
        }
    }

    /// Terminal session settings.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            alternate_screen: !self.no_alt_screen,
            ..SessionConfig::default()
        }
    }

    /// The selected mode.
    pub fn mode(&self) -> Mode {
        if self.print_config {
            return Mode::PrintConfig;
        }
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => Mode::Print {
                old: old.clone(),
                new: new.clone(),
            },
            _ => Mode::Interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("diffbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.mode(), Mode::Interactive);
        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert!(cli.session_config().alternate_screen);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_print_mode() {
        let cli = parse(&["--old", "Hello", "--new", "Hello Go bro"]);
        assert_eq!(
            cli.mode(),
            Mode::Print {
                old: "Hello".into(),
                new: "Hello Go bro".into()
            }
        );
    }

    #[test]
    fn test_old_requires_new() {
        let args = ["diffbench", "--old", "a"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_granularity_override() {
        let cli = parse(&["-g", "word", "--log-level", "debug", "--no-alt-screen"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.diff.granularity, Granularity::Word);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert!(!cli.session_config().alternate_screen);
    }

    #[test]
    fn test_bad_granularity() {
        assert!(Cli::try_parse_from(["diffbench", "-g", "sentence"]).is_err());
    }

    #[test]
    fn test_print_config_wins() {
        let cli = parse(&["--print-config", "--old", "a", "--new", "b"]);
        assert_eq!(cli.mode(), Mode::PrintConfig);
    }
}
