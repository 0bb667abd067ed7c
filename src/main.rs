//! diffbench binary entry point.

use anyhow::Context;
use clap::Parser;
use diffbench::app;
use diffbench::cli::{Cli, Mode};
use diffbench::config::Config;
use diffbench::logging;
use diffbench::workbench::KeyMap;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref(), cli.log_level).context("failed to start logging")?;

    let mut config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    match cli.mode() {
        Mode::PrintConfig => print!("{}", config.to_toml_string()?),
        Mode::Print { old, new } => {
            let out = app::print_diff(
                &old,
                &new,
                config.diff.granularity,
                &config.theme(),
                cli.width,
            );
            println!("{out}");
        }
        Mode::Interactive => {
            app::run(
                config.workbench_options(),
                &KeyMap::default(),
                cli.session_config(),
            )
            .context("workbench failed")?;
        }
    }

    Ok(())
}
