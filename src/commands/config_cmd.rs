//! `cabinet config` and `cabinet completions`.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, ConfigCommand};
use crate::config::Config;
use crate::paths;
use crate::ui;

pub fn execute(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            print!("{}", config.to_toml()?);
        },
        ConfigCommand::Validate => {
            let result = config.validate()?;
            ui::print_warnings(&result.warnings);
            if result.has_warnings() {
                println!("Configuration is valid ({} warning(s))", result.warnings.len());
            } else {
                println!("Configuration is valid");
            }
        },
        ConfigCommand::Path => {
            println!("config:  {}", paths::get_config_path()?.display());
            println!("session: {}", paths::get_session_path()?.display());
        },
    }
    Ok(())
}

/// Write completions for `shell` to stdout.
pub fn completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
