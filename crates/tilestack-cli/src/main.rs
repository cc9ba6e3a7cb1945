mod cli;
mod commands;

use anyhow::Context;
use clap::Parser;

use tilestack_model::{Env, StackConfig};
use tilestack_observe::{LoggerConfig, init_local_offset, init_logger};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    init_local_offset();
    let cli = Cli::parse();

    // 1) environment
    let env = Env::load(cli.command.env_file()).context("loading environment")?;

    // 2) logger
    let log_cfg = LoggerConfig::from_env(&env)?;
    init_logger(&log_cfg)?;

    // 3) config
    let config = StackConfig::from_env(&env).context("reading stack configuration")?;

    match cli.command {
        Command::Synth {
            context,
            out,
            stdout,
            ..
        } => {
            let out = (!stdout).then_some(out.as_path());
            commands::synth(&config, &context, out, &mut std::io::stdout().lock())?;
        }
        Command::Check { .. } => {
            let report = commands::check(&config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
