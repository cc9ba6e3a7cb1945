use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tilestack_synth::lookup::DEFAULT_CONTEXT_FILE;

/// Synthesize the Martin tile server stack as a CloudFormation template.
#[derive(Debug, Parser)]
#[command(name = "tilestack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the template from the environment and a VPC lookup context.
    Synth {
        /// Dotenv file layered under the process environment.
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,

        /// VPC lookup context.
        #[arg(long, value_name = "PATH", default_value = DEFAULT_CONTEXT_FILE)]
        context: PathBuf,

        /// Output directory for `<stack>.template.json`.
        #[arg(long, value_name = "DIR", default_value = "cdk.out")]
        out: PathBuf,

        /// Print the template instead of writing it.
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Validate the configuration and print what synth would use.
    Check {
        /// Dotenv file layered under the process environment.
        #[arg(long, value_name = "PATH")]
        env_file: Option<PathBuf>,
    },
}

impl Command {
    pub fn env_file(&self) -> Option<&std::path::Path> {
        match self {
            Command::Synth { env_file, .. } | Command::Check { env_file } => env_file.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_synth_defaults() {
        let cli = Cli::parse_from(["tilestack", "synth"]);
        let Command::Synth {
            env_file,
            context,
            out,
            stdout,
        } = cli.command
        else {
            panic!("expected Synth");
        };
        assert_eq!(env_file, None);
        assert_eq!(context, PathBuf::from("tilestack.context.json"));
        assert_eq!(out, PathBuf::from("cdk.out"));
        assert!(!stdout);
    }

    #[test]
    fn parse_synth_with_paths() {
        let cli = Cli::parse_from([
            "tilestack",
            "synth",
            "--env-file",
            "prod.env",
            "--context",
            "ctx.json",
            "--stdout",
        ]);
        assert_eq!(cli.command.env_file(), Some(std::path::Path::new("prod.env")));
        assert!(matches!(cli.command, Command::Synth { stdout: true, .. }));
    }

    #[test]
    fn stdout_conflicts_with_explicit_out() {
        let res = Cli::try_parse_from(["tilestack", "synth", "--out", "dist", "--stdout"]);
        assert!(res.is_err());
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["tilestack", "check"]);
        assert!(matches!(cli.command, Command::Check { env_file: None }));
    }
}
