//! optcall - getopt-style option parsing for shell scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optcall::{generate_error_output, generate_output, generate_output_string, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Getopt-style option parsing with typed values.
#[derive(Parser, Debug)]
#[command(name = "optcall", version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse arguments and print shell export statements
    Parse {
        /// JSON option table
        #[arg(long)]
        config: String,

        /// Variable prefix (overrides config)
        #[arg(long)]
        prefix: Option<String>,

        /// Write the output to a temporary file and print its path
        #[arg(long)]
        file: bool,

        /// Arguments to parse
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Validate an option table
    Check {
        /// JSON option table
        #[arg(long)]
        config: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            config,
            prefix,
            file,
            args,
        } => {
            let cfg = Config::from_json(&config).context("failed to parse config JSON")?;
            cfg.validate().context("invalid config")?;

            let effective_prefix = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());
            let program = cfg.name.as_deref().unwrap_or("optcall");

            tracing::debug!(count = args.len(), "parsing arguments");
            match cfg.parse_args(&args) {
                Ok(parsed) if file => {
                    let path = generate_output(&parsed, effective_prefix)
                        .context("failed to generate output file")?;
                    println!("{}", path.display());
                }
                Ok(parsed) => {
                    print!("{}", generate_output_string(&parsed, effective_prefix));
                }
                Err(e) if file => {
                    let path = generate_error_output(program, &e.to_string())
                        .context("failed to generate error file")?;
                    println!("{}", path.display());
                }
                Err(e) => return Err(e).context("failed to parse arguments"),
            }
        }
        Commands::Check { config } => {
            let cfg = Config::from_json(&config).context("failed to parse config JSON")?;
            cfg.check().context("invalid config")?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_subcommand_parses_config() {
        let cli = Cli::try_parse_from(["optcall", "parse", "--config", r#"{"options":[]}"#, "--"])
            .unwrap();

        match cli.command {
            Commands::Parse {
                config,
                prefix,
                file,
                args,
            } => {
                assert_eq!(config, r#"{"options":[]}"#);
                assert!(prefix.is_none());
                assert!(!file);
                assert!(args.is_empty());
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_parse_subcommand_parses_args() {
        let cli = Cli::try_parse_from([
            "optcall",
            "parse",
            "--config",
            r#"{"options":[]}"#,
            "--file",
            "--",
            "-v",
            "--output",
            "file.txt",
            "input.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { args, file, .. } => {
                assert!(file);
                assert_eq!(args, vec!["-v", "--output", "file.txt", "input.txt"]);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_parse_subcommand_requires_config() {
        let result = Cli::try_parse_from(["optcall", "parse", "--"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_subcommand() {
        let cli = Cli::try_parse_from([
            "optcall",
            "check",
            "--config",
            r#"{"options":[{"name":"v","short":"v"}]}"#,
        ])
        .unwrap();

        match cli.command {
            Commands::Check { config } => {
                let cfg = Config::from_json(&config).unwrap();
                cfg.check().unwrap();
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = Cli::try_parse_from(["optcall"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prefix_priority_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "optcall",
            "parse",
            "--config",
            r#"{"prefix":"CONFIG_"}"#,
            "--prefix",
            "CLI_",
            "--",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse { config, prefix, .. } => {
                let cfg = Config::from_json(&config).unwrap();
                let effective = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());
                assert_eq!(effective, "CLI_");
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_prefix_default_when_neither_set() {
        let cli = Cli::try_parse_from(["optcall", "parse", "--config", r#"{}"#, "--"]).unwrap();

        match cli.command {
            Commands::Parse { config, prefix, .. } => {
                let cfg = Config::from_json(&config).unwrap();
                let effective = prefix.as_deref().unwrap_or_else(|| cfg.effective_prefix());
                assert_eq!(effective, "OPT_");
            }
            _ => panic!("Expected Parse command"),
        }
    }
}
