//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Cachedisk - local cache disk resolver
///
/// Walks a preference-ordered list of volume names and resolves an
/// application cache directory on the first one that is mounted, local,
/// and writable, falling back to the home directory.
#[derive(Parser, Debug)]
#[command(name = "cachedisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CACHEDISK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .cachedisk.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the cache path on the best available volume
    Resolve(ResolveArgs),

    /// List mounted volumes with locality and free space
    Volumes(VolumesArgs),

    /// Initialize a project-local .cachedisk.toml config
    Init(InitArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Volume names in preference order (overrides configuration)
    pub volumes: Vec<String>,

    /// Relative cache directory created on the chosen volume
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Print `export VAR='path'` lines for the configured variables
    #[arg(short, long, conflicts_with = "format")]
    pub export: bool,
}

/// Arguments for the volumes command
#[derive(Parser, Debug)]
pub struct VolumesArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite existing .cachedisk.toml
    #[arg(short, long)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.dir)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local .cachedisk.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

/// Output format for resolve and volumes commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn cli_parses_resolve() {
        let cli = Cli::parse_from(["cachedisk", "resolve", "FastSSD", "SlowRAID"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.volumes, vec!["FastSSD", "SlowRAID"]);
                assert!(args.dir.is_none());
                assert!(!args.export);
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_parses_resolve_with_dir() {
        let cli = Cli::parse_from(["cachedisk", "resolve", "--dir", "_caches/nuke"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert!(args.volumes.is_empty());
                assert_eq!(args.dir.as_deref(), Some("_caches/nuke"));
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_parses_resolve_export() {
        let cli = Cli::parse_from(["cachedisk", "resolve", "--export"]);
        match cli.command {
            Commands::Resolve(args) => assert!(args.export),
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn resolve_export_conflicts_with_format() {
        let result = Cli::try_parse_from(["cachedisk", "resolve", "--export", "--format", "json"]);
        assert!(result.is_err());
    }

    #[test]
    fn resolve_default_format_is_table() {
        let cli = Cli::parse_from(["cachedisk", "resolve"]);
        match cli.command {
            Commands::Resolve(args) => assert!(matches!(args.format, OutputFormat::Table)),
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_parses_volumes_json() {
        let cli = Cli::parse_from(["cachedisk", "volumes", "--format", "json"]);
        match cli.command {
            Commands::Volumes(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected Volumes command"),
        }
    }

    #[test]
    fn cli_parses_init() {
        let cli = Cli::parse_from(["cachedisk", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn cli_parses_init_force() {
        let cli = Cli::parse_from(["cachedisk", "init", "--force"]);
        match cli.command {
            Commands::Init(args) => assert!(args.force),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["cachedisk", "config", "set", "cache.dir", "_caches/nuke"]);
        match cli.command {
            Commands::Config(args) => match args.action {
                Some(ConfigAction::Set { key, value, local }) => {
                    assert_eq!(key, "cache.dir");
                    assert_eq!(value, "_caches/nuke");
                    assert!(!local);
                }
                _ => panic!("expected Set action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_parses_completions() {
        let cli = Cli::parse_from(["cachedisk", "completions", "bash"]);
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, Shell::Bash),
            _ => panic!("expected Completions command"),
        }
    }

    #[test]
    fn cli_no_local_flag() {
        let cli = Cli::parse_from(["cachedisk", "--no-local", "resolve"]);
        assert!(cli.no_local);
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["cachedisk", "resolve"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["cachedisk", "-v", "resolve"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["cachedisk", "-vv", "resolve"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    #[serial]
    fn cli_config_reads_env_var() {
        std::env::set_var("CACHEDISK_CONFIG", "/tmp/custom.toml");
        let cli = Cli::parse_from(["cachedisk", "resolve"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/custom.toml")));
        std::env::remove_var("CACHEDISK_CONFIG");
    }
}
