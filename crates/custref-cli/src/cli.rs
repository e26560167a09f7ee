//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};

/// custref - find customer references by asking in plain English.
#[derive(Debug, Parser)]
#[command(name = "custref")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CUSTREF_CONFIG")]
    pub config: Option<String>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (customer names or the bare query)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask one question and print the matching customers
    Ask(AskArgs),

    /// Show the criteria and query a question compiles to, without running it
    Compile(CompileArgs),

    /// Start an interactive chat session
    Chat,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question, e.g. "retail customers with more than 10k invoices"
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,

    /// Also print the generated query
    #[arg(short = 'q', long)]
    pub show_query: bool,

    /// Report record-store failures instead of showing no results
    #[arg(long)]
    pub strict: bool,
}

impl AskArgs {
    /// The prompt words joined back into one string
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }
}

/// Arguments for the compile command.
#[derive(Debug, Parser)]
pub struct CompileArgs {
    /// The question to compile
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl CompileArgs {
    /// The prompt words joined back into one string
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration (secrets masked)
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a single value, e.g. `llm.provider azure`
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["custref"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::parse_from([
            "custref",
            "ask",
            "retail",
            "customers",
            "with",
            "SAP",
            "--show-query",
        ]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.prompt_text(), "retail customers with SAP");
                assert!(args.show_query);
                assert!(!args.strict);
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["custref", "-vv", "--format", "json", "compile", "x"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Some(Command::Compile(_))));
    }

    #[test]
    fn test_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["custref", "ask"]).is_err());
    }

    #[test]
    fn test_config_set() {
        let cli = Cli::parse_from(["custref", "config", "set", "llm.provider", "azure"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::Set { key, value },
            })) => {
                assert_eq!(key, "llm.provider");
                assert_eq!(value, "azure");
            }
            _ => panic!("Expected config set"),
        }
    }
}
