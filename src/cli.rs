//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::models::{Family, FilterCriteria};

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  gemini-explorer                          Launch the interactive explorer
  gemini-explorer list                     List all models as a table
  gemini-explorer list -s flash --text     Text models matching \"flash\"
  gemini-explorer list -f embeddings       Only embedding models
  gemini-explorer list --recommended --json
  gemini-explorer show gemini-2.5-pro      Full details of one model
  gemini-explorer config                   Show config paths and key status
  gemini-explorer set-api-key              Store the API key (reads stdin)
  gemini-explorer completions zsh          Generate zsh completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Browse, classify, and filter the Gemini models available to your API key",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List models (falls back to the built-in catalog when the API gives nothing)
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show every known field of one model
    Show {
        /// Full ("models/gemini-2.5-pro") or short ("gemini-2.5-pro") id
        id: String,
    },
    /// Show config paths, endpoint, API key status, and recommended models
    Config,
    /// Store the API key in the config directory (reads stdin when omitted)
    SetApiKey {
        /// API key value
        key: Option<String>,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

/// Filter flags shared by listing commands.
#[derive(ClapArgs, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive search over ids, names, descriptions, family, and methods
    #[arg(short = 's', long = "search")]
    pub query: Option<String>,

    /// Restrict to a family (repeatable): gemini, gemma, embeddings, image-video, audio-live, other
    #[arg(short = 'f', long = "family")]
    pub families: Vec<Family>,

    /// Only recommended models
    #[arg(long)]
    pub recommended: bool,

    /// Only models in the active lifecycle state (models without a state are kept)
    #[arg(long)]
    pub active: bool,

    /// Only models supporting generateContent
    #[arg(long)]
    pub text: bool,

    /// Only models supporting embedContent
    #[arg(long)]
    pub embeddings: bool,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria {
            text_query: self.query.clone().unwrap_or_default(),
            recommended_only: self.recommended,
            active_only: self.active,
            ..Default::default()
        };
        if !self.families.is_empty() {
            criteria.families = self.families.iter().copied().collect();
        }
        if self.text {
            criteria = criteria.text_only();
        }
        if self.embeddings {
            criteria = criteria.embeddings_only();
        }
        criteria
    }
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// The explorer owns the terminal, so its logs go to a file.
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{EMBED_ACTION, TEXT_ACTION};

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gemini-explorer").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn no_subcommand_is_interactive() {
        let args = parse(&[]);
        assert!(args.is_interactive());
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(parse(&["-v", "list"]).log_level(), "info");
        assert_eq!(parse(&["list", "-vv"]).log_level(), "debug");
        assert_eq!(parse(&["-q", "-v"]).log_level(), "error");
    }

    #[test]
    fn list_flags_build_criteria() {
        let args = parse(&[
            "list", "-s", "flash", "-f", "gemini", "-f", "audio-live", "--recommended",
            "--active", "--text",
        ]);
        let Some(Commands::List { filters, json }) = args.command else {
            panic!("expected list command");
        };
        assert!(!json);
        let criteria = filters.to_criteria();
        assert_eq!(criteria.text_query, "flash");
        assert_eq!(criteria.families.len(), 2);
        assert!(criteria.families.contains(&Family::AudioLive));
        assert!(criteria.recommended_only);
        assert!(criteria.active_only);
        assert!(criteria.requires(TEXT_ACTION));
        assert!(!criteria.requires(EMBED_ACTION));
    }

    #[test]
    fn empty_filters_are_default_criteria() {
        assert_eq!(FilterArgs::default().to_criteria(), FilterCriteria::default());
    }

    #[test]
    fn unknown_family_is_rejected() {
        let result = Args::try_parse_from(["gemini-explorer", "list", "-f", "llm"]);
        assert!(result.is_err());
    }
}
