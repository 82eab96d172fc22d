//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Maintenance toolkit for a static course catalog site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file name, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "coursekit.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented default config file
    #[command(visible_alias = "i")]
    Init {
        /// Site directory (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config to stdout instead of writing it
        #[arg(short, long)]
        dry: bool,
    },

    /// Generate course or category pages
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        target: GenerateTarget,
    },

    /// Rewrite relative asset paths after a directory reorganization
    #[command(visible_alias = "r")]
    Rewrite {
        #[command(flatten)]
        args: PageArgs,
    },

    /// Strip unwanted fragments from pages
    #[command(visible_alias = "s")]
    Strip {
        #[command(flatten)]
        args: PageArgs,
    },

    /// Reorder course outline units and clean list numbering
    #[command(visible_alias = "o")]
    Reorder {
        #[command(flatten)]
        args: PageArgs,
    },

    /// Check pages for broken relative links and unbalanced divs
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Inspect or export the course catalog
    #[command(visible_alias = "cat")]
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Print the slug of each title
    Slug {
        /// Titles to slugify. Use `-` to read titles from stdin (one per line).
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

/// What `generate` produces.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum GenerateTarget {
    /// Individual course pages, from the outline text or the catalog
    #[command(visible_alias = "c")]
    Courses {
        /// Print what would be written without writing
        #[arg(short, long)]
        dry: bool,
    },

    /// Category pages, from the grouped text file or the catalog
    #[command(visible_alias = "cat")]
    Categories {
        /// Print what would be written without writing
        #[arg(short, long)]
        dry: bool,
    },
}

/// `catalog` actions.
#[derive(Subcommand, Debug, Clone)]
pub enum CatalogAction {
    /// List categories and courses with a summary and validation issues
    #[command(visible_alias = "ls")]
    List,

    /// Export the catalog
    #[command(visible_alias = "e")]
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Script)]
        format: ExportFormat,

        /// Write output to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

/// Catalog export format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `const courseData = {...};` for the site's client script
    Script,
    /// Pretty-printed JSON
    Json,
    /// TOML
    Toml,
}

/// Arguments shared by the in-place page commands.
#[derive(clap::Args, Debug, Clone)]
pub struct PageArgs {
    /// Files or directories to process. If omitted, uses `paths.roots`.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Report changes without writing files
    #[arg(short, long)]
    pub dry: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Files or directories to check. If omitted, uses `paths.roots`.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Treat check failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aliases_and_globals() {
        let cli = Cli::try_parse_from(["coursekit", "g", "cat", "--dry", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Generate {
                target: GenerateTarget::Categories { dry: true }
            }
        ));

        let cli = Cli::try_parse_from(["coursekit", "check", "-w", "pages"]).unwrap();
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert!(args.warn_only);
        assert_eq!(args.paths, vec![PathBuf::from("pages")]);
    }

    #[test]
    fn test_global_config_and_stdin_marker() {
        let cli = Cli::try_parse_from(["coursekit", "slug", "-"]).unwrap();
        assert!(matches!(&cli.command, Commands::Slug { titles } if titles == &["-"]));
        let cli = Cli::try_parse_from(["coursekit", "rewrite", "-C", "site.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_export_format() {
        let cli =
            Cli::try_parse_from(["coursekit", "catalog", "export", "-f", "json", "-o", "x.json"])
                .unwrap();
        let Commands::Catalog {
            action: CatalogAction::Export { format, output },
        } = cli.command
        else {
            panic!("expected export");
        };
        assert_eq!(format, ExportFormat::Json);
        assert_eq!(output, Some(PathBuf::from("x.json")));
    }
}
