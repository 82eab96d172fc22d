//! coursekit - maintenance toolkit for a static course catalog site.

mod catalog;
mod cli;
mod config;
mod core;
mod embed;
mod generate;
mod html;
mod logger;
mod transform;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, GenerateTarget};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Commands::Slug { titles } = &cli.command {
        return cli::slug::run_slug(titles);
    }

    let config = SiteConfig::load(&cli)?;
    debug!("config"; "site root {}", config.get_root().display());

    match &cli.command {
        Commands::Init { dry, .. } => cli::init::new_config(&config, *dry),
        Commands::Generate { target } => match *target {
            GenerateTarget::Courses { dry } => cli::generate::generate_courses(&config, dry),
            GenerateTarget::Categories { dry } => cli::generate::generate_categories(&config, dry),
        },
        Commands::Rewrite { args } => cli::pages::rewrite_pages(args, &config),
        Commands::Strip { args } => cli::pages::strip_pages(args, &config),
        Commands::Reorder { args } => cli::pages::reorder_pages(args, &config),
        Commands::Check { args } => cli::check::check_pages(args, &config),
        Commands::Catalog { action } => cli::catalog::run_catalog(action, &config),
        Commands::Slug { .. } => Ok(()),
    }
}
