//! Plume - a static site builder for a French markdown blog.

#![allow(dead_code)]

mod asset;
mod build;
mod cli;
mod config;
mod content;
mod error;
mod logger;
mod refs;
mod render;
mod transform;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.build_args().verbose);

    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Build { .. } => build::build_site(&config).map(|_| ()),
    }
}
