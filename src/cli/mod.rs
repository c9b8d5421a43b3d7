//! CLI module - Command-line interface for the zone panel
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Zone panel - DNS administration backend
/// Self-registration and administrator dashboard over a PowerDNS-style schema
#[derive(Parser)]
#[command(name = "zonepanel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the search paths
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Create default config file
    Init,

    /// Apply pending database migrations and list them
    Migrate,

    /// Manage permission templates
    #[command(subcommand, alias = "tpl")]
    Templates(TemplateCommands),
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List permission templates and their items
    #[command(alias = "ls")]
    List,

    /// Create a permission template from existing permission items
    Add {
        /// Unique template name
        name: String,

        /// Human-readable description
        #[arg(short, long, default_value = "")]
        descr: String,

        /// Permission item names to grant
        #[arg(short, long = "item")]
        items: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["zonepanel"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn template_add_collects_items() {
        let cli = Cli::try_parse_from([
            "zonepanel",
            "--config",
            "/etc/zonepanel.toml",
            "templates",
            "add",
            "Viewer",
            "--descr",
            "Read access",
            "--item",
            "zone_content_view_own",
            "--item",
            "search",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/zonepanel.toml")));
        match cli.command {
            Some(Commands::Templates(TemplateCommands::Add { name, descr, items })) => {
                assert_eq!(name, "Viewer");
                assert_eq!(descr, "Read access");
                assert_eq!(items, vec!["zone_content_view_own", "search"]);
            }
            _ => panic!("expected templates add"),
        }
    }
}
