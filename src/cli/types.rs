use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "sitepress")]
#[command(about = "Static site builder for articles and pages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site root (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Build root (defaults to ./build)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub destination: Option<PathBuf>,

    /// Configuration file(s), merged in order
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Vec<PathBuf>,

    /// Build for production
    #[arg(long, default_value_t = false, global = true)]
    pub production: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remove the build root
    Clean,

    /// Render articles and pages only
    Pages,

    /// Copy static files only
    Static,

    /// Clean, copy static files, then render pages
    #[command(alias = "b")]
    Build,

    /// Build, serve and rebuild on changes
    #[command(alias = "s")]
    Serve {
        /// Host to bind to
        #[arg(long, value_name = "HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Don't reload browsers after a rebuild
        #[arg(long, default_value_t = false)]
        no_livereload: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["sitepress"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.production);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sitepress", "b", "--source", "site", "-d", "out", "--production", "-g",
        ])
        .unwrap();

        assert_eq!(cli.command, Some(Commands::Build));
        assert_eq!(cli.source, Some(PathBuf::from("site")));
        assert_eq!(cli.destination, Some(PathBuf::from("out")));
        assert!(cli.production);
        assert!(cli.debug);
    }

    #[test]
    fn test_serve_options() {
        let cli = Cli::try_parse_from(["sitepress", "s", "-p", "8080", "--no-livereload"]).unwrap();

        assert_eq!(
            cli.command,
            Some(Commands::Serve {
                host: "127.0.0.1".to_string(),
                port: Some(8080),
                no_livereload: true,
            })
        );
    }

    #[test]
    fn test_config_files_repeat() {
        let cli = Cli::try_parse_from([
            "sitepress", "pages", "-c", "_config.yml", "-c", "_config.dev.yml",
        ])
        .unwrap();

        assert_eq!(cli.config.len(), 2);
    }
}
