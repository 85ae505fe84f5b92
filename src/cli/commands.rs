use crate::core::models::{AssetKind, BuildOptions};
use crate::utils::{ConfigLoader, Logger, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "assetpack")]
#[command(about = "assetpack - bundle and minify JS/CSS groups with a staleness-aware cache")]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build group artifacts
    Build {
        /// Asset kind: js, css or all
        #[arg(short, long, default_value = "all")]
        kind: String,
        /// Reprocess every file and rewrite every artifact
        #[arg(short, long)]
        force: bool,
        /// Rebuild without running filters
        #[arg(short, long)]
        skip: bool,
        /// Print per-file progress
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the markup for a group
    Render {
        /// Group name
        group: String,
        /// Asset kind: js or css
        #[arg(short, long, default_value = "js")]
        kind: String,
        /// Reference the bundled artifact instead of the sources
        #[arg(long)]
        prod: bool,
    },
    /// Print an example configuration
    Init,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    /// Returns whether every requested operation succeeded.
    pub async fn run(&self) -> Result<bool> {
        Logger::init();

        let cli = Cli::parse();
        self.run_with(cli).await
    }

    pub async fn run_with(&self, cli: Cli) -> Result<bool> {
        match cli.command {
            Commands::Build {
                kind,
                force,
                skip,
                verbose,
            } => {
                let options = BuildOptions {
                    force,
                    skip,
                    verbose,
                };
                self.handle_build_command(&cli.config, &kind, options).await
            }
            Commands::Render { group, kind, prod } => {
                self.handle_render_command(&cli.config, &group, &kind, prod)
            }
            Commands::Init => {
                println!("{}", ConfigLoader::generate_example());
                Ok(true)
            }
        }
    }

    async fn handle_build_command(
        &self,
        config: &Path,
        kind: &str,
        options: BuildOptions,
    ) -> Result<bool> {
        let Some(kinds) = parse_kinds(kind, true) else {
            return Ok(false);
        };

        let settings = ConfigLoader::load(config)
            .with_context(|| format!("failed to load {}", config.display()))?;

        let mut success = true;
        for kind in kinds {
            let summary = settings.get(kind).build(options).await;
            success &= summary.success();
        }

        Ok(success)
    }

    fn handle_render_command(
        &self,
        config: &Path,
        group: &str,
        kind: &str,
        prod: bool,
    ) -> Result<bool> {
        let Some(kinds) = parse_kinds(kind, false) else {
            return Ok(false);
        };

        let settings = ConfigLoader::load(config)
            .with_context(|| format!("failed to load {}", config.display()))?;

        for kind in kinds {
            let compressor = settings.get(kind);
            if prod {
                compressor.set_production_mode(true);
            }
            println!("{}", compressor.render(group));
        }

        Ok(true)
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// `None` (after logging) for an unsupported kind.
fn parse_kinds(kind: &str, allow_all: bool) -> Option<Vec<AssetKind>> {
    if allow_all && kind.eq_ignore_ascii_case("all") {
        return Some(vec![AssetKind::Script, AssetKind::Stylesheet]);
    }

    match kind.parse::<AssetKind>() {
        Ok(kind) => Some(vec![kind]),
        Err(e) => {
            Logger::error(&e.to_string());
            None
        }
    }
}
