use crate::core::models::{AssetKind, BuildOptions, BuildSummary, KindConfig};
use crate::core::services::{AssetCompressor, DEFAULT_CACHE_DIR};
use crate::infrastructure::processors::{CommandSpec, FilterRegistry};
use crate::utils::{CompressError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "compress.json";

/// Configuration file format (compress.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompressConfig {
    #[serde(default)]
    pub js: Option<KindConfig>,

    #[serde(default)]
    pub css: Option<KindConfig>,

    /// Root of the per-file cache tree (default: "tmp")
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Upper bound for a single filter invocation (default: 60)
    #[serde(default = "default_filter_timeout")]
    pub filter_timeout_secs: u64,

    /// Groups built concurrently (default: number of CPUs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parallel_groups: Option<usize>,

    /// Command lines for external filters, keyed by filter name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub commands: HashMap<String, CommandSpec>,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_filter_timeout() -> u64 {
    60
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            js: None,
            css: None,
            cache_dir: default_cache_dir(),
            filter_timeout_secs: default_filter_timeout(),
            max_parallel_groups: None,
            commands: HashMap::new(),
        }
    }
}

/// Both compressors, ready to build and render.
#[derive(Debug)]
pub struct Settings {
    pub js: AssetCompressor,
    pub css: AssetCompressor,
}

impl Settings {
    pub fn get(&self, kind: AssetKind) -> &AssetCompressor {
        match kind {
            AssetKind::Script => &self.js,
            AssetKind::Stylesheet => &self.css,
        }
    }

    pub async fn build_all(&self, options: BuildOptions) -> Vec<BuildSummary> {
        vec![self.js.build(options).await, self.css.build(options).await]
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_file(path: &Path) -> Result<CompressConfig> {
        Logger::debug(&format!("Loading config from {}", path.display()));

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<CompressConfig> {
        let config: CompressConfig = serde_json::from_str(content)
            .map_err(|e| CompressError::config(format!("failed to parse config: {}", e)))?;

        for (kind, section) in [(AssetKind::Script, &config.js), (AssetKind::Stylesheet, &config.css)] {
            if let Some(section) = section {
                section.validate(kind)?;
            }
        }

        Ok(config)
    }

    /// Resolve filters against the built-in registry and build both compressors.
    pub fn into_settings(config: CompressConfig) -> Settings {
        let registry = FilterRegistry::with_builtins(&config.commands);
        Self::into_settings_with(config, &registry)
    }

    pub fn into_settings_with(config: CompressConfig, registry: &FilterRegistry) -> Settings {
        let timeout = Duration::from_secs(config.filter_timeout_secs);
        let build = |kind: AssetKind, section: Option<KindConfig>| {
            let mut section = section.unwrap_or_default();
            if section.static_url.is_empty() {
                section.static_url = "/".to_string();
            }

            let chain = registry.chain_for(kind, &section.filter_list, timeout);
            let compressor = AssetCompressor::new(kind, section, chain).with_cache_dir(&config.cache_dir);
            match config.max_parallel_groups {
                Some(max) => compressor.with_max_parallel_groups(max),
                None => compressor,
            }
        };

        Settings {
            js: build(AssetKind::Script, config.js.clone()),
            css: build(AssetKind::Stylesheet, config.css.clone()),
        }
    }

    pub fn load(path: &Path) -> Result<Settings> {
        Ok(Self::into_settings(Self::load_from_file(path)?))
    }

    /// Generate example config file
    pub fn generate_example() -> String {
        let example = r#"{
  "Js": {
    "StaticURL": "/",
    "SrcPath": "static/js",
    "DistPath": "static/dist/js",
    "SrcURL": "js",
    "DistURL": "dist/js",
    "FilterList": ["JsFilter"],
    "IsProdMode": false,
    "Groups": {
      "app": {
        "DistFile": "app.min.js",
        "SourceFiles": ["lib/jquery.js", "app.js"],
        "SkipFiles": ["lib/jquery.js"]
      }
    }
  },
  "Css": {
    "StaticURL": "/",
    "SrcPath": "static/css",
    "DistPath": "static/dist/css",
    "SrcURL": "css",
    "DistURL": "dist/css",
    "FilterList": ["CssFilter"],
    "Groups": {
      "app": {
        "DistFile": "app.min.css",
        "SourceFiles": ["reset.css", "app.css"]
      }
    }
  },
  "CacheDir": "tmp",
  "FilterTimeoutSecs": 60
}"#;
        example.to_string()
    }
}
