use crate::utils::{CompressError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The two asset families a configuration can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Script,
    Stylesheet,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Script => "js",
            AssetKind::Stylesheet => "css",
        }
    }

    /// Registry names of the filters used when a configuration lists none.
    pub fn default_filters(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Script => &["JsFilter"],
            AssetKind::Stylesheet => &["CssFilter"],
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "js" | "script" => Ok(AssetKind::Script),
            "css" | "stylesheet" => Ok(AssetKind::Stylesheet),
            other => Err(CompressError::config(format!(
                "invalid compress type {}",
                other
            ))),
        }
    }
}

/// A named bundle definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Group {
    /// Output path relative to the distribution root.
    pub dist_file: String,
    /// Inputs relative to the source root, in concatenation order.
    pub source_files: Vec<String>,
    /// Inputs that are concatenated but never filtered.
    pub skip_files: BTreeSet<String>,
}

impl Group {
    pub fn new(dist_file: &str, source_files: &[&str]) -> Self {
        Self {
            dist_file: dist_file.to_string(),
            source_files: source_files.iter().map(|s| s.to_string()).collect(),
            skip_files: BTreeSet::new(),
        }
    }

    pub fn with_skip_files(mut self, skip_files: &[&str]) -> Self {
        self.skip_files = skip_files.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn is_skipped(&self, file: &str) -> bool {
        self.skip_files.contains(file)
    }
}

/// Per-kind configuration: filesystem roots, URL roots and group definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KindConfig {
    #[serde(rename = "StaticURL")]
    pub static_url: String,
    #[serde(rename = "SrcPath")]
    pub src_path: PathBuf,
    #[serde(rename = "DistPath")]
    pub dist_path: PathBuf,
    #[serde(rename = "SrcURL")]
    pub src_url: String,
    #[serde(rename = "DistURL")]
    pub dist_url: String,
    #[serde(rename = "Groups")]
    pub groups: HashMap<String, Group>,
    #[serde(rename = "FilterList")]
    pub filter_list: Vec<String>,
    #[serde(rename = "IsProdMode")]
    pub prod_mode: bool,
}

impl KindConfig {
    pub fn new(src_path: impl Into<PathBuf>, dist_path: impl Into<PathBuf>) -> Self {
        Self {
            static_url: "/".to_string(),
            src_path: src_path.into(),
            dist_path: dist_path.into(),
            ..Default::default()
        }
    }

    pub fn with_urls(mut self, src_url: &str, dist_url: &str) -> Self {
        self.src_url = src_url.to_string();
        self.dist_url = dist_url.to_string();
        self
    }

    pub fn with_group(mut self, name: &str, group: Group) -> Self {
        self.groups.insert(name.to_string(), group);
        self
    }

    pub fn source_path(&self, file: &str) -> PathBuf {
        self.src_path.join(file)
    }

    pub fn artifact_path(&self, group: &Group) -> PathBuf {
        self.dist_path.join(&group.dist_file)
    }

    pub fn validate(&self, kind: AssetKind) -> Result<()> {
        for (name, group) in &self.groups {
            if group.dist_file.trim().is_empty() {
                return Err(CompressError::config(format!(
                    "{} group `{}` has no DistFile",
                    kind, name
                )));
            }
            if group.source_files.is_empty() {
                return Err(CompressError::config(format!(
                    "{} group `{}` has no SourceFiles",
                    kind, name
                )));
            }
        }
        Ok(())
    }
}

/// The three build directives exposed to the launcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Reprocess every file and rewrite every artifact.
    pub force: bool,
    /// Re-read every file but bypass the filter chain.
    pub skip: bool,
    /// Per-file progress at info level.
    pub verbose: bool,
}

impl BuildOptions {
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Default::default()
        }
    }

    pub fn skipping() -> Self {
        Self {
            skip: true,
            ..Default::default()
        }
    }
}

/// Outcome of building one group.
#[derive(Debug)]
pub struct GroupReport {
    pub name: String,
    pub artifact: PathBuf,
    pub artifact_written: bool,
    pub processed: usize,
    pub reused: usize,
    pub errors: Vec<CompressError>,
}

impl GroupReport {
    pub fn new(name: &str, artifact: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            artifact,
            artifact_written: false,
            processed: 0,
            reused: 0,
            errors: Vec::new(),
        }
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Per-group reports of one orchestrator run.
#[derive(Debug)]
pub struct BuildSummary {
    pub kind: AssetKind,
    pub groups: Vec<GroupReport>,
}

impl BuildSummary {
    pub fn group(&self, name: &str) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn failed(&self) -> usize {
        self.groups.iter().filter(|g| g.has_error()).count()
    }

    pub fn written(&self) -> usize {
        self.groups.iter().filter(|g| g.artifact_written).count()
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}
