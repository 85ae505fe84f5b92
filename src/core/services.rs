use crate::core::bundle::GroupBuilder;
use crate::core::interfaces::FileSystemService;
use crate::core::models::{AssetKind, BuildOptions, BuildSummary, GroupReport, KindConfig};
use crate::core::tags::TagGenerator;
use crate::infrastructure::processors::FilterChain;
use crate::infrastructure::TokioFileSystemService;
use crate::utils::Logger;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_CACHE_DIR: &str = "tmp";

/// Build and render for one asset kind.
///
/// Script and stylesheet compressors share every line of logic; the kind only
/// selects the default filters and the markup template.
pub struct AssetCompressor {
    kind: AssetKind,
    config: Arc<KindConfig>,
    chain: FilterChain,
    fs_service: Arc<dyn FileSystemService>,
    cache_dir: PathBuf,
    max_parallel_groups: usize,
    tags: TagGenerator,
}

impl AssetCompressor {
    pub fn new(kind: AssetKind, config: KindConfig, chain: FilterChain) -> Self {
        let config = Arc::new(config);
        Self {
            kind,
            tags: TagGenerator::new(kind, Arc::clone(&config)),
            config,
            chain,
            fs_service: Arc::new(TokioFileSystemService),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            max_parallel_groups: num_cpus::get(),
        }
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_fs_service(mut self, fs_service: Arc<dyn FileSystemService>) -> Self {
        self.fs_service = fs_service;
        self
    }

    /// `1` builds groups strictly one after another.
    pub fn with_max_parallel_groups(mut self, max: usize) -> Self {
        self.max_parallel_groups = max.max(1);
        self
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn config(&self) -> &KindConfig {
        &self.config
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn set_production_mode(&self, production: bool) {
        self.tags.set_production_mode(production);
    }

    pub fn is_production(&self) -> bool {
        self.tags.is_production()
    }

    pub fn tags(&self) -> &TagGenerator {
        &self.tags
    }

    /// Markup for `name`; never fails, errors are rendered as comments.
    pub fn render(&self, name: &str) -> String {
        self.tags.render(name)
    }

    /// Build every group of this kind.
    ///
    /// Groups are independent: a failure is recorded in that group's report
    /// and never stops the others. Order of the returned reports is
    /// unspecified.
    pub async fn build(&self, options: BuildOptions) -> BuildSummary {
        let builder = GroupBuilder {
            kind: self.kind,
            config: &self.config,
            chain: &self.chain,
            fs: self.fs_service.as_ref(),
            cache_root: &self.cache_dir,
        };
        let builder = &builder;

        let groups: Vec<GroupReport> = stream::iter(self.config.groups.iter())
            .map(move |(name, group)| builder.build(name, group, options))
            .buffer_unordered(self.max_parallel_groups)
            .collect()
            .await;

        let summary = BuildSummary {
            kind: self.kind,
            groups,
        };
        Logger::build_complete(
            self.kind.as_str(),
            summary.groups.len(),
            summary.written(),
            summary.failed(),
        );
        summary
    }
}

impl std::fmt::Debug for AssetCompressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCompressor")
            .field("kind", &self.kind)
            .field("chain", &self.chain)
            .field("cache_dir", &self.cache_dir)
            .field("groups", &self.config.groups.len())
            .finish()
    }
}
