use crate::core::interfaces::FileSystemService;
use crate::core::models::{AssetKind, BuildOptions, Group, GroupReport, KindConfig};
use crate::core::staleness::{self, Staleness};
use crate::infrastructure::processors::FilterChain;
use crate::utils::{CompressError, Logger, Timer};
use std::path::Path;
use std::time::SystemTime;

/// Separator placed between file outputs in an artifact.
pub const JOIN_SEPARATOR: &str = "\n\n";

/// Builds one group: refreshes stale per-file cache entries and writes the
/// artifact when anything changed.
pub struct GroupBuilder<'a> {
    pub kind: AssetKind,
    pub config: &'a KindConfig,
    pub chain: &'a FilterChain,
    pub fs: &'a dyn FileSystemService,
    pub cache_root: &'a Path,
}

impl<'a> GroupBuilder<'a> {
    pub async fn build(&self, name: &str, group: &Group, options: BuildOptions) -> GroupReport {
        let _timer = Timer::start(&format!("{} group {}", self.kind, name));
        let artifact = self.config.artifact_path(group);
        let mut report = GroupReport::new(name, artifact.clone());

        Logger::group_start(self.kind.as_str(), name, options.verbose);

        let mut outputs: Vec<String> = Vec::with_capacity(group.source_files.len());
        let mut modified = false;
        let mut newest_reused: Option<SystemTime> = None;

        for file in &group.source_files {
            let source_path = self.config.source_path(file);
            let cache_path = staleness::cache_path(self.cache_root, &self.config.src_path, file);

            match staleness::detect(self.fs, &source_path, &cache_path, options).await {
                Staleness::MissingSource(source) => {
                    self.record(&mut report, CompressError::SourceUnreadable {
                        path: source_path,
                        source,
                    });
                }
                Staleness::Stale => {
                    let content = match self.fs.read_file(&source_path).await {
                        Ok(content) => content,
                        Err(source) => {
                            self.record(&mut report, CompressError::SourceUnreadable {
                                path: source_path,
                                source,
                            });
                            continue;
                        }
                    };

                    let unfiltered = options.skip || group.is_skipped(file);
                    Logger::processing_file(&source_path, unfiltered, options.verbose);
                    let output = if unfiltered {
                        content
                    } else {
                        self.chain.apply(content).await
                    };

                    match self.fs.write_file(&cache_path, &output).await {
                        Ok(()) => {
                            modified = true;
                            Logger::cache_saved(&cache_path, options.verbose);
                        }
                        Err(source) => self.record(&mut report, CompressError::CacheWriteFailed {
                            path: cache_path,
                            source,
                        }),
                    }

                    report.processed += 1;
                    outputs.push(output);
                }
                Staleness::Fresh { cache_modified } => match self.fs.read_file(&cache_path).await {
                    Ok(cached) => {
                        Logger::using_cache(&cache_path, options.verbose);
                        newest_reused = newest_reused.max(Some(cache_modified));
                        report.reused += 1;
                        outputs.push(cached);
                    }
                    Err(source) => self.record(&mut report, CompressError::CacheUnreadable {
                        path: cache_path,
                        source,
                    }),
                },
            }
        }

        if report.has_error() {
            Logger::warn(&format!(
                "{} group '{}' has errors; {} left untouched",
                self.kind,
                name,
                artifact.display()
            ));
            return report;
        }

        let content = outputs.join(JOIN_SEPARATOR);
        if !(modified || options.force || self.artifact_outdated(&artifact, newest_reused, &content).await) {
            Logger::not_modified(name, options.verbose);
            return report;
        }

        match self.fs.write_file(&artifact, &content).await {
            Ok(()) => {
                report.artifact_written = true;
                Logger::artifact_written(&artifact, options.verbose);
            }
            Err(source) => self.record(&mut report, CompressError::ArtifactWriteFailed {
                path: artifact,
                source,
            }),
        }

        report
    }

    /// An artifact is outdated when it is missing, or when a reused cache
    /// entry was refreshed after it was written (by a group sharing the file)
    /// and its bytes no longer match `content`.
    async fn artifact_outdated(&self, artifact: &Path, newest_reused: Option<SystemTime>, content: &str) -> bool {
        let written = match self.fs.modified(artifact).await {
            Ok(written) => written,
            Err(_) => return true,
        };
        if !newest_reused.is_some_and(|reused| reused > written) {
            return false;
        }

        match self.fs.read_file(artifact).await {
            Ok(existing) => existing != content,
            Err(_) => true,
        }
    }

    fn record(&self, report: &mut GroupReport, error: CompressError) {
        Logger::error(&error.to_string());
        report.errors.push(error);
    }
}
