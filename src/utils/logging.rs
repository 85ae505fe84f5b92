use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("assetpack=info"));

        // A second init (tests, embedding hosts) keeps the first subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }

    pub fn group_start(kind: &str, name: &str, verbose: bool) {
        if verbose {
            info!("📦 {} group '{}'", kind, name);
            info!("--------------------------");
        } else {
            debug!("📦 {} group '{}'", kind, name);
        }
    }

    pub fn processing_file(path: &Path, skipped: bool, verbose: bool) {
        let mode = if skipped { "unfiltered" } else { "filtered" };
        if verbose {
            info!("⚡ compress file {} ({})", path.display(), mode);
        } else {
            debug!("⚡ compress file {} ({})", path.display(), mode);
        }
    }

    pub fn cache_saved(path: &Path, verbose: bool) {
        if verbose {
            info!("💾 saved {}", path.display());
        } else {
            debug!("💾 saved {}", path.display());
        }
    }

    pub fn using_cache(path: &Path, verbose: bool) {
        if verbose {
            info!("♻️  use cache file {}", path.display());
        } else {
            debug!("♻️  use cache file {}", path.display());
        }
    }

    pub fn artifact_written(path: &Path, verbose: bool) {
        if verbose {
            info!("✅ compressed file {} ... saved", path.display());
        } else {
            debug!("✅ compressed file {} ... saved", path.display());
        }
    }

    pub fn not_modified(name: &str, verbose: bool) {
        if verbose {
            info!("⏭️  group '{}' not modified", name);
        } else {
            debug!("⏭️  group '{}' not modified", name);
        }
    }

    pub fn build_complete(kind: &str, groups: usize, written: usize, failed: usize) {
        if failed == 0 {
            info!(
                "📊 {}: {} groups, {} artifacts written",
                kind, groups, written
            );
        } else {
            warn!(
                "📊 {}: {} groups, {} artifacts written, {} groups failed",
                kind, groups, written, failed
            );
        }
    }

    pub fn filter_failed(msg: &str) {
        warn!("⚠️  {}; using unfiltered text", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
