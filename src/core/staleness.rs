//! Per-file freshness decisions based on modification times.
//!
//! A cache entry is the filtered output of one source file stored under the
//! cache root. Its modification time is the only freshness watermark: no
//! metadata sidecar is kept, so decisions survive process restarts.

use crate::core::interfaces::FileSystemService;
use crate::core::models::BuildOptions;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
pub enum Staleness {
    /// Source must be re-read (and re-filtered unless skipped).
    Stale,
    /// Cache entry can be reused verbatim.
    Fresh { cache_modified: SystemTime },
    /// Source could not be stat'd.
    MissingSource(io::Error),
}

impl Staleness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Staleness::Fresh { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Staleness::Stale)
    }
}

/// Location of the cache entry for `file` under `src_path`.
///
/// The source root is mirrored beneath `cache_root` even when it is absolute;
/// `..` segments become `__` so entries cannot land outside the cache root.
pub fn cache_path(cache_root: &Path, src_path: &Path, file: &str) -> PathBuf {
    let mut path = cache_root.to_path_buf();
    for component in src_path.join(file).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::ParentDir => path.push("__"),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    path
}

/// Decide whether `source` has to be processed again.
///
/// Equal timestamps count as fresh: on filesystems with coarse timestamps a
/// cache written in the same tick as its source would otherwise be rebuilt
/// on every run.
pub async fn detect(
    fs: &dyn FileSystemService,
    source: &Path,
    cache: &Path,
    options: BuildOptions,
) -> Staleness {
    let source_modified = match fs.modified(source).await {
        Ok(time) => time,
        Err(e) => return Staleness::MissingSource(e),
    };

    if options.force || options.skip {
        return Staleness::Stale;
    }

    match fs.modified(cache).await {
        Ok(cache_modified) if cache_modified >= source_modified => {
            Staleness::Fresh { cache_modified }
        }
        _ => Staleness::Stale,
    }
}
