use crate::utils::Result;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// File system operations used by the bundle builder.
///
/// Operations return raw `io::Result` so the caller can classify a failure
/// (unreadable source, cache write, artifact write) by where it happened.
#[async_trait]
pub trait FileSystemService: Send + Sync {
    async fn read_file(&self, path: &Path) -> io::Result<String>;
    /// Write `content`, creating parent directories. Readers never see a partial file.
    async fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
    async fn modified(&self, path: &Path) -> io::Result<SystemTime>;
}

/// A text-to-text transform, typically a minifier.
///
/// Implementations must not panic on bad input; they report failure and the
/// chain substitutes the text it passed in.
#[async_trait]
pub trait Filter: Send + Sync {
    fn name(&self) -> &str;
    async fn apply(&self, source: &str) -> Result<String>;
}
