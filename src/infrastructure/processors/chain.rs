use crate::core::interfaces::Filter;
use crate::utils::{CompressError, Logger};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FILTER_TIMEOUT: Duration = Duration::from_secs(60);

/// Ordered filters applied to one file's content.
///
/// A filter that fails or exceeds the timeout is treated as a no-op: the
/// text it was handed flows on to the next filter unchanged.
#[derive(Clone)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
    timeout: Duration,
}

impl FilterChain {
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Self {
        Self {
            filters,
            timeout: DEFAULT_FILTER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub async fn apply(&self, source: String) -> String {
        let mut text = source;
        for filter in &self.filters {
            let outcome = tokio::time::timeout(self.timeout, filter.apply(&text)).await;
            match outcome {
                Ok(Ok(filtered)) => text = filtered,
                Ok(Err(e)) => Logger::filter_failed(&e.to_string()),
                Err(_) => Logger::filter_failed(
                    &CompressError::FilterTimeout {
                        filter: filter.name().to_string(),
                        timeout: self.timeout,
                    }
                    .to_string(),
                ),
            }
        }
        text
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .field("timeout", &self.timeout)
            .finish()
    }
}
