//! Markup referencing a group's assets.
//!
//! Production mode points at the bundled artifact and memoizes the result
//! per group for the life of the process. Development mode points at every
//! source file and is recomputed on each call. Rendering never fails: any
//! problem becomes an inline comment in the returned markup.

use crate::core::models::{AssetKind, Group, KindConfig};
use crate::utils::{CompressError, Logger};
use dashmap::DashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A fixed markup template with a single `URL` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagTemplate {
    pattern: &'static str,
}

impl TagTemplate {
    const FIELD: &'static str = "{URL}";

    pub const SCRIPT: TagTemplate = TagTemplate {
        pattern: r#"<script type="text/javascript" src="{URL}"></script>"#,
    };

    pub const STYLESHEET: TagTemplate = TagTemplate {
        pattern: r#"<link rel="stylesheet" href="{URL}" />"#,
    };

    pub fn for_kind(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Script => Self::SCRIPT,
            AssetKind::Stylesheet => Self::STYLESHEET,
        }
    }

    pub fn render(&self, url: &str) -> String {
        self.pattern.replace(Self::FIELD, &escape_attribute(url))
    }
}

pub struct TagGenerator {
    kind: AssetKind,
    config: Arc<KindConfig>,
    template: TagTemplate,
    production: AtomicBool,
    cache: DashMap<String, String>,
}

impl TagGenerator {
    pub fn new(kind: AssetKind, config: Arc<KindConfig>) -> Self {
        let production = AtomicBool::new(config.prod_mode);
        Self {
            kind,
            template: TagTemplate::for_kind(kind),
            config,
            production,
            cache: DashMap::new(),
        }
    }

    pub fn set_production_mode(&self, production: bool) {
        self.production.store(production, Ordering::Relaxed);
    }

    pub fn is_production(&self) -> bool {
        self.production.load(Ordering::Relaxed)
    }

    /// Drop memoized production markup, e.g. after an in-process rebuild.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached(&self, name: &str) -> Option<String> {
        self.cache.get(name).map(|entry| entry.value().clone())
    }

    pub fn render(&self, name: &str) -> String {
        let Some(group) = self.config.groups.get(name) else {
            return diagnostic(&CompressError::GroupNotFound(name.to_string()).to_string());
        };

        if self.is_production() {
            self.render_production(name, group)
        } else {
            self.render_development(name, group)
        }
    }

    fn render_production(&self, name: &str, group: &Group) -> String {
        if let Some(hit) = self.cached(name) {
            return hit;
        }

        let path = self.config.artifact_path(group);
        let modified = match modified_secs(&path) {
            Ok(secs) => secs,
            Err(e) => {
                // not cached: a later successful build is picked up on the next call
                return diagnostic(&format!(
                    "load file `{}` for path `{}` error: {}",
                    group.dist_file,
                    path.display(),
                    e
                ));
            }
        };

        let url = asset_url(&self.config.static_url, &self.config.dist_url, &group.dist_file, modified);
        let markup = wrap(name, vec![self.template.render(&url)]);

        self.cache
            .entry(name.to_string())
            .or_insert(markup)
            .value()
            .clone()
    }

    fn render_development(&self, name: &str, group: &Group) -> String {
        let tags = group
            .source_files
            .iter()
            .map(|file| {
                let path = self.config.source_path(file);
                match modified_secs(&path) {
                    Ok(secs) => self.template.render(&asset_url(
                        &self.config.static_url,
                        &self.config.src_url,
                        file,
                        secs,
                    )),
                    Err(e) => diagnostic(&format!(
                        "load file `{}` for path `{}` error: {}",
                        file,
                        path.display(),
                        e
                    )),
                }
            })
            .collect();

        wrap(name, tags)
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }
}

fn wrap(name: &str, tags: Vec<String>) -> String {
    let mut parts = Vec::with_capacity(tags.len() + 2);
    parts.push(format!("<!-- assetpack group `{}` begin -->", name));
    parts.extend(tags);
    parts.push(format!("<!-- assetpack group `{}` end -->", name));
    parts.join("\n\t")
}

fn modified_secs(path: &Path) -> std::io::Result<u64> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(unix_secs(modified))
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Log `message` and return it as an HTML comment.
pub fn diagnostic(message: &str) -> String {
    Logger::error(message);
    let mut text = message.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    format!("<!-- assetpack: {} -->", text)
}

/// `static_url` + slash-normalised `root/file` + cache-busting version.
/// Exactly one `/` separates a non-empty `static_url` from the path.
pub fn asset_url(static_url: &str, root: &str, file: &str, version: u64) -> String {
    let joined = join_url(root, file);
    let url = if static_url.is_empty() {
        joined
    } else {
        format!(
            "{}/{}",
            static_url.trim_end_matches('/'),
            joined.trim_start_matches('/')
        )
    };
    format!("{}?ver={}", url, version)
}

/// Join URL path segments, resolving `.` and `..` the way a URL path would.
pub fn join_url(root: &str, file: &str) -> String {
    let absolute = root.starts_with('/') || (root.is_empty() && file.starts_with('/'));
    let mut segments: Vec<&str> = Vec::new();
    for segment in root.split('/').chain(file.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let path = segments.join("/");
    if absolute {
        format!("/{}", path)
    } else {
        path
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
