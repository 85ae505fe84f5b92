use super::chain::FilterChain;
use super::command::{CommandFilter, CommandSpec};
use super::css_processor::LightningCssMinifier;
use super::minifier::OxcMinifier;
use crate::core::interfaces::Filter;
use crate::core::models::AssetKind;
use crate::utils::Logger;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Named filters a configuration can select from.
///
/// Each filter is constructed once here and shared by every chain that
/// names it.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// In-process minifiers plus the Closure and YUI command filters.
    /// `commands` replaces the built-in command line of an external filter by name.
    pub fn with_builtins(commands: &HashMap<String, CommandSpec>) -> Self {
        let command = |name: &str, default: CommandSpec| {
            CommandFilter::new(name, commands.get(name).cloned().unwrap_or(default))
        };

        let mut registry = Self::new();
        registry.register(Arc::new(OxcMinifier::new("JsFilter")));
        registry.register(Arc::new(LightningCssMinifier::new("CssFilter")));
        registry.register(Arc::new(command("ClosureFilter", CommandSpec::closure())));
        registry.register(Arc::new(command("YuiFilter", CommandSpec::yui())));

        // extra named commands become filters of their own
        for (name, spec) in commands {
            if !registry.contains(name) {
                registry.register(Arc::new(CommandFilter::new(name, spec.clone())));
            }
        }

        registry
    }

    pub fn register(&mut self, filter: Arc<dyn Filter>) {
        self.filters.insert(filter.name().to_string(), filter);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(name).cloned()
    }

    /// Resolve configured names in order; unknown names are dropped with a
    /// warning. Falls back to the kind's default chain when nothing resolves.
    pub fn chain_for(&self, kind: AssetKind, names: &[String], timeout: Duration) -> FilterChain {
        let mut filters: Vec<Arc<dyn Filter>> = Vec::with_capacity(names.len());
        for name in names {
            match self.get(name) {
                Some(filter) => filters.push(filter),
                None => Logger::warn(&format!("unknown {} filter `{}` ignored", kind, name)),
            }
        }

        if filters.is_empty() {
            filters = kind
                .default_filters()
                .iter()
                .filter_map(|name| self.get(name))
                .collect();
        }

        FilterChain::new(filters).with_timeout(timeout)
    }
}
