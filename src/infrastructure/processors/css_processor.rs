use crate::core::interfaces::Filter;
use crate::utils::{CompressError, Result};
use lightningcss::{
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions as CssParserOptions, StyleSheet},
};

/// In-process stylesheet minification using lightningcss.
pub struct LightningCssMinifier {
    name: String,
}

impl LightningCssMinifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn minify(content: &str) -> std::result::Result<String, String> {
        let mut stylesheet = StyleSheet::parse(content, CssParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| format!("CSS minify error: {}", e))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS print error: {}", e))?;

        Ok(result.code)
    }
}

impl Default for LightningCssMinifier {
    fn default() -> Self {
        Self::new("CssFilter")
    }
}

#[async_trait::async_trait]
impl Filter for LightningCssMinifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, source: &str) -> Result<String> {
        let source = source.to_string();

        tokio::task::spawn_blocking(move || Self::minify(&source))
            .await
            .map_err(|e| CompressError::filter(&self.name, format!("minification task failed: {}", e)))?
            .map_err(|message| CompressError::filter(&self.name, message))
    }
}
