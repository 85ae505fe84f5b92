use crate::core::interfaces::Filter;
use crate::utils::{CompressError, Result};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// In-process JavaScript minification using oxc.
///
/// Sources are parsed as classic scripts: bundles are concatenated into one
/// file and loaded with a plain `<script>` tag, so top-level bindings stay
/// global and are never mangled away.
pub struct OxcMinifier {
    name: String,
}

impl OxcMinifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Minify JavaScript code
    pub fn minify(source_code: &str) -> std::result::Result<String, String> {
        let allocator = Allocator::default();
        let source_type = SourceType::cjs();

        let parse_result = Parser::new(&allocator, source_code, source_type).parse();

        if parse_result.panicked || !parse_result.errors.is_empty() {
            let errors: Vec<String> = parse_result
                .errors
                .iter()
                .map(|e| format!("Parse error: {}", e))
                .collect();
            return Err(errors.join("\n"));
        }

        let mut program = parse_result.program;
        let minified = Minifier::new(MinifierOptions::default()).minify(&allocator, &mut program);

        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

impl Default for OxcMinifier {
    fn default() -> Self {
        Self::new("JsFilter")
    }
}

#[async_trait::async_trait]
impl Filter for OxcMinifier {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, source: &str) -> Result<String> {
        let source = source.to_string();

        // oxc is CPU-bound; keep it off the async workers
        tokio::task::spawn_blocking(move || Self::minify(&source))
            .await
            .map_err(|e| CompressError::filter(&self.name, format!("minification task failed: {}", e)))?
            .map_err(|message| CompressError::filter(&self.name, message))
    }
}
