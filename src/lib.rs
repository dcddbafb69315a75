//! Style Object Compiler
//!
//! Compiles nested, object-shaped style descriptions into CSS text and
//! derives stable class names for them.
//!
//! # Features
//!
//! - Nested selectors: `&`-relative (`&:hover`), descendant (`span`) and
//!   at-rule blocks (`@media ...`) that wrap the enclosing rule
//! - Shorthand properties (`mx`, `py`, ...) expanding to canonical properties
//! - Custom at-rule keys (`@tablet`) aliased to full CSS headers
//! - Design tokens referenced as `$path.to.value`, optionally rooted at a
//!   per-property group
//! - Deterministic, order-sensitive class names
//!
//! # Basic Usage
//!
//! ```rust
//! use stylec::{compile_rule, style_map, StyleContext};
//!
//! let styles = style_map! {
//!     "color" => "red",
//!     "&:hover" => { "color" => "blue" },
//! };
//! let css = compile_rule("foo", &styles, &StyleContext::new());
//! assert_eq!(css, ".foo { color: red; }\n.foo:hover { color: blue; }\n");
//! ```
//!
//! # Compilation Pipeline
//!
//! 1. **Phase 1**: Load - parse the style document, keeping key order
//! 2. **Phase 2**: Expand - rewrite shorthand properties and alias scope keys
//! 3. **Phase 3**: Name - hash the expanded mapping into a class name
//! 4. **Phase 4**: Serialize - lower to nodes and write CSS, resolving tokens

pub mod ast;
pub mod cli;
pub mod error;
pub mod expander;
pub mod naming;
pub mod registry;
pub mod serializer;
pub mod token;
pub mod types;
pub mod utils;

use serde::Serialize;
use std::path::Path;

// Re-export commonly used types and functions
pub use ast::{lower, Node, SelectorKind};
pub use cli::EnhancedCli;
pub use error::{Result, StyleError};
pub use expander::expand;
pub use naming::{canonical_string, generate_class_name, simple_hash};
pub use registry::{KeyAliases, PropertyAliases, StyleContext};
pub use serializer::{serialize, serialize_strict, SelectorContext, Serializer, UnresolvedToken};
pub use token::{resolve_token, TokenGroups, TokenTree, TokenValue};
pub use types::*;
pub use utils::{hyphenate, trim_all};

/// Compiler version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Compilation options and settings
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Log each pipeline phase
    pub debug_mode: bool,

    /// First segment of generated class names
    pub class_prefix: String,

    /// Optional human-readable middle segment of generated class names
    pub component_name: Option<String>,

    /// Compile under this selector instead of a generated class
    pub selector: Option<String>,

    /// Fail on unresolved token references instead of emitting `undefined`
    pub strict_tokens: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            debug_mode: false,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
            component_name: None,
            selector: None,
            strict_tokens: false,
        }
    }
}

/// Compilation statistics and metrics
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompilationStats {
    /// Original source size in bytes
    pub source_size: u64,

    /// Generated CSS size in bytes
    pub output_size: u64,

    /// Generated class name, when no explicit selector was given
    pub class_name: Option<String>,

    /// Selector the top-level rule was emitted under
    pub selector: String,

    /// Number of rule blocks emitted
    pub rule_count: usize,

    /// Number of declarations emitted
    pub declaration_count: usize,

    /// Token references written as `undefined`
    pub unresolved_tokens: usize,

    /// Compilation time in milliseconds
    pub compile_time_ms: u64,
}

/// A class name together with the CSS that styles it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledClass {
    pub class_name: String,
    pub css: String,
}

/// Expand `styles` and serialize them under `.{class_name}`
pub fn compile_rule(class_name: &str, styles: &StyleMap, context: &StyleContext) -> String {
    let expanded = context.expand(styles);
    serialize(
        &expanded,
        &SelectorContext::top_level(format!(".{}", class_name)),
        context,
    )
}

/// Expand `styles`, name the result and serialize it under the generated class
pub fn compile_class(
    styles: &StyleMap,
    context: &StyleContext,
    options: &CompilerOptions,
) -> Result<CompiledClass> {
    let expanded = context.expand(styles);
    let class_name = generate_class_name(
        &expanded,
        &options.class_prefix,
        options.component_name.as_deref(),
    );
    let selectors = SelectorContext::top_level(format!(".{}", class_name));

    let css = if options.strict_tokens {
        serialize_strict(&expanded, &selectors, context)?
    } else {
        serialize(&expanded, &selectors, context)
    };

    Ok(CompiledClass { class_name, css })
}

/// Parse a style document, keeping key order.
///
/// Broken JSON is a [`StyleError::Json`]; well-formed JSON holding arrays,
/// booleans or `null` where a style value belongs is a
/// [`StyleError::InvalidFormat`].
pub fn parse_styles(source: &str, filename: &str) -> Result<StyleMap> {
    serde_json::from_str(source).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => {
            StyleError::invalid_format(format!("{}: {}", filename, e))
        }
        _ => StyleError::json(filename, e.to_string()),
    })
}

/// Read and parse a JSON style document
pub fn load_style_file(path: impl AsRef<Path>) -> Result<StyleMap> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| StyleError::FileNotFound {
        path: format!("{}: {}", path.display(), e),
    })?;
    parse_styles(&source, &path.to_string_lossy())
}

/// Main compiler entry point with default registries and options
pub fn compile_file(input_path: &str, output_path: &str) -> Result<CompilationStats> {
    compile_file_with_options(
        input_path,
        output_path,
        &StyleContext::default(),
        &CompilerOptions::default(),
    )
}

/// Compile a style document file to a CSS file
pub fn compile_file_with_options(
    input_path: &str,
    output_path: &str,
    context: &StyleContext,
    options: &CompilerOptions,
) -> Result<CompilationStats> {
    use std::time::Instant;

    let start_time = Instant::now();

    if options.debug_mode {
        log::info!("{} v{}", NAME, VERSION);
        log::info!("Compiling '{}' to '{}'...", input_path, output_path);
        log::debug!("Compiler options: {:?}", options);
    }

    let source = std::fs::read_to_string(input_path).map_err(|e| StyleError::FileNotFound {
        path: format!("{}: {}", input_path, e),
    })?;

    let (css, mut stats) = compile_source_with_options(&source, input_path, context, options)?;
    stats.compile_time_ms = start_time.elapsed().as_millis() as u64;

    std::fs::write(output_path, css)?;

    if options.debug_mode {
        log::info!("Compilation successful!");
        log::info!("Output size: {} bytes", stats.output_size);
        log::info!("Compile time: {}ms", stats.compile_time_ms);
        log::debug!("Full stats: {:?}", stats);
    }

    Ok(stats)
}

/// Compile style document source text to CSS
pub fn compile_source(source: &str, filename: &str) -> Result<String> {
    let (css, _stats) = compile_source_with_options(
        source,
        filename,
        &StyleContext::default(),
        &CompilerOptions::default(),
    )?;
    Ok(css)
}

/// Compile style document source text to CSS with explicit registries and options
pub fn compile_source_with_options(
    source: &str,
    filename: &str,
    context: &StyleContext,
    options: &CompilerOptions,
) -> Result<(String, CompilationStats)> {
    let mut stats = CompilationStats {
        source_size: source.len() as u64,
        ..Default::default()
    };

    if options.debug_mode {
        log::debug!("Phase 1: Loading {} ({} bytes)", filename, source.len());
    }
    let styles = parse_styles(source, filename)?;

    if options.debug_mode {
        log::debug!("Phase 2: Expanding {} top-level entries", styles.len());
    }
    let expanded = context.expand(&styles);

    let selector = match &options.selector {
        Some(selector) => selector.clone(),
        None => {
            let class_name = generate_class_name(
                &expanded,
                &options.class_prefix,
                options.component_name.as_deref(),
            );
            if options.debug_mode {
                log::debug!("Phase 3: Generated class name {}", class_name);
            }
            let selector = format!(".{}", class_name);
            stats.class_name = Some(class_name);
            selector
        }
    };

    if options.debug_mode {
        log::debug!("Phase 4: Serializing under '{}'", selector);
    }
    let mut serializer = Serializer::new(context);
    let css = serializer.serialize(&expanded, &SelectorContext::top_level(selector.as_str()));

    if options.strict_tokens {
        if let Some(token) = serializer.unresolved().first() {
            return Err(StyleError::unresolved_token(&token.property, &token.reference));
        }
    }

    stats.selector = selector;
    stats.rule_count = serializer.rule_count();
    stats.declaration_count = serializer.declaration_count();
    stats.unresolved_tokens = serializer.unresolved().len();
    stats.output_size = css.len() as u64;

    if options.debug_mode {
        log::debug!(
            "Phase 4 complete. Rules: {}, declarations: {}, unresolved tokens: {}",
            stats.rule_count,
            stats.declaration_count,
            stats.unresolved_tokens
        );
    }

    Ok((css, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_rule_expands_and_resolves() {
        let mut context = StyleContext::new();
        context.tokens.insert("spacing.small", "8px");

        let styles = style_map! { "px" => "$small", "color" => "red" };
        let css = compile_rule("card", &styles, &context);
        assert_eq!(
            css,
            ".card { padding-left: undefined; padding-right: undefined; color: red; }\n"
        );

        // Grouped lookups key on the hyphenated property name
        context.token_groups.insert("padding-left", "spacing");
        context.token_groups.insert("padding-right", "spacing");
        let css = compile_rule("card", &styles, &context);
        assert_eq!(css, ".card { padding-left: 8px; padding-right: 8px; color: red; }\n");
    }

    #[test]
    fn test_compile_class() {
        let context = StyleContext::new();
        let options = CompilerOptions {
            component_name: Some("button".to_string()),
            ..Default::default()
        };

        let compiled = compile_class(&style_map! { "color" => "red" }, &context, &options).unwrap();
        assert_eq!(compiled.class_name, "cky-button-wrg8o2");
        assert_eq!(compiled.css, ".cky-button-wrg8o2 { color: red; }\n");
    }

    #[test]
    fn test_compile_class_names_expanded_styles() {
        let context = StyleContext::new();
        let options = CompilerOptions::default();

        let shorthand = compile_class(&style_map! { "m" => 0 }, &context, &options).unwrap();
        let longhand = compile_class(&style_map! { "margin" => 0 }, &context, &options).unwrap();
        assert_eq!(shorthand, longhand);
    }

    #[test]
    fn test_compile_class_strict() {
        let context = StyleContext::new();
        let options = CompilerOptions {
            strict_tokens: true,
            ..Default::default()
        };

        let result = compile_class(&style_map! { "color" => "$nope" }, &context, &options);
        assert!(matches!(result, Err(StyleError::UnresolvedToken { .. })));
    }

    #[test]
    fn test_compile_source_with_selector() {
        let mut context = StyleContext::new();
        context.key_aliases.insert("@tablet", "@media (min-width: 768px)");
        context.tokens.insert("color.green.500", "green");

        let source = r#"{
            "color": "red",
            "&:hover": { "color": "blue" },
            "@tablet": { "color": "$green.500" }
        }"#;
        let options = CompilerOptions {
            selector: Some(".foo".to_string()),
            ..Default::default()
        };

        let (css, stats) = compile_source_with_options(source, "inline.json", &context, &options).unwrap();
        assert_eq!(
            css,
            ".foo { color: red; }\n.foo:hover { color: blue; }\n@media (min-width: 768px) {\n.foo { color: green; }\n}\n"
        );
        assert_eq!(stats.class_name, None);
        assert_eq!(stats.rule_count, 3);
        assert_eq!(stats.unresolved_tokens, 0);
    }

    #[test]
    fn test_compile_source_rejects_malformed_documents() {
        for source in [
            r#"{"margin": [1, 2]}"#,
            r#"{"hidden": true}"#,
            r#"{"&:hover": {"color": null}}"#,
            r#"["color", "red"]"#,
        ] {
            let err = compile_source(source, "bad.json").unwrap_err();
            assert!(matches!(err, StyleError::InvalidFormat { .. }), "{}: {:?}", source, err);
        }
    }

    #[test]
    fn test_compile_source_reports_broken_json() {
        let err = compile_source(r#"{"color": "red""#, "broken.json").unwrap_err();
        assert!(matches!(err, StyleError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_compile_file() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.path().join("button.json");
        let output_path = temp_dir.path().join("button.css");

        fs::write(&input_path, r#"{"color": "red"}"#).unwrap();

        let stats = compile_file(
            input_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(stats.class_name.as_deref(), Some("cky-wrg8o2"));
        assert_eq!(stats.selector, ".cky-wrg8o2");
        let css = fs::read_to_string(&output_path).unwrap();
        assert_eq!(css, ".cky-wrg8o2 { color: red; }\n");
        assert_eq!(stats.output_size, css.len() as u64);
    }

    #[test]
    fn test_compile_missing_file() {
        let result = compile_file("/nonexistent/styles.json", "/nonexistent/out.css");
        assert!(matches!(result, Err(StyleError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_style_file_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("order.json");
        fs::write(&path, r#"{"b": 2, "a": 1}"#).unwrap();

        let styles = load_style_file(&path).unwrap();
        let keys: Vec<_> = styles.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
