//! The configuration draft and its typed plugin sequence.
//!
//! The draft serializes to the shape the consuming bundler expects:
//! `entry`, `output`, `module.rules`, `resolve`, `resolveLoader`,
//! `plugins`, `externals`, `devtool`. Plugins are a typed sequence so
//! their ordering is explicit rather than an emergent property of
//! push order.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A fully normalized entry value, in the form the bundler consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedEntry {
    /// An ordered module list, bundled into one chunk.
    Modules(Vec<String>),
    /// Named sub-entries, each independently normalized.
    Named(IndexMap<String, ResolvedEntry>),
}

impl ResolvedEntry {
    /// The module list behind a flat entry, if this is one.
    pub fn modules(&self) -> Option<&[String]> {
        match self {
            ResolvedEntry::Modules(modules) => Some(modules),
            ResolvedEntry::Named(_) => None,
        }
    }
}

/// Emitted-bundle settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSettings {
    pub path: PathBuf,
    pub filename: String,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSettings {
    pub rules: Vec<Value>,
}

/// Module resolution settings: recognized extensions, aliases, and
/// the ordered search roots (project-local, then framework-local,
/// then the global install location).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveSettings {
    pub extensions: Vec<String>,
    pub alias: IndexMap<String, String>,
    pub modules: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveLoaderSettings {
    pub modules: Vec<PathBuf>,
}

/// Document minification applied in production builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifyOptions {
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
    pub remove_attribute_quotes: bool,
}

/// A document-generation directive: render one markup file from a
/// template and inject references to specific chunks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    /// Source template, as matched on disk.
    pub template: String,
    /// Generated document filename, identical to the matched path.
    pub filename: String,
    /// Chunks injected into the document, dependency order.
    pub chunks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<MinifyOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks_sort_mode: Option<String>,
}

/// One plugin the bundler should instantiate.
///
/// Position in the plugin list is part of the contract: extraction
/// and optimization directives assume earlier ones have already run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginDirective {
    LoaderOptions {
        minimize: bool,
        debug: bool,
        context: PathBuf,
        babel: Value,
        postcss: Vec<String>,
    },
    Define {
        definitions: IndexMap<String, Value>,
    },
    DocumentTemplate(DocumentTemplate),
    /// Extract the named common chunk out of its member chunks.
    CommonsChunk { name: String, chunks: Vec<String> },
    /// Inject global symbols resolved to absolute module paths.
    Provide { symbols: IndexMap<String, PathBuf> },
    ScriptMinify {
        compress_warnings: bool,
        source_map: bool,
    },
    StylesheetOptimize { safe: bool },
    StylesheetExtract {
        filename: String,
        all_chunks: bool,
    },
    OccurrenceOrder,
    HotModuleReplacement,
}

/// Mutable configuration accumulator, one per composition run.
///
/// Owned exclusively by the composition pipeline; every invocation
/// constructs a fresh draft and discards it after serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDraft {
    pub entry: IndexMap<String, ResolvedEntry>,
    pub output: OutputSettings,
    pub module: ModuleSettings,
    pub resolve: ResolveSettings,
    pub resolve_loader: ResolveLoaderSettings,
    pub devtool: Value,
    pub plugins: Vec<PluginDirective>,
    pub externals: Value,
}
