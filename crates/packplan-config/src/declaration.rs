//! The project declaration: everything the composer consumes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::EntryDeclaration;
use crate::fragments::LoaderFragments;

/// Per-pattern overrides for an output declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Overrides the generated script entry name for matched pages.
    /// The document template and chunk list still use the matched
    /// path, so one physical template can back a bundle with a
    /// different logical name.
    #[serde(default)]
    pub script_name: Option<String>,

    /// Common chunks this page depends on, in dependency order.
    /// Absent means every declared common chunk.
    #[serde(default)]
    pub commons: Option<Vec<String>>,
}

/// The declarative project description, read once per composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDeclaration {
    /// Output subdirectory (below the project root) built assets
    /// land in.
    #[serde(default = "default_root")]
    pub root: String,

    /// Public URL base prepended to emitted asset references.
    /// Rewritten in development mode to the host's address.
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Development server port, baked into live-reload entries.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Output-page glob patterns with optional per-pattern overrides.
    /// Patterns are relative to the project root and must match
    /// regular files.
    #[serde(default)]
    pub outputs: IndexMap<String, Option<OutputSpec>>,

    /// Common chunks shared across pages, keyed by chunk name.
    /// Declaration order decides extraction order: chunks meant to be
    /// more widely shared come first.
    #[serde(default)]
    pub common_chunks: IndexMap<String, EntryDeclaration>,

    /// Global symbol name -> module path. Only relative paths are
    /// honored; bare package names are assumed already resolvable.
    #[serde(default)]
    pub globals: IndexMap<String, String>,

    /// Opaque externals bundle, forwarded to the bundler verbatim.
    #[serde(default)]
    pub externals: Value,

    /// Loader and transpiler fragments from external collaborators.
    #[serde(default)]
    pub fragments: LoaderFragments,
}

impl Default for ProjectDeclaration {
    fn default() -> Self {
        Self {
            root: default_root(),
            public_path: default_public_path(),
            port: default_port(),
            outputs: IndexMap::new(),
            common_chunks: IndexMap::new(),
            globals: IndexMap::new(),
            externals: Value::Null,
            fragments: LoaderFragments::default(),
        }
    }
}

fn default_root() -> String {
    "dist".into()
}

fn default_public_path() -> String {
    "/".into()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let decl: ProjectDeclaration = toml::from_str("").unwrap();
        assert_eq!(decl.root, "dist");
        assert_eq!(decl.public_path, "/");
        assert_eq!(decl.port, 8080);
        assert!(decl.outputs.is_empty());
        assert!(decl.common_chunks.is_empty());
    }

    #[test]
    fn full_declaration_parses_from_toml() {
        let decl: ProjectDeclaration = toml::from_str(
            r#"
root = "build"
public_path = "/static/"
port = 3000

[outputs."pages/*.html"]
commons = ["vendor"]

[outputs."index.html"]
script_name = "main"

[common_chunks]
vendor = ["./src/vendor.js", "./src/polyfill.js"]
base = "./src/base.js"

[globals]
"$" = "./vendor/jquery.js"
React = "react"
"#,
        )
        .unwrap();

        assert_eq!(decl.root, "build");
        assert_eq!(decl.port, 3000);

        let patterns: Vec<_> = decl.outputs.keys().cloned().collect();
        assert_eq!(patterns, vec!["pages/*.html", "index.html"]);
        assert_eq!(
            decl.outputs["pages/*.html"].as_ref().unwrap().commons,
            Some(vec!["vendor".to_string()])
        );
        assert_eq!(
            decl.outputs["index.html"].as_ref().unwrap().script_name,
            Some("main".to_string())
        );

        let chunks: Vec<_> = decl.common_chunks.keys().cloned().collect();
        assert_eq!(chunks, vec!["vendor", "base"]);
        assert_eq!(
            decl.common_chunks["base"],
            EntryDeclaration::Module("./src/base.js".into())
        );
        assert_eq!(decl.globals["$"], "./vendor/jquery.js");
    }

    #[test]
    fn output_pattern_without_overrides_is_none_in_json() {
        let decl: ProjectDeclaration = serde_json::from_str(
            r#"{ "outputs": { "pages/*.html": null } }"#,
        )
        .unwrap();
        assert_eq!(decl.outputs["pages/*.html"], None);
    }
}
