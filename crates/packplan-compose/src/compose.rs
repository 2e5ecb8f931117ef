//! Configuration composition.
//!
//! Builds the base configuration skeleton, merges the expanded pages
//! and the common-chunk graph into it, and finishes with entry
//! normalization. Everything the composer reads comes in as an
//! explicit parameter; ambient process state is never consulted.

use std::path::PathBuf;

use indexmap::IndexMap;
use packplan_config::{EntryDeclaration, Mode, ProjectDeclaration};
use path_clean::PathClean;
use serde_json::{json, Value};

use crate::chunks::CommonChunkGraphBuilder;
use crate::draft::{
    ConfigurationDraft, ModuleSettings, OutputSettings, PluginDirective,
    ResolveLoaderSettings, ResolveSettings,
};
use crate::entry::EntryResolver;
use crate::error::Result;
use crate::pages::OutputPageExpander;

/// Filesystem roots the composer resolves against.
///
/// Passed explicitly so composition stays deterministic under test;
/// nothing here is read from the process environment.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Project working directory. Output patterns and relative
    /// global-symbol paths resolve against it.
    pub project_root: PathBuf,
    /// Install location of the tool itself, searched for loaders
    /// after the project.
    pub framework_root: PathBuf,
    /// Global package-install location, searched last.
    pub global_root: PathBuf,
}

impl Workspace {
    /// All roots default to the project itself; callers that know
    /// the tool-install and global-install locations override them.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            framework_root: project_root.clone(),
            global_root: project_root.clone(),
            project_root,
        }
    }

    pub fn framework_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.framework_root = root.into();
        self
    }

    pub fn global_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.global_root = root.into();
        self
    }

    /// Ordered module search roots: project, framework, global.
    fn module_roots(&self) -> Vec<PathBuf> {
        vec![
            self.project_root.join("node_modules"),
            self.framework_root.join("node_modules"),
            self.global_root.join("node_modules"),
        ]
    }
}

/// Composes one bundler configuration from a project declaration.
pub struct ConfigComposer<'a> {
    declaration: &'a ProjectDeclaration,
    workspace: &'a Workspace,
    mode: Mode,
}

impl<'a> ConfigComposer<'a> {
    pub fn new(
        declaration: &'a ProjectDeclaration,
        workspace: &'a Workspace,
        mode: Mode,
    ) -> Self {
        Self {
            declaration,
            workspace,
            mode,
        }
    }

    /// Build the full configuration draft.
    ///
    /// Composition order: skeleton, style-rule merge, production
    /// plugin sequence, page expansion and chunk graph, global
    /// symbol providers, entry normalization last.
    pub fn compose(&self) -> Result<ConfigurationDraft> {
        let mut draft = self.skeleton();

        for rule in &self.declaration.fragments.style_rules {
            draft.module.rules.push(rule.clone());
        }

        if !self.mode.is_dev() {
            self.push_release_plugins(&mut draft);
        }

        let entries = self.merge_pages_and_chunks(&mut draft)?;
        self.push_symbol_providers(&mut draft);

        let resolver = EntryResolver::new(self.mode, self.declaration.port);
        draft.entry = resolver.resolve_map(&entries)?;

        Ok(draft)
    }

    /// The fixed configuration skeleton, before anything declared by
    /// the project is merged in.
    fn skeleton(&self) -> ConfigurationDraft {
        let is_dev = self.mode.is_dev();
        let fragments = &self.declaration.fragments;

        let rules = vec![
            json!({
                "test": r"\.(ico|jpg|png|gif|svg|eot|otf|webp|ttf|woff|woff2)(\?.*)?$",
                "loader": "url-loader",
                "query": { "limit": 10000, "name": "[path][name].[hash:7].[ext]" }
            }),
            json!({
                "test": r"\.vue$",
                "loader": "vue-loader",
                "options": { "loaders": fragments.css_loaders }
            }),
            json!({ "test": r"\.html?$", "loader": "html-loader" }),
            json!({ "test": r"\.tpl?$", "loader": "ejs-loader" }),
            json!({ "test": r"\.json$", "loader": "json-loader" }),
            json!({
                "test": r"\.(jsx|js)?$",
                "exclude": r"(node_modules|bower_components)",
                "use": [{ "loader": "babel-loader", "options": fragments.babel }]
            }),
        ];

        ConfigurationDraft {
            entry: IndexMap::new(),
            output: OutputSettings {
                path: self.workspace.project_root.join(&self.declaration.root),
                filename: "[name].[hash:7].js".to_string(),
                public_path: self.declaration.public_path.clone(),
            },
            module: ModuleSettings { rules },
            resolve: ResolveSettings {
                extensions: vec![".js".into(), ".vue".into(), ".json".into()],
                alias: IndexMap::from([
                    ("vue$".to_string(), "vue/dist/vue.esm.js".to_string()),
                    (
                        "@".to_string(),
                        self.workspace
                            .project_root
                            .join("src")
                            .to_string_lossy()
                            .into_owned(),
                    ),
                ]),
                modules: self.workspace.module_roots(),
            },
            resolve_loader: ResolveLoaderSettings {
                modules: self.workspace.module_roots(),
            },
            devtool: if is_dev { json!("#eval") } else { json!(false) },
            plugins: vec![
                PluginDirective::LoaderOptions {
                    minimize: !is_dev,
                    debug: is_dev,
                    context: self.workspace.project_root.clone(),
                    babel: fragments.babel.clone(),
                    postcss: vec!["autoprefixer".to_string()],
                },
                PluginDirective::Define {
                    definitions: IndexMap::from([
                        ("WEBPACK_DEBUG".to_string(), Value::Bool(is_dev)),
                        (
                            "process.env.NODE_ENV".to_string(),
                            Value::String(
                                if is_dev { "development" } else { "production" }.to_string(),
                            ),
                        ),
                    ]),
                },
            ],
            externals: self.declaration.externals.clone(),
        }
    }

    /// Production-only plugin sequence. Order is fixed: the
    /// stylesheet optimizer assumes minified scripts, extraction
    /// assumes optimized stylesheets, and the order-determinism pass
    /// runs over the final chunk set.
    fn push_release_plugins(&self, draft: &mut ConfigurationDraft) {
        draft.plugins.extend([
            PluginDirective::ScriptMinify {
                compress_warnings: false,
                source_map: false,
            },
            PluginDirective::StylesheetOptimize { safe: true },
            PluginDirective::StylesheetExtract {
                filename: "css/[name].[contenthash].css".to_string(),
                all_chunks: true,
            },
            PluginDirective::OccurrenceOrder,
        ]);
    }

    /// Expand output pages, build the chunk graph, and fold both into
    /// the draft. Returns the accumulated raw entry map, pages first
    /// and common chunks after, in declaration order.
    fn merge_pages_and_chunks(
        &self,
        draft: &mut ConfigurationDraft,
    ) -> Result<IndexMap<String, EntryDeclaration>> {
        let expander = OutputPageExpander::new(&self.workspace.project_root);
        let mut pages = expander.expand(&self.declaration.outputs)?;

        let builder = CommonChunkGraphBuilder::new(&self.declaration.common_chunks);
        let graph = builder.build(&mut pages);

        let mut entries = IndexMap::new();
        for page in &pages {
            entries.insert(
                page.name.clone(),
                EntryDeclaration::Module(page.entry_module()),
            );
            draft
                .plugins
                .push(PluginDirective::DocumentTemplate(
                    page.document_directive(self.mode),
                ));
        }

        for (name, declaration) in &self.declaration.common_chunks {
            entries.insert(name.clone(), declaration.clone());
        }
        draft.plugins.extend(builder.directives(&graph));

        Ok(entries)
    }

    /// Register a symbol provider for every declared global whose
    /// target is a relative path, absolutized against the project
    /// root. Non-relative targets are skipped by policy: package
    /// names are assumed already resolvable.
    fn push_symbol_providers(&self, draft: &mut ConfigurationDraft) {
        let mut symbols = IndexMap::new();
        for (name, target) in &self.declaration.globals {
            if target.starts_with("./") || target.starts_with("../") {
                let absolute = self.workspace.project_root.join(target).clean();
                symbols.insert(name.clone(), absolute);
            }
        }

        if !symbols.is_empty() {
            tracing::debug!(?symbols, "global symbol providers");
            draft.plugins.push(PluginDirective::Provide { symbols });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;
    use std::fs;
    use tempfile::TempDir;

    fn declaration_with_chunks() -> ProjectDeclaration {
        ProjectDeclaration {
            common_chunks: IndexMap::from([
                ("vendor".to_string(), EntryDeclaration::from("./src/vendor.js")),
                ("base".to_string(), EntryDeclaration::from("./src/base.js")),
            ]),
            ..ProjectDeclaration::default()
        }
    }

    fn release_plugin_names(draft: &ConfigurationDraft) -> Vec<&'static str> {
        draft
            .plugins
            .iter()
            .filter_map(|plugin| match plugin {
                PluginDirective::ScriptMinify { .. } => Some("script-minify"),
                PluginDirective::StylesheetOptimize { .. } => Some("stylesheet-optimize"),
                PluginDirective::StylesheetExtract { .. } => Some("stylesheet-extract"),
                PluginDirective::OccurrenceOrder => Some("occurrence-order"),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn production_appends_the_four_plugins_in_order() {
        let declaration = declaration_with_chunks();
        let workspace = Workspace::new("/project");
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Production);
        let draft = composer.compose().unwrap();

        assert_eq!(
            release_plugin_names(&draft),
            vec![
                "script-minify",
                "stylesheet-optimize",
                "stylesheet-extract",
                "occurrence-order",
            ]
        );
        assert_eq!(draft.devtool, serde_json::json!(false));
    }

    #[test]
    fn development_appends_none_of_the_release_plugins() {
        let declaration = declaration_with_chunks();
        let workspace = Workspace::new("/project");
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Development);
        let draft = composer.compose().unwrap();

        assert!(release_plugin_names(&draft).is_empty());
        assert_eq!(draft.devtool, serde_json::json!("#eval"));
    }

    #[test]
    fn empty_declaration_short_circuits_with_no_entry() {
        let declaration = ProjectDeclaration::default();
        let workspace = Workspace::new("/project");
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Production);
        assert!(matches!(
            composer.compose(),
            Err(ComposeError::NoEntry)
        ));
    }

    #[test]
    fn relative_globals_become_absolute_symbol_providers() {
        let mut declaration = declaration_with_chunks();
        declaration.globals.insert("$".to_string(), "./vendor/jquery.js".to_string());
        declaration.globals.insert("React".to_string(), "react".to_string());

        let workspace = Workspace::new("/project");
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Production);
        let draft = composer.compose().unwrap();

        let provided = draft
            .plugins
            .iter()
            .find_map(|plugin| match plugin {
                PluginDirective::Provide { symbols } => Some(symbols),
                _ => None,
            })
            .expect("provide directive");
        assert_eq!(
            provided.get("$"),
            Some(&PathBuf::from("/project/vendor/jquery.js"))
        );
        assert!(!provided.contains_key("React"));
    }

    #[test]
    fn pages_and_common_chunks_all_land_in_the_entry_map() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("pages")).unwrap();
        fs::write(dir.path().join("pages/a.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("pages/b.html"), "<html></html>").unwrap();

        let mut declaration = declaration_with_chunks();
        declaration.outputs.insert("pages/*.html".to_string(), None);

        let workspace = Workspace::new(dir.path());
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Production);
        let draft = composer.compose().unwrap();

        let entry_names: Vec<_> = draft.entry.keys().cloned().collect();
        assert_eq!(entry_names, vec!["pages/a", "pages/b", "vendor", "base"]);
        assert_eq!(
            draft.entry["pages/a"].modules().unwrap(),
            ["./pages/a"]
        );

        // One document directive per page, chunks in dependency order.
        let documents: Vec<_> = draft
            .plugins
            .iter()
            .filter_map(|plugin| match plugin {
                PluginDirective::DocumentTemplate(doc) => Some(doc),
                _ => None,
            })
            .collect();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].chunks, ["vendor", "base", "pages/a"]);

        // One extraction directive per declared chunk, declaration order.
        let commons: Vec<_> = draft
            .plugins
            .iter()
            .filter_map(|plugin| match plugin {
                PluginDirective::CommonsChunk { name, chunks } => Some((name.as_str(), chunks)),
                _ => None,
            })
            .collect();
        assert_eq!(commons.len(), 2);
        assert_eq!(commons[0].0, "vendor");
        assert_eq!(commons[0].1, &vec!["pages/a".to_string(), "pages/b".to_string()]);
    }

    #[test]
    fn development_entries_carry_bootstrap_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let mut declaration = declaration_with_chunks();
        declaration.outputs.insert("index.html".to_string(), None);
        declaration.port = 9000;

        let workspace = Workspace::new(dir.path());
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Development);
        let draft = composer.compose().unwrap();

        assert_eq!(
            draft.entry["index"].modules().unwrap(),
            [
                "webpack-dev-server/client?http://localhost:9000",
                "webpack/hot/dev-server",
                "./index",
            ]
        );
    }

    #[test]
    fn skeleton_search_roots_are_project_then_framework_then_global() {
        let declaration = declaration_with_chunks();
        let workspace = Workspace::new("/project")
            .framework_root("/opt/packplan")
            .global_root("/usr/local/lib");
        let composer = ConfigComposer::new(&declaration, &workspace, Mode::Production);
        let draft = composer.compose().unwrap();

        assert_eq!(
            draft.resolve.modules,
            vec![
                PathBuf::from("/project/node_modules"),
                PathBuf::from("/opt/packplan/node_modules"),
                PathBuf::from("/usr/local/lib/node_modules"),
            ]
        );
        assert_eq!(draft.resolve.modules, draft.resolve_loader.modules);
        assert_eq!(draft.output.path, PathBuf::from("/project/dist"));
    }
}
