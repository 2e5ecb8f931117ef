//! Output-page expansion.
//!
//! Each declared output pattern is matched against the filesystem;
//! every matched template file becomes one output page with a
//! generated document directive.

use std::path::Path;

use glob::glob;
use indexmap::IndexMap;
use packplan_config::{Mode, OutputSpec};

use crate::draft::{DocumentTemplate, MinifyOptions};
use crate::error::{ComposeError, Result};

/// Template suffixes stripped to derive a page identifier.
const TEMPLATE_SUFFIXES: [&str; 2] = [".html", ".htm"];

/// One output page discovered from an output glob pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    /// Entry identifier the generated script bundle is keyed under:
    /// the stripped path, or the declared override.
    pub name: String,
    /// Matched path with the template suffix stripped. Always the
    /// page's own chunk, even when `name` is overridden.
    pub id: String,
    /// Matched template path, relative to the project root.
    pub template: String,
    /// Common chunks explicitly requested for this page.
    pub commons: Option<Vec<String>>,
    /// Injected-chunk list, filled by the chunk graph builder.
    pub chunks: Vec<String>,
}

impl PageEntry {
    /// Module specifier the page's script entry points at.
    pub fn entry_module(&self) -> String {
        format!("./{}", self.name)
    }

    /// Document-generation directive for this page.
    ///
    /// Production builds inject chunks sorted by dependency order and
    /// minify the generated markup; development builds render the
    /// template untouched.
    pub fn document_directive(&self, mode: Mode) -> DocumentTemplate {
        let mut directive = DocumentTemplate {
            template: format!("./{}", self.template),
            filename: self.template.clone(),
            chunks: self.chunks.clone(),
            inject: None,
            minify: None,
            chunks_sort_mode: None,
        };

        if !mode.is_dev() {
            directive.inject = Some(true);
            directive.minify = Some(MinifyOptions {
                remove_comments: true,
                collapse_whitespace: true,
                remove_attribute_quotes: true,
            });
            directive.chunks_sort_mode = Some("dependency".to_string());
        }

        directive
    }
}

/// Expands declared output patterns into concrete page entries.
pub struct OutputPageExpander<'a> {
    root: &'a Path,
}

impl<'a> OutputPageExpander<'a> {
    /// `root` is the directory output patterns are relative to.
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Match every declared pattern and collect one page per matched
    /// regular file. A pattern with no matches yields no pages and is
    /// not an error.
    pub fn expand(
        &self,
        outputs: &IndexMap<String, Option<OutputSpec>>,
    ) -> Result<Vec<PageEntry>> {
        let mut pages = Vec::new();

        for (pattern, spec) in outputs {
            let absolute = self.root.join(pattern);
            let matches = glob(&absolute.to_string_lossy()).map_err(|source| {
                ComposeError::BadPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?;

            let mut matched = 0usize;
            for path in matches {
                let path = path?;
                if !path.is_file() {
                    continue;
                }
                matched += 1;

                let template = path
                    .strip_prefix(self.root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .into_owned();
                let id = strip_template_suffix(&template);
                let name = spec
                    .as_ref()
                    .and_then(|s| s.script_name.clone())
                    .unwrap_or_else(|| id.clone());

                pages.push(PageEntry {
                    name,
                    id,
                    template,
                    commons: spec.as_ref().and_then(|s| s.commons.clone()),
                    chunks: Vec::new(),
                });
            }

            tracing::debug!(pattern, matched, "expanded output pattern");
        }

        Ok(pages)
    }
}

fn strip_template_suffix(path: &str) -> String {
    for suffix in TEMPLATE_SUFFIXES {
        if let Some(stripped) = path.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    path.to_string()
}
