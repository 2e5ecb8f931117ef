//! Common-chunk graph construction.
//!
//! Chunk dependencies are exactly two tiers: pages depend on common
//! chunks, and common chunks depend on nothing. The builder produces
//! the membership map (chunk name -> pages that include it) and each
//! page's own injected-chunk list.

use indexmap::IndexMap;
use packplan_config::EntryDeclaration;

use crate::draft::PluginDirective;
use crate::pages::PageEntry;

/// Membership map: common-chunk name -> pages that include it, in
/// page discovery order.
///
/// Every declared chunk name is seeded with an empty member list
/// before any page is processed, so lookups during recording can
/// never miss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonChunkGraph {
    members: IndexMap<String, Vec<String>>,
}

impl CommonChunkGraph {
    pub fn seeded<'a>(declared: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            members: declared
                .into_iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    fn record(&mut self, chunk: &str, page: &str) {
        // Seeding guarantees the key exists for declared chunks; a
        // page naming an undeclared chunk still gets a slot rather
        // than a panic.
        self.members
            .entry(chunk.to_string())
            .or_default()
            .push(page.to_string());
    }

    /// Pages that include the named chunk.
    pub fn members(&self, chunk: &str) -> &[String] {
        self.members.get(chunk).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.members
            .iter()
            .map(|(name, pages)| (name.as_str(), pages.as_slice()))
    }
}

/// Builds the chunk membership graph and per-page dependency lists.
pub struct CommonChunkGraphBuilder<'a> {
    declared: &'a IndexMap<String, EntryDeclaration>,
}

impl<'a> CommonChunkGraphBuilder<'a> {
    pub fn new(declared: &'a IndexMap<String, EntryDeclaration>) -> Self {
        Self { declared }
    }

    /// Process every page once.
    ///
    /// A page that names its common chunks joins exactly those; its
    /// dependency list is those names in the declared order, then its
    /// own chunk. A page that names none joins every declared chunk
    /// in declaration order. Returns the membership graph; each
    /// page's `chunks` list is filled in place.
    pub fn build(&self, pages: &mut [PageEntry]) -> CommonChunkGraph {
        let mut graph =
            CommonChunkGraph::seeded(self.declared.keys().map(String::as_str));

        for page in pages.iter_mut() {
            let mut depends = Vec::new();

            match &page.commons {
                Some(commons) => {
                    for chunk in commons {
                        depends.push(chunk.clone());
                        graph.record(chunk, &page.name);
                    }
                }
                None => {
                    for chunk in self.declared.keys() {
                        depends.push(chunk.clone());
                        graph.record(chunk, &page.name);
                    }
                }
            }

            // The page's own chunk always comes last.
            depends.push(page.id.clone());
            page.chunks = depends;
        }

        graph
    }

    /// Extraction directives, one per declared chunk, in declaration
    /// order. A chunk meant to be more widely shared is declared
    /// first and therefore extracted first.
    pub fn directives(&self, graph: &CommonChunkGraph) -> Vec<PluginDirective> {
        self.declared
            .keys()
            .map(|name| PluginDirective::CommonsChunk {
                name: name.clone(),
                chunks: graph.members(name).to_vec(),
            })
            .collect()
    }
}
