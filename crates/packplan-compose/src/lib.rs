//! Configuration composition for the packplan bundler front end.
//!
//! One invocation turns a [`ProjectDeclaration`] into a complete
//! bundler configuration: output patterns expand to page entries, the
//! common-chunk membership graph decides what each page's document
//! injects, entry declarations are recursively normalized, and in
//! development mode the result is adapted for hot serving. Data flows
//! one direction and every run builds a fresh draft; nothing is
//! cached across invocations.
//!
//! # Example
//!
//! ```no_run
//! use packplan_compose::{compose, IfAddrHost, Workspace};
//! use packplan_config::{discover, Mode};
//!
//! let declaration = discover(".").unwrap();
//! let workspace = Workspace::new(".");
//! let draft = compose(&declaration, &workspace, Mode::Production, &IfAddrHost).unwrap();
//! println!("{}", serde_json::to_string_pretty(&draft).unwrap());
//! ```

pub mod chunks;
pub mod compose;
pub mod dev;
pub mod draft;
pub mod entry;
pub mod error;
pub mod pages;

pub use chunks::{CommonChunkGraph, CommonChunkGraphBuilder};
pub use compose::{ConfigComposer, Workspace};
pub use dev::{DevServerAdapter, HostAddress, IfAddrHost};
pub use draft::{ConfigurationDraft, DocumentTemplate, PluginDirective, ResolvedEntry};
pub use entry::EntryResolver;
pub use error::{ComposeError, Result};
pub use pages::{OutputPageExpander, PageEntry};

use packplan_config::{Mode, ProjectDeclaration};

/// Compose the full bundler configuration for one build.
///
/// Runs the composer and, in development mode, the dev-server
/// adapter. `host` is only consulted in development mode.
pub fn compose(
    declaration: &ProjectDeclaration,
    workspace: &Workspace,
    mode: Mode,
    host: &dyn HostAddress,
) -> Result<ConfigurationDraft> {
    let mut draft = ConfigComposer::new(declaration, workspace, mode).compose()?;

    if mode.is_dev() {
        DevServerAdapter::new(host, declaration.port).apply(&mut draft);
    }

    tracing::info!(
        mode = %mode,
        entries = draft.entry.len(),
        plugins = draft.plugins.len(),
        "composed bundler configuration"
    );
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use packplan_config::EntryDeclaration;
    use std::net::Ipv4Addr;

    struct NoHost;

    impl HostAddress for NoHost {
        fn resolve(&self) -> Option<Ipv4Addr> {
            None
        }
    }

    fn declaration() -> ProjectDeclaration {
        ProjectDeclaration {
            common_chunks: IndexMap::from([(
                "vendor".to_string(),
                EntryDeclaration::from("./src/vendor.js"),
            )]),
            ..ProjectDeclaration::default()
        }
    }

    #[test]
    fn production_compose_keeps_declared_public_path() {
        let workspace = Workspace::new("/project");
        let draft =
            compose(&declaration(), &workspace, Mode::Production, &NoHost).unwrap();
        assert_eq!(draft.output.public_path, "/");
        assert!(!draft.plugins.contains(&PluginDirective::HotModuleReplacement));
    }

    #[test]
    fn development_compose_applies_the_adapter() {
        let workspace = Workspace::new("/project");
        let draft =
            compose(&declaration(), &workspace, Mode::Development, &NoHost).unwrap();
        assert_eq!(draft.output.public_path, "http://localhost:8080/");
        assert!(draft.plugins.contains(&PluginDirective::HotModuleReplacement));
    }
}
