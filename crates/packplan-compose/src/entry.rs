//! Entry normalization.

use indexmap::IndexMap;
use packplan_config::{EntryDeclaration, Mode};

use crate::draft::ResolvedEntry;
use crate::error::{ComposeError, Result};

/// Hot-update runtime prepended to every entry in development mode,
/// right after the live-reload client.
pub const HOT_UPDATE_RUNTIME: &str = "webpack/hot/dev-server";

/// Normalizes raw entry declarations into the form the bundler
/// consumes, injecting development bootstrap entries where they
/// apply.
#[derive(Debug, Clone, Copy)]
pub struct EntryResolver {
    mode: Mode,
    port: u16,
}

impl EntryResolver {
    pub fn new(mode: Mode, port: u16) -> Self {
        Self { mode, port }
    }

    /// Live-reload client module, addressed to the configured port.
    pub fn reload_client(&self) -> String {
        format!(
            "webpack-dev-server/client?http://localhost:{}",
            self.port
        )
    }

    /// Recursively normalize one declaration.
    ///
    /// Scalars become single-element module lists and sequences stay
    /// as they are; in development mode the live-reload client and
    /// the hot-update runtime are prepended once per list, in that
    /// order. Named declarations recurse per value with keys
    /// preserved.
    ///
    /// # Errors
    ///
    /// An absent or empty declaration yields
    /// [`ComposeError::NoEntry`]; there is no usable partial result.
    pub fn resolve(&self, declaration: &EntryDeclaration) -> Result<ResolvedEntry> {
        if declaration.is_empty() {
            tracing::error!("no entry found");
            return Err(ComposeError::NoEntry);
        }

        match declaration {
            EntryDeclaration::Module(path) => {
                Ok(ResolvedEntry::Modules(self.bootstrap(vec![path.clone()])))
            }
            EntryDeclaration::Modules(paths) => {
                Ok(ResolvedEntry::Modules(self.bootstrap(paths.clone())))
            }
            EntryDeclaration::Named(named) => {
                let mut resolved = IndexMap::with_capacity(named.len());
                for (name, value) in named {
                    resolved.insert(name.clone(), self.resolve(value)?);
                }
                Ok(ResolvedEntry::Named(resolved))
            }
        }
    }

    /// Normalize a whole entry map, preserving insertion order.
    pub fn resolve_map(
        &self,
        entries: &IndexMap<String, EntryDeclaration>,
    ) -> Result<IndexMap<String, ResolvedEntry>> {
        if entries.is_empty() {
            tracing::error!("no entry found");
            return Err(ComposeError::NoEntry);
        }

        let mut resolved = IndexMap::with_capacity(entries.len());
        for (name, declaration) in entries {
            resolved.insert(name.clone(), self.resolve(declaration)?);
        }
        Ok(resolved)
    }

    fn bootstrap(&self, mut modules: Vec<String>) -> Vec<String> {
        if self.mode.is_dev() {
            modules.insert(0, HOT_UPDATE_RUNTIME.to_string());
            modules.insert(0, self.reload_client());
        }
        modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_resolver() -> EntryResolver {
        EntryResolver::new(Mode::Development, 8080)
    }

    fn prod_resolver() -> EntryResolver {
        EntryResolver::new(Mode::Production, 8080)
    }

    #[test]
    fn dev_scalar_gets_bootstrap_prefix() {
        let resolved = dev_resolver()
            .resolve(&EntryDeclaration::from("./app"))
            .unwrap();
        assert_eq!(
            resolved.modules().unwrap(),
            [
                "webpack-dev-server/client?http://localhost:8080",
                "webpack/hot/dev-server",
                "./app",
            ]
        );
    }

    #[test]
    fn dev_sequence_gets_prefix_once() {
        let declaration =
            EntryDeclaration::Modules(vec!["./a.js".into(), "./b.js".into()]);
        let resolved = dev_resolver().resolve(&declaration).unwrap();
        assert_eq!(
            resolved.modules().unwrap(),
            [
                "webpack-dev-server/client?http://localhost:8080",
                "webpack/hot/dev-server",
                "./a.js",
                "./b.js",
            ]
        );
    }

    #[test]
    fn production_never_injects_bootstrap_entries() {
        let declaration =
            EntryDeclaration::Modules(vec!["./a.js".into(), "./b.js".into()]);
        let resolved = prod_resolver().resolve(&declaration).unwrap();
        assert_eq!(resolved.modules().unwrap(), ["./a.js", "./b.js"]);

        let scalar = prod_resolver()
            .resolve(&EntryDeclaration::from("./app"))
            .unwrap();
        assert_eq!(scalar.modules().unwrap(), ["./app"]);
    }

    #[test]
    fn named_declarations_recurse_per_value() {
        let declaration: EntryDeclaration = serde_json::from_value(serde_json::json!({
            "app": "./src/app.js",
            "admin": ["./src/admin.js"]
        }))
        .unwrap();

        let resolved = dev_resolver().resolve(&declaration).unwrap();
        let ResolvedEntry::Named(named) = resolved else {
            panic!("expected named entry");
        };
        assert_eq!(
            named["app"].modules().unwrap(),
            [
                "webpack-dev-server/client?http://localhost:8080",
                "webpack/hot/dev-server",
                "./src/app.js",
            ]
        );
        assert_eq!(named["admin"].modules().unwrap().last().unwrap(), "./src/admin.js");
    }

    #[test]
    fn empty_declarations_are_an_error() {
        assert!(matches!(
            prod_resolver().resolve(&EntryDeclaration::Modules(vec![])),
            Err(ComposeError::NoEntry)
        ));
        assert!(matches!(
            prod_resolver().resolve_map(&IndexMap::new()),
            Err(ComposeError::NoEntry)
        ));
    }

    #[test]
    fn reload_client_uses_configured_port() {
        let resolver = EntryResolver::new(Mode::Development, 3000);
        assert_eq!(
            resolver.reload_client(),
            "webpack-dev-server/client?http://localhost:3000"
        );
    }
}
