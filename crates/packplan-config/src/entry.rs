//! Entry declaration shapes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw entry declaration as it appears in the project file.
///
/// Declarations come in three shapes: a single module specifier, an
/// ordered sequence of specifiers bundled into one entry, or a map of
/// named entries whose values are themselves declarations. Maps nest
/// to arbitrary depth, though in practice one level is typical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryDeclaration {
    Module(String),
    Modules(Vec<String>),
    Named(IndexMap<String, EntryDeclaration>),
}

impl EntryDeclaration {
    /// True for declarations that cannot yield a usable entry.
    pub fn is_empty(&self) -> bool {
        match self {
            EntryDeclaration::Module(path) => path.is_empty(),
            EntryDeclaration::Modules(paths) => paths.is_empty(),
            EntryDeclaration::Named(named) => named.is_empty(),
        }
    }
}

impl From<&str> for EntryDeclaration {
    fn from(path: &str) -> Self {
        EntryDeclaration::Module(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_deserializes_to_module() {
        let decl: EntryDeclaration = serde_json::from_value(json!("./src/index.js")).unwrap();
        assert_eq!(decl, EntryDeclaration::Module("./src/index.js".into()));
    }

    #[test]
    fn sequence_deserializes_to_modules() {
        let decl: EntryDeclaration =
            serde_json::from_value(json!(["./a.js", "./b.js"])).unwrap();
        assert_eq!(
            decl,
            EntryDeclaration::Modules(vec!["./a.js".into(), "./b.js".into()])
        );
    }

    #[test]
    fn map_deserializes_to_named_and_nests() {
        let decl: EntryDeclaration = serde_json::from_value(json!({
            "app": "./src/app.js",
            "admin": { "panel": ["./src/admin.js"] }
        }))
        .unwrap();

        let EntryDeclaration::Named(named) = decl else {
            panic!("expected named declaration");
        };
        assert_eq!(
            named.get("app"),
            Some(&EntryDeclaration::Module("./src/app.js".into()))
        );
        let EntryDeclaration::Named(nested) = named.get("admin").unwrap() else {
            panic!("expected nested map");
        };
        assert_eq!(
            nested.get("panel"),
            Some(&EntryDeclaration::Modules(vec!["./src/admin.js".into()]))
        );
    }

    #[test]
    fn named_keys_keep_declaration_order() {
        let decl: EntryDeclaration = serde_json::from_value(json!({
            "vendor": "./vendor.js",
            "base": "./base.js",
            "app": "./app.js"
        }))
        .unwrap();

        let EntryDeclaration::Named(named) = decl else {
            panic!("expected named declaration");
        };
        let keys: Vec<_> = named.keys().cloned().collect();
        assert_eq!(keys, vec!["vendor", "base", "app"]);
    }

    #[test]
    fn emptiness_per_shape() {
        assert!(EntryDeclaration::Module(String::new()).is_empty());
        assert!(EntryDeclaration::Modules(vec![]).is_empty());
        assert!(EntryDeclaration::Named(IndexMap::new()).is_empty());
        assert!(!EntryDeclaration::from("./app.js").is_empty());
    }
}
