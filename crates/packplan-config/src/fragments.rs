//! Opaque configuration fragments supplied by external collaborators.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Loader and transpiler fragments the composer merges verbatim.
///
/// These are built elsewhere (style loader-list construction,
/// transpiler option assembly) and are carried as opaque JSON so the
/// composer never needs to understand their contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderFragments {
    /// Style loader rules, appended to the module-rule list as-is.
    #[serde(default)]
    pub style_rules: Vec<Value>,

    /// Per-language css loader table for the component loader rule.
    #[serde(default)]
    pub css_loaders: Value,

    /// Transpiler options, used by the script rule and the
    /// loader-options plugin.
    #[serde(default)]
    pub babel: Value,
}
