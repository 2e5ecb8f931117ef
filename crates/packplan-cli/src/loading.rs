//! Declaration loading with layered overrides.
//!
//! Priority: environment variables > declaration file > defaults.
//! The file itself is found by `packplan-config`'s discovery; figment
//! supplies the layering.

use std::ffi::OsStr;
use std::path::Path;

use anyhow::Context;
use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use packplan_config::{DeclarationDiscovery, ProjectDeclaration};

/// Load the project declaration for `root`.
///
/// `config_path` bypasses discovery when given. Environment variables
/// prefixed `PACKPLAN_` override top-level declaration fields, e.g.
/// `PACKPLAN_PORT=3000`.
pub fn load(root: &Path, config_path: Option<&Path>) -> anyhow::Result<ProjectDeclaration> {
    let discovery = DeclarationDiscovery::new(root);

    let mut figment =
        Figment::new().merge(Serialized::defaults(ProjectDeclaration::default()));

    let file = config_path
        .map(Path::to_path_buf)
        .or_else(|| discovery.find());

    if let Some(path) = file {
        // package.json declarations need the field extracted first;
        // TOML files layer directly.
        if path.file_name() == Some(OsStr::new("package.json")) {
            let declared = discovery
                .load_from(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            figment = figment.merge(Serialized::defaults(declared));
        } else {
            figment = figment.merge(Toml::file(path));
        }
    } else {
        tracing::debug!(root = %root.display(), "no declaration file; using defaults");
    }

    figment = figment.merge(Env::prefixed("PACKPLAN_"));

    figment
        .extract()
        .context("invalid project declaration")
}
