//! `packplan check` - validate that the declaration composes.

use anyhow::Context;
use packplan_compose::{compose, IfAddrHost};

use crate::cli::CheckArgs;
use crate::loading;

pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let root = super::project_root(args.root)?;
    let declaration = loading::load(&root, args.config.as_deref())?;

    tracing::info!(
        outputs = declaration.outputs.len(),
        common_chunks = declaration.common_chunks.len(),
        globals = declaration.globals.len(),
        "declaration loaded"
    );

    let workspace = super::workspace_for(&root);
    let draft = compose(&declaration, &workspace, args.mode, &IfAddrHost)
        .context("declaration does not compose")?;

    println!(
        "ok: {} entries, {} plugins ({} mode)",
        draft.entry.len(),
        draft.plugins.len(),
        args.mode
    );
    Ok(())
}
