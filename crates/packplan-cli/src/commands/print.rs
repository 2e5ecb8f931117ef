//! `packplan print` - compose and emit the bundler configuration.

use std::fs;

use anyhow::Context;
use packplan_compose::{compose, IfAddrHost};

use crate::cli::PrintArgs;
use crate::loading;

pub fn execute(args: PrintArgs) -> anyhow::Result<()> {
    let root = super::project_root(args.root)?;
    let declaration = loading::load(&root, args.config.as_deref())?;
    let workspace = super::workspace_for(&root);

    let draft = compose(&declaration, &workspace, args.mode, &IfAddrHost)?;

    let json = if args.compact {
        serde_json::to_string(&draft)?
    } else {
        serde_json::to_string_pretty(&draft)?
    };

    match args.out {
        Some(path) => {
            fs::write(&path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "configuration written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
