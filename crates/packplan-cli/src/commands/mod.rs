//! Command implementations.

pub mod check;
pub mod print;

use std::path::{Path, PathBuf};

use packplan_compose::Workspace;

pub use check::execute as check_execute;
pub use print::execute as print_execute;

/// Project directory a command operates on.
fn project_root(root: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => Ok(std::env::current_dir()?),
    }
}

/// Workspace roots for a project directory. The framework root is
/// derived from the installed binary's location when available.
fn workspace_for(root: &Path) -> Workspace {
    let mut workspace = Workspace::new(root);
    if let Ok(exe) = std::env::current_exe() {
        if let Some(install) = exe.parent().and_then(Path::parent) {
            workspace = workspace.framework_root(install);
        }
    }
    workspace
}
