//! Declaration model for the packplan configuration composer.
//!
//! A project describes itself with a small declarative
//! [`ProjectDeclaration`]: output-page glob patterns, shared-chunk
//! groupings, global symbol injections, and opaque loader fragments.
//! This crate holds the data model and the file-based discovery of
//! that declaration; the composition logic lives in
//! `packplan-compose`.

pub mod declaration;
pub mod discovery;
pub mod entry;
pub mod error;
pub mod fragments;
pub mod mode;

// Re-export main types
pub use declaration::{OutputSpec, ProjectDeclaration};
pub use entry::EntryDeclaration;
pub use error::{ConfigError, Result};
pub use fragments::LoaderFragments;
pub use mode::Mode;

pub use discovery::{discover, DeclarationDiscovery};
