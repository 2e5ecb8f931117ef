//! packplan CLI.
//!
//! Thin command-line front end over `packplan-compose`: discovers the
//! project declaration, layers overrides on top of it, composes the
//! bundler configuration, and emits it as JSON.

pub mod cli;
pub mod commands;
pub mod loading;
pub mod logger;
