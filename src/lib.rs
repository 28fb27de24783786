//! In-memory directory tree simulator.
//!
//! [`terminal::vfs::NamespaceTree`] holds the tree and its algorithms,
//! [`terminal::Terminal`] adds the current directory and the command set,
//! and [`repl`] drives a terminal from any line-oriented input.

pub mod cli;
pub mod config;
pub mod logging;
pub mod repl;
pub mod terminal;
