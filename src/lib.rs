//! acctree: account hierarchy editor core
//!
//! Layers, innermost first:
//! - `domain`: tree store, subtree cloner, clipboard (no I/O)
//! - `application`: command dispatcher and editor session
//! - `infrastructure`: file loading behind I/O traits
//! - `cli`: argument parsing, editor scripts, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
