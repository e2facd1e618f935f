//! Coding challenges: depth-first tree-to-markup rendering and
//! original-aware substring removal.
//!
//! - [`domain`]: nodes, rendering, substring removal (pure, no I/O)
//! - [`application`]: tree files and the built-in sample suite
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
