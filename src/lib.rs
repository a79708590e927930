//! startpage: bookmark tabs for a browser start page
//!
//! # Architecture
//!
//! - `domain`: the tab / folder / bookmark tree, path resolution and the
//!   drag-move engine (pure, no I/O)
//! - `application`: persistence of the tab config and the session store that
//!   runs commands against the tree
//! - `infrastructure`: key-value storage, id source, dependency wiring
//! - `cli`: argument parsing, command dispatch and terminal output
//! - `config`: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
