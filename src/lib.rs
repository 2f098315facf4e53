//! Chatmark renders chat messages written in a small markdown dialect.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns messages, render settings, the on-disk settings file and
//!   error types.
//! - [`ui`] tokenizes and formats message text into styled documents, keeps
//!   each message's code blocks addressable by id, recolors documents on theme
//!   or font changes, and positions code block widgets over the text surface.
//! - [`utils`] carries process-wide plumbing such as tracing setup.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
