//! Carrel operator console
//!
//! Line-oriented front end for [`carrel_core`]: parses operator input into
//! commands, runs them through a [`carrel_core::Runtime`] and renders the
//! results as text.

#![forbid(unsafe_code)]

pub mod commands;
pub mod render;
pub mod repl;

pub use commands::{Input, ParseError, parse_line};
pub use repl::{ReplConfig, ReplError, run};
