//! Fuzz target for the operator line parser
//!
//! # Invariants
//!
//! - NEVER panic on any input line
//! - A parsed seat coordinate, typed back one-based, parses to the same seat

#![no_main]

use carrel_cli::{Input, parse_line};
use carrel_core::Command;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|line: &str| {
    let Ok(Input::Command(Command::Reserve { coord, .. } | Command::Cancel { coord })) =
        parse_line(line)
    else {
        return;
    };

    let retyped =
        format!("cancel {} {} {} {}", coord.floor + 1, coord.row + 1, coord.col + 1, coord.day + 1);
    assert_eq!(parse_line(&retyped), Ok(Input::Command(Command::Cancel { coord })));
});
