//! Operator line parser.
//!
//! Turns one input line into a [`carrel_core::Command`]. Operators type
//! one-based floors, rows, columns and days; they are converted to the
//! zero-based indices the core uses. Range checks against the current layout
//! are left to the core, which knows the floor bounds.

use carrel_core::{Command, SeatCoord};
use thiserror::Error;

/// Usage line for every command, in the order `help` prints them.
pub const USAGE: &[(&str, &str)] = &[
    ("login <name>", "log in as Admin or a single letter A-Z"),
    ("logout | exit", "log out"),
    ("view <floor> <day>", "show a floor on a day"),
    ("reserve <floor> <row> <col> <day> [letter]", "reserve a seat"),
    ("cancel <floor> <row> <col> <day>", "cancel a reservation"),
    ("list", "list every reservation (admin)"),
    ("clear", "remove all reservations and reset layouts (admin)"),
    ("cancel-day <day>", "cancel every reservation on a day (admin)"),
    ("cancel-floor <floor>", "cancel every reservation on a floor (admin)"),
    ("resize <floor> <rows> <cols>", "change a floor's layout (admin)"),
    ("help", "show this list"),
    ("quit", "save and exit"),
];

/// Parsed operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Nothing,
    /// Print the command list.
    Help,
    /// Command for the library.
    Command(Command),
}

/// Line could not be turned into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First word is not a command.
    #[error("unknown command {0:?}; type `help` for the list")]
    UnknownCommand(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Argument is not a positive whole number.
    #[error("invalid {field}: {value:?} is not a number from 1 up")]
    InvalidNumber {
        /// Which argument
        field: &'static str,
        /// Text as typed
        value: String,
    },

    /// Reservation target is not a single character.
    #[error("invalid user letter {0:?}")]
    InvalidLetter(String),
}

/// Parse one line of operator input.
pub fn parse_line(line: &str) -> Result<Input, ParseError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(Input::Nothing);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Input::Help),
        "login" => match args {
            [user] => Command::Login { name: (*user).to_string() },
            _ => return Err(usage("login")),
        },
        "logout" | "exit" => {
            expect_none(args, "logout | exit")?;
            Command::Logout
        },
        "view" => match args {
            [floor, day] => Command::View { floor: index("floor", floor)?, day: index("day", day)? },
            _ => return Err(usage("view")),
        },
        "reserve" => match args {
            [f, r, c, d] => Command::Reserve { coord: coord(f, r, c, d)?, target: None },
            [f, r, c, d, letter] => {
                Command::Reserve { coord: coord(f, r, c, d)?, target: Some(single_char(letter)?) }
            },
            _ => return Err(usage("reserve")),
        },
        "cancel" => match args {
            [f, r, c, d] => Command::Cancel { coord: coord(f, r, c, d)? },
            _ => return Err(usage("cancel")),
        },
        "list" => {
            expect_none(args, "list")?;
            Command::ListAll
        },
        "clear" => {
            expect_none(args, "clear")?;
            Command::Clear
        },
        "cancel-day" => match args {
            [day] => Command::CancelDay { day: index("day", day)? },
            _ => return Err(usage("cancel-day")),
        },
        "cancel-floor" => match args {
            [floor] => Command::CancelFloor { floor: index("floor", floor)? },
            _ => return Err(usage("cancel-floor")),
        },
        "resize" => match args {
            [floor, rows, cols] => Command::ResizeFloor {
                floor: index("floor", floor)?,
                rows: count("rows", rows)?,
                cols: count("cols", cols)?,
            },
            _ => return Err(usage("resize")),
        },
        "quit" => {
            expect_none(args, "quit")?;
            Command::Quit
        },
        _ => return Err(ParseError::UnknownCommand(name.to_string())),
    };

    Ok(Input::Command(command))
}

fn usage(command: &str) -> ParseError {
    let line = USAGE
        .iter()
        .map(|(usage, _)| *usage)
        .find(|usage| usage.split_whitespace().next() == Some(command))
        .unwrap_or("help");
    ParseError::Usage(line)
}

fn expect_none(args: &[&str], line: &'static str) -> Result<(), ParseError> {
    if args.is_empty() { Ok(()) } else { Err(ParseError::Usage(line)) }
}

fn coord(floor: &str, row: &str, col: &str, day: &str) -> Result<SeatCoord, ParseError> {
    Ok(SeatCoord::new(
        index("floor", floor)?,
        index("row", row)?,
        index("col", col)?,
        index("day", day)?,
    ))
}

/// One-based position to zero-based index.
fn index(field: &'static str, value: &str) -> Result<usize, ParseError> {
    count(field, value)?
        .checked_sub(1)
        .ok_or_else(|| ParseError::InvalidNumber { field, value: value.to_string() })
}

/// Plain count, passed through unchanged.
fn count(field: &'static str, value: &str) -> Result<usize, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber { field, value: value.to_string() })
}

fn single_char(value: &str) -> Result<char, ParseError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::InvalidLetter(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line) {
            Ok(Input::Command(command)) => command,
            other => panic!("{line:?} parsed to {other:?}"),
        }
    }

    #[test]
    fn numbers_become_zero_based() {
        assert_eq!(
            command("reserve 1 2 3 7 b"),
            Command::Reserve { coord: SeatCoord::new(0, 1, 2, 6), target: Some('b') }
        );
        assert_eq!(command("view 5 1"), Command::View { floor: 4, day: 0 });
        assert_eq!(command("cancel-day 3"), Command::CancelDay { day: 2 });
    }

    #[test]
    fn resize_dimensions_stay_counts() {
        assert_eq!(command("resize 2 3 1"), Command::ResizeFloor { floor: 1, rows: 3, cols: 1 });
        // Zero rows is the core's call to reject.
        assert_eq!(command("resize 2 0 1"), Command::ResizeFloor { floor: 1, rows: 0, cols: 1 });
    }

    #[test]
    fn keywords_ignore_case_and_spacing() {
        assert_eq!(command("  Login   Admin "), Command::Login { name: "Admin".into() });
        assert_eq!(command("EXIT"), Command::Logout);
        assert_eq!(command("Quit"), Command::Quit);
        assert_eq!(parse_line("   "), Ok(Input::Nothing));
        assert_eq!(parse_line("help"), Ok(Input::Help));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_eq!(
            parse_line("view 0 1"),
            Err(ParseError::InvalidNumber { field: "floor", value: "0".into() })
        );
        assert_eq!(
            parse_line("cancel 1 x 1 1"),
            Err(ParseError::InvalidNumber { field: "row", value: "x".into() })
        );
        assert_eq!(
            parse_line("resize 1 -2 2"),
            Err(ParseError::InvalidNumber { field: "rows", value: "-2".into() })
        );
    }

    #[test]
    fn arity_errors_show_usage() {
        assert_eq!(
            parse_line("reserve 1 1"),
            Err(ParseError::Usage("reserve <floor> <row> <col> <day> [letter]"))
        );
        assert_eq!(parse_line("list all"), Err(ParseError::Usage("list")));
        assert_eq!(parse_line("login"), Err(ParseError::Usage("login <name>")));
    }

    #[test]
    fn target_must_be_one_character() {
        assert_eq!(parse_line("reserve 1 1 1 1 AB"), Err(ParseError::InvalidLetter("AB".into())));
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(parse_line("book 1"), Err(ParseError::UnknownCommand("book".into())));
    }
}
