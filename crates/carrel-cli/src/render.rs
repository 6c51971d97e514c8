//! Text rendering of responses and views.
//!
//! Everything writes to an `impl Write` so the REPL can target stdout and
//! tests can target a `Vec<u8>`.

use std::io::{self, Write};

use carrel_core::{
    CancelScope, FloorView, Identity, ListedReservation, ResizeReport, Response, SeatView,
};
use chrono::DateTime;

use crate::commands::USAGE;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Short weekday name of a zero-based day index.
pub fn day_name(day: usize) -> &'static str {
    DAY_NAMES.get(day).copied().unwrap_or("?")
}

/// Unix seconds as a UTC timestamp.
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(
        || format!("{secs} (out of range)"),
        |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

/// Write one command response.
pub fn write_response(out: &mut impl Write, response: &Response) -> io::Result<()> {
    match response {
        Response::LoggedIn(Identity::Admin) => writeln!(out, "Logged in as administrator."),
        Response::LoggedIn(Identity::User(letter)) => writeln!(out, "Logged in as user {letter}."),
        Response::LoggedOut(Some(identity)) => writeln!(out, "{identity} logged out."),
        Response::LoggedOut(None) => writeln!(out, "Nobody is logged in."),
        Response::FloorView(view) => write_view(out, view),
        Response::Reserved { coord, reservation } => {
            writeln!(out, "Reserved {coord} ({}) for {}.", day_name(coord.day), reservation.owner)
        },
        Response::Cancelled { coord, reservation } => writeln!(
            out,
            "Cancelled {}'s reservation of {coord} ({}).",
            reservation.owner,
            day_name(coord.day)
        ),
        Response::BulkCancelled { scope, count } => {
            let target = match scope {
                CancelScope::Day(day) => day_name(*day).to_string(),
                CancelScope::Floor(floor) => format!("floor {}", floor + 1),
            };
            writeln!(out, "Cancelled {} on {target}.", reservations(*count))
        },
        Response::Listing(listed) => write_listing(out, listed),
        Response::Cleared { removed } => {
            writeln!(out, "All data cleared ({} removed).", reservations(*removed))
        },
        Response::Resized(report) => write_resize(out, report),
    }
}

/// Floor grid with one-based row and column labels.
///
/// Administrators see owner letters; everybody else sees `0` (free),
/// `1` (taken) and, for their own seats, `2`.
pub fn write_view(out: &mut impl Write, view: &FloorView) -> io::Result<()> {
    writeln!(
        out,
        "=== Floor {} ({} rows x {} cols) - {} ===",
        view.floor + 1,
        view.bounds.rows(),
        view.bounds.cols(),
        day_name(view.day)
    )?;

    let header: Vec<String> = (1..=view.bounds.cols()).map(|col| col.to_string()).collect();
    writeln!(out, "    {}", header.join("   "))?;

    for (row, cells) in view.cells.iter().enumerate() {
        let line: Vec<String> = cells.iter().map(|&cell| cell_char(cell).to_string()).collect();
        writeln!(out, "{} | {}", row + 1, line.join("   "))?;
    }
    Ok(())
}

fn cell_char(cell: SeatView) -> char {
    match cell {
        SeatView::Empty => '0',
        SeatView::Reserved => '1',
        SeatView::Mine => '2',
        SeatView::Held { owner, .. } => owner.as_char(),
    }
}

/// Full reservation listing, one line per seat.
pub fn write_listing(out: &mut impl Write, listed: &[ListedReservation]) -> io::Result<()> {
    writeln!(out, "=== All reservations ===")?;
    if listed.is_empty() {
        return writeln!(out, "No reservations.");
    }
    for entry in listed {
        let coord = entry.coord;
        writeln!(
            out,
            "Floor {} {} ({},{}) - user {}, at {}",
            coord.floor + 1,
            day_name(coord.day),
            coord.row + 1,
            coord.col + 1,
            entry.reservation.owner,
            format_timestamp(entry.reservation.reserved_at)
        )?;
    }
    Ok(())
}

fn write_resize(out: &mut impl Write, report: &ResizeReport) -> io::Result<()> {
    write!(out, "Floor {} resized from {} to {}", report.floor + 1, report.previous, report.current)?;
    if report.cancelled > 0 {
        write!(out, "; cancelled {} outside the new layout", reservations(report.cancelled))?;
    }
    writeln!(out, ".")
}

/// Command list for `help`.
pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    let width = USAGE.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    for (usage, what) in USAGE {
        writeln!(out, "  {usage:<width$}  {what}")?;
    }
    Ok(())
}

fn reservations(count: usize) -> String {
    if count == 1 { "1 reservation".to_string() } else { format!("{count} reservations") }
}
