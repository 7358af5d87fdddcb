//! Diagnostic no-op command.
//!
//! Prints a fixed marker line so deploy scripts can verify that the CLI
//! binary starts and dispatches commands before pointing it at real data.

use std::io;

/// Marker line printed by `sk-cli check`.
pub const MARKER: &str = "Checking command.";

/// Print the marker line.
///
/// # Errors
///
/// Returns `io::Error` if the line cannot be written.
pub fn print_marker<W: io::Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{MARKER}")
}
