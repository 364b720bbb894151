use colored::Colorize;
use std::io::{self, Write};

/// Writes one fully rendered block. Nothing is written on render failure,
/// so callers never produce partial output.
pub fn write_rendered<W: Write + ?Sized>(out: &mut W, rendered: &str) -> io::Result<()> {
    out.write_all(rendered.as_bytes())?;
    out.flush()
}

/// Side-channel status line, kept off stdout.
pub fn print_notice(message: &str) {
    eprintln!("{}", message.cyan());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
