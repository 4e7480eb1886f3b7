//! # Logging Module
//!
//! Output plumbing for relay-headers:
//! - a global output mode (normal, quiet, verbose)
//! - color handling through owo-colors
//! - the tracing subscriber used for diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the per-file
//! confirmation lines can be piped without diagnostics mixed in.
//!
//! ## Example
//!
//! ```rust
//! use relay_headers::logging::{ColorMode, set_verbose};
//! use relay_headers::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Scanning: {}", "Sources/");
//! info_log!("Updated: {}", "Sources/Core/Clock.swift");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info line, highlighted when the terminal supports it.
///
/// Used by [`info_log!`]; call the macro instead so quiet mode is honored.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
