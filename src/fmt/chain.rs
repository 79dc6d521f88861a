//! Rendering of the `throwable` attached to a log call.

use std::error::Error;
use std::fmt::Write;

/// The error on the first line, then one `Caused by:` line per link in its `source()` chain.
#[must_use]
pub fn render_chain(error: &dyn Error) -> String {
    let mut out = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        let _ = write!(out, "\nCaused by: {err}");
        cause = err.source();
    }
    out
}
