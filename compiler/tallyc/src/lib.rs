//! Tally driver.
//!
//! The read-eval-print loop over lines, tracing setup, and error rendering.
//! The loop is generic over its reader and writer so it can be driven from
//! stdin/stdout by the binary and from memory by tests.
//!
//! # Session rules
//!
//! - One interpreter per session; variables persist across lines.
//! - Input ends at end of stream or at the first empty line. A line holding
//!   only `\r` is not empty: it prints nothing and the session goes on.
//! - Each root expression prints one decimal line, in source order.
//! - The first error ends the session. Output already written stays.

use std::io::{self, BufRead, Write};
use std::sync::Once;

use tally_eval::{InterpretError, Interpreter};
use tally_ir::Limits;
use thiserror::Error;
use tracing::debug;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=tally_eval=debug` or `RUST_LOG=trace`. Logs go
/// to stderr so they never mix with results.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("line {line}: {source}")]
    Interpret {
        /// 1-based line number.
        line: usize,
        /// The offending line, for rendering.
        text: String,
        #[source]
        source: InterpretError,
    },
}

impl DriverError {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            DriverError::Read(_) => "E9101",
            DriverError::Write(_) => "E9102",
            DriverError::Interpret { source, .. } => source.code(),
        }
    }
}

/// What a completed session did.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Lines interpreted (the terminating blank line is not counted).
    pub lines: usize,
    /// Result lines written.
    pub results: usize,
    /// Durable slots released at shutdown.
    pub released: usize,
}

/// Run a session: interpret every line of `input`, writing results to `output`.
///
/// Only the `\n` terminator is stripped from each line; a `\r` stays in the
/// text and ends scanning there.
pub fn run<R, W>(mut input: R, mut output: W, limits: Limits) -> Result<Summary, DriverError>
where
    R: BufRead,
    W: Write,
{
    let mut interp = Interpreter::new(limits);
    let mut summary = Summary::default();
    let mut buf = String::new();
    let mut number = 0;

    loop {
        buf.clear();
        if input.read_line(&mut buf).map_err(DriverError::Read)? == 0 {
            break;
        }
        number += 1;

        let line = buf.strip_suffix('\n').unwrap_or(&buf);
        if line.is_empty() {
            debug!(line = number, "blank line ends input");
            break;
        }

        let values = match interp.run_line(line) {
            Ok(values) => values,
            Err(source) => {
                return Err(DriverError::Interpret {
                    line: number,
                    text: line.to_owned(),
                    source,
                })
            }
        };

        for value in &values {
            writeln!(output, "{value}").map_err(DriverError::Write)?;
        }
        output.flush().map_err(DriverError::Write)?;

        summary.lines += 1;
        summary.results += values.len();
    }

    summary.released = interp.shutdown();
    debug!(?summary, "session finished");
    Ok(summary)
}

/// Render an error for the terminal.
///
/// ```text
/// error[E1005]: line 2: unclosed `(` at column 1
///   |
/// 2 | (+ 1 2
///   | ^
/// ```
pub fn render_error(err: &DriverError) -> String {
    let mut out = format!("error[{}]: {err}\n", err.code());

    if let DriverError::Interpret { line, text, source } = err {
        if let Some(span) = source.span() {
            // Scanning stops at `\r`, so nothing past it is ever underlined.
            let text = text.split('\r').next().unwrap_or_default();
            let gutter = line.to_string();
            let pad = " ".repeat(gutter.len());
            let start = (span.start as usize).min(text.len());
            let end = (span.end as usize).clamp(start, text.len());
            let column = text.get(..start).map_or(start, |s| s.chars().count());
            let width = text
                .get(start..end)
                .map_or(end - start, |s| s.chars().count())
                .max(1);

            out.push_str(&format!("{pad} |\n"));
            out.push_str(&format!("{gutter} | {text}\n"));
            out.push_str(&format!(
                "{pad} | {}{}\n",
                " ".repeat(column),
                "^".repeat(width)
            ));
        }
    }

    out
}
