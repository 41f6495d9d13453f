//! Tally CLI
//!
//! Reads prefix expressions from stdin, one line at a time, and prints the
//! value of every top-level expression on its own line.

use std::io::{self, BufWriter};

use tally_ir::Limits;

fn main() {
    if std::env::args().len() > 1 {
        eprintln!("Usage: tally < input");
        eprintln!();
        eprintln!("Reads lines like `(= a (+ 3 4))` from stdin and prints one");
        eprintln!("result per top-level expression. Set RUST_LOG to trace.");
        std::process::exit(2);
    }

    tallyc::init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());

    if let Err(err) = tallyc::run(stdin.lock(), output, Limits::default()) {
        eprint!("{}", tallyc::render_error(&err));
        std::process::exit(1);
    }
}
