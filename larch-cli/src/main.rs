//! Larch CLI — read and execute a program file.
//!
//! Exit codes:
//! - 0: Success (or `exit` / `exit(0)` in the program)
//! - 1: Usage or input error
//! - 2: Read (parse) error
//! - 3: Runtime error
//! - n: The program executed `exit(n)`

use std::fs;
use std::io::{self, Write};
use std::process;

use larch_interp::Termination;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.len() == 1 && matches!(args[0].as_str(), "--help" | "-h" | "help") {
        print_usage();
        process::exit(0);
    }

    if args.len() != 1 {
        eprintln!("error: expected one program file, {} given", args.len());
        eprintln!();
        print_usage();
        process::exit(1);
    }

    let path = &args[0];
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            process::exit(1);
        }
    };

    let program = match larch_reader::read_program(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let result = larch_interp::run_program(&program, path, &mut out, &mut input);
    // `print` emits no implicit newline, so flush before the process ends.
    let _ = out.flush();

    match result {
        Ok(_) => {}
        Err(Termination::Exit(status)) => process::exit(status),
        Err(Termination::Fault(fault)) => {
            eprintln!("{fault}");
            process::exit(3);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: larch <program-file>");
    eprintln!();
    eprintln!("Executes a Larch instruction-tree program: a top-level");
    eprintln!("(...) or [...] sequence of (\"tag\", operand, ...) tuples.");
}
