//! LS-8 CLI: load and run programs for the LS-8 8-bit machine.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage error or malformed program
//! - 2: Program file not found or unreadable
//! - 3: Runtime error

mod commands;

use std::io::IsTerminal;
use std::process;

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    init_tracing(args.iter().any(|a| a == "--trace"));

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other if other.starts_with('-') => {
            eprintln!("error: unknown option '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
        // `ls8 <program>` is shorthand for `ls8 run <program>`.
        _ => commands::run(&args[1..]),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Install a stderr subscriber.
///
/// `--trace` enables per-instruction trace lines from the VM; otherwise
/// the filter comes from `RUST_LOG` and defaults to `warn`.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("ls8_vm=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let fmt_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: cannot install logger: {e}");
    }
}

fn print_usage() {
    eprintln!("Usage: ls8 <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <program.ls8> [--trace]     Load and execute a program");
    eprintln!("  disassemble <program.ls8>       Print an annotated listing");
    eprintln!("  <program.ls8>                   Same as run");
}
