//! CLI command implementations.

use std::fs;
use std::io::{self, ErrorKind, Write};

use ls8_common::Program;
use ls8_vm::{Machine, RuntimeError};

/// Load and execute a program file.
pub fn run(args: &[String]) -> Result<(), i32> {
    let Some(input) = input_path(args, &["--trace"])? else {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: ls8 run <program.ls8> [--trace]");
        return Err(1);
    };

    let program = load(input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = ls8_vm::run(&program, &mut out);
    finish(result, &mut out)
}

/// Map the outcome of a run to an exit code, flushing whatever PRN wrote.
///
/// A runtime error or a failed flush exits with 3.
fn finish<W: Write>(result: Result<Machine, RuntimeError>, out: &mut W) -> Result<(), i32> {
    if let Err(e) = result {
        eprintln!("runtime error: {e}");
        return Err(3);
    }
    out.flush().map_err(|e| {
        eprintln!("error: cannot write output: {e}");
        3
    })
}

/// Print an annotated listing of a program file.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    let Some(input) = input_path(args, &[])? else {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: ls8 disassemble <program.ls8>");
        return Err(1);
    };

    let program = load(input)?;
    print!("{}", ls8_assembler::disassemble(&program));
    Ok(())
}

/// First positional argument, rejecting flags not in `allowed`.
fn input_path<'a>(args: &'a [String], allowed: &[&str]) -> Result<Option<&'a str>, i32> {
    let mut input = None;
    for arg in args {
        if arg.starts_with('-') {
            if !allowed.contains(&arg.as_str()) {
                eprintln!("error: unknown option '{arg}'");
                return Err(1);
            }
        } else if input.is_none() {
            input = Some(arg.as_str());
        } else {
            eprintln!("error: unexpected argument '{arg}'");
            return Err(1);
        }
    }
    Ok(input)
}

/// Read and parse a program file.
///
/// A missing or unreadable file exits with 2, malformed contents with 1.
fn load(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        match e.kind() {
            ErrorKind::NotFound => eprintln!("error: {path}: file not found"),
            _ => eprintln!("error: cannot read '{path}': {e}"),
        }
        2
    })?;

    ls8_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {path}: {e}");
        1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts writes but fails every flush.
    struct UnflushableWriter;

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn successful_run_exits_0() {
        let mut out = Vec::new();
        assert_eq!(finish(Ok(Machine::new()), &mut out), Ok(()));
    }

    #[test]
    fn failed_flush_after_successful_run_exits_3() {
        assert_eq!(finish(Ok(Machine::new()), &mut UnflushableWriter), Err(3));
    }

    #[test]
    fn runtime_error_exits_3() {
        let err = RuntimeError::StackOverflow { at: 3 };
        assert_eq!(finish(Err(err), &mut Vec::new()), Err(3));
    }
}
