use std::{fs, io, path::PathBuf, process};

use clap::Parser;
use monkey::{error::RuntimeError, interpret, interpreter::value::environment::Environment, repl};

/// The Monkey programming language: floats, closures, classes and modules
/// on top of the classic interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run. The interactive REPL starts when omitted.
    script: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let Some(script) = args.script else {
        println!("Hello! This is the Monkey programming language!");
        println!("Feel free to type in commands");
        let stdin = io::stdin();
        if let Err(error) = repl::start(&mut stdin.lock(), &mut io::stdout()) {
            eprintln!("{error}");
            process::exit(1);
        }
        return;
    };

    let source = fs::read_to_string(&script).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                               script.display());
                     process::exit(1);
                 });

    let env = Environment::new();
    match interpret(&source, &env) {
        Ok(value) => println!("{value}"),
        Err(error) => {
            if let Some(runtime) = error.downcast_ref::<RuntimeError>() {
                eprintln!("Error: {runtime}");
            } else {
                eprintln!("{error}");
            }
            process::exit(1);
        },
    }
}
