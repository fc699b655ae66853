use std::io::{self, BufRead, Write};

use crate::{
    error::ParseErrors,
    interpreter::{
        evaluator::core::Evaluator,
        lexer::Lexer,
        parser::core::Parser,
        value::environment::Environment,
    },
};

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

/// Runs the read-eval-print loop until `input` is exhausted.
///
/// Each line is parsed and evaluated on its own, but bindings persist: the
/// whole session shares one environment. Parse errors are reported under
/// the obligatory monkey face and the offending line is skipped.
///
/// # Errors
/// Returns any [`io::Error`] raised while reading input or writing output.
pub fn start(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
    let env = Environment::new();
    let evaluator = Evaluator::new();
    let mut line = String::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            write!(output, "{MONKEY_FACE}")?;
            writeln!(output, "Woops! We ran into some monkey business here!")?;
            writeln!(output, "{}", ParseErrors(parser.errors().to_vec()))?;
            continue;
        }

        match evaluator.eval_program(&program, &env) {
            Ok(value) => writeln!(output, "{value}")?,
            Err(error) => writeln!(output, "Error: {error}")?,
        }
    }
}
