use ariadne::Source;
use exprfold_compute::{reduce, reduce_with_steps, Step, StepCollector};
use exprfold_error::Error;
use exprfold_parser::tree::Expr;
use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, process};

/// What to print besides the result of each expression.
#[derive(Debug, Clone, Copy, Default)]
struct Options {
    /// Print the result as an indented tree.
    tree: bool,

    /// Print the parsed tree and the tree produced by each canonicalization step.
    steps: bool,
}

/// Prints each step as soon as it is produced.
struct PrintSteps;

impl StepCollector<Step> for PrintSteps {
    fn push(&mut self, step: Step) {
        println!("{}", step);
    }
}

/// Parses, canonicalizes and evaluates the given input string.
fn parse_eval(input: &str, options: Options) -> Result<Expr, Error> {
    if options.steps {
        reduce_with_steps(input, &mut PrintSteps)
    } else {
        reduce(input)
    }
}

/// Report the error to stderr, highlighting the given input.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type actually does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
fn report_to_stderr(err: &Error, input: &str) {
    if let Err(io_err) = err.build_report("input").eprint(("input", Source::from(input))) {
        eprintln!("{}", io_err);
    }
}

/// Strips the whitespace from one line of input, then parses and evaluates it, printing the
/// success or failure.
fn read_eval(line: &str, options: Options) {
    let input = line.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    if input.is_empty() {
        return;
    }
    debug!("input: {}", input);

    match parse_eval(&input, options) {
        Ok(res) => {
            println!("{}", res);
            if options.tree {
                print!("{}", res.tree());
            }
        },
        Err(err) => report_to_stderr(&err, &input),
    }
}

/// Evaluates every line of the given source.
fn execute(source: &str, options: Options) {
    for line in source.lines() {
        read_eval(line, options);
    }
}

fn main() {
    env_logger::init();

    let mut options = Options::default();
    let mut filename = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tree" => options.tree = true,
            "--steps" => options.steps = true,
            _ => filename = Some(arg),
        }
    }

    if let Some(filename) = filename {
        // run source file
        match fs::read_to_string(&filename) {
            Ok(input) => execute(&input, options),
            Err(err) => {
                eprintln!("{}: {}", filename, err);
                process::exit(1);
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            process::exit(1);
        }

        execute(&input, options);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, options: Options) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            read_eval(&input, options);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
