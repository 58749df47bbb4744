mod console;
mod highlighter;
mod lexer;

use std::io::{BufRead, BufReader, Stdout};
use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, ValidationResult, Validator, default_emacs_keybindings,
};
use seqlang::{Interpreter, InterpreterOptions, render_error};
use seqlang_core::parser;

use crate::console::Console;
use crate::highlighter::Highlighter;
use crate::lexer::{calculate_depth, join_continuations};

type Session = Interpreter<Console<Stdout>>;

/// SeqLang - arithmetic over lazy integer sequences
#[derive(Parser, Debug)]
#[command(name = "seqlang")]
#[command(about = "Run SeqLang programs", long_about = None)]
struct Args {
    /// Worker threads used by map and reduce (default: host parallelism - 1)
    #[arg(long)]
    threads: Option<usize>,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Print the symbol table after each successful run (for debugging)
    #[arg(long)]
    debug_type: bool,

    /// Program to run (if not provided, reads from stdin)
    file: Option<PathBuf>,
}

const KEYWORDS: [&str; 5] = ["var", "out", "print", "map", "reduce"];

/// Holds the line back while a `(` or `{` is still open.
struct BracketValidator;

impl Validator for BracketValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match calculate_depth(line) {
            Some(depth) if depth > 0 => ValidationResult::Incomplete,
            _ => ValidationResult::Complete,
        }
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(KEYWORDS.iter().map(|keyword| keyword.to_string()).collect());
        completions
    });

    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(Highlighter))
        .with_validator(Box::new(BracketValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty);

    (line_editor, prompt)
}

fn print_debug_parse(args: &Args, source: &str) {
    if !args.debug_parse {
        return;
    }
    // Syntax errors are reported by the interpreter itself.
    if let Ok(program) = parser::parse(source) {
        println!("=== Parsed AST ===");
        println!("{:#?}", program);
        println!();
    }
}

fn print_debug_type(args: &Args, interpreter: &Session) {
    if args.debug_type {
        println!("=== Symbol Table ===");
        print!("{}", interpreter.symbol_table());
        println!();
    }
}

/// Interpret one chunk of input the way the REPL reports it.
fn interpret_line(args: &Args, interpreter: &mut Session, line: &str) {
    print_debug_parse(args, line);
    let result = interpreter.interpret(line);
    if let Err(e) = interpreter.output_mut().end_line() {
        eprintln!("Error writing to stdout: {e}");
    }
    match result {
        Ok(()) => print_debug_type(args, interpreter),
        Err(err) => println!("{err}"),
    }
}

fn run_file(args: &Args, interpreter: &mut Session, path: &PathBuf) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    print_debug_parse(args, &source);
    let result = interpreter.interpret(&source);
    interpreter.output_mut().end_line().into_diagnostic()?;
    match result {
        Ok(()) => {
            print_debug_type(args, interpreter);
            Ok(())
        }
        Err(err) => {
            render_error(&err, &source);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the log level; default to WARN if not set.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = InterpreterOptions {
        worker_threads: args.threads,
        ..InterpreterOptions::default()
    };
    let mut interpreter = Interpreter::with_options(Console::new(std::io::stdout()), options);

    if let Some(path) = &args.file {
        return run_file(&args, &mut interpreter, path);
    }

    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        let (mut line_editor, prompt) = setup_reedline();

        println!("Welcome to SeqLang!");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    interpret_line(&args, &mut interpreter, &join_continuations(&buffer))
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            interpret_line(&args, &mut interpreter, &line);
        }
    }

    Ok(())
}
