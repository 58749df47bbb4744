use seqlang::Interpreter;

/// Run `source` on a fresh interpreter: its output, or the error message.
pub fn run(source: &str) -> Result<String, String> {
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.interpret(source).map_err(|err| err.to_string())?;
    Ok(String::from_utf8_lossy(interpreter.output()).into_owned())
}

/// Declare a test running one program and checking its output or error.
macro_rules! program_case {
    ($name:ident, input: $input:expr, output: $output:expr $(,)?) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!(crate::cases::run($input), Ok($output.to_string()));
        }
    };
    ($name:ident, input: $input:expr, error: $error:expr $(,)?) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!(crate::cases::run($input), Err($error.to_string()));
        }
    };
}
