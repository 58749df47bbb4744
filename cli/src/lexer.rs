use logos::Logos;

/// Tokens of a SeqLang line, as far as the REPL needs them.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("var")]
    #[token("out")]
    #[token("print")]
    Keyword,

    #[token("map")]
    #[token("reduce")]
    Builtin,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r#""[^"\n]*""#)]
    String,

    // Longest match prefers `String` once the closing quote is typed.
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("^")]
    #[token("=")]
    #[token("->")]
    Operator,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,
}

/// Number of `(`/`{` still open at the end of `buffer`.
///
/// Returns `None` when the buffer holds something the lexer does not know,
/// in which case the input is submitted as is and the parser reports it.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token in Token::lexer(buffer) {
        match token {
            Ok(Token::LParen | Token::LBrace) => depth += 1,
            Ok(Token::RParen | Token::RBrace) => depth -= 1,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(depth.max(0) as usize)
}

/// Join the lines of a REPL buffer so that a line ending inside an open
/// bracket continues the same statement.
pub fn join_continuations(buffer: &str) -> String {
    let mut joined = String::with_capacity(buffer.len());
    for line in buffer.lines() {
        if !joined.is_empty() {
            let open = calculate_depth(&joined).unwrap_or(0) > 0;
            joined.push(if open { ' ' } else { '\n' });
        }
        joined.push_str(line);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|token| token.unwrap()).collect()
    }

    #[test]
    fn test_keywords_and_builtins() {
        assert_eq!(
            tokens("var seq = map(s, i -> i)"),
            vec![
                Token::Keyword,
                Token::Ident,
                Token::Operator,
                Token::Builtin,
                Token::LParen,
                Token::Ident,
                Token::Comma,
                Token::Ident,
                Token::Operator,
                Token::Ident,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_identifier_with_keyword_prefix() {
        assert_eq!(tokens("output mapped"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            tokens("1 2.5 -3"),
            vec![Token::Integer, Token::Float, Token::Operator, Token::Integer]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(tokens(r#"print "pi = ""#), vec![Token::Keyword, Token::String]);
        assert_eq!(
            tokens(r#"print "pi = "#),
            vec![Token::Keyword, Token::UnterminatedString]
        );
    }

    #[test]
    fn test_calculate_depth() {
        assert_eq!(calculate_depth("out 1"), Some(0));
        assert_eq!(calculate_depth("var s = map({1, 10},"), Some(1));
        assert_eq!(calculate_depth("reduce(map({1, 2}"), Some(2));
        assert_eq!(calculate_depth("out (1))"), Some(0));
        assert_eq!(calculate_depth("out 1 ; 2"), None);
    }

    #[test]
    fn test_join_continuations() {
        assert_eq!(
            join_continuations("var s = map({1, 10},\n  i -> i * 2)\nout s"),
            "var s = map({1, 10},   i -> i * 2)\nout s"
        );
        assert_eq!(join_continuations("out 1"), "out 1");
    }
}
