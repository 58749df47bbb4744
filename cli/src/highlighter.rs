use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::StyledText;

use crate::lexer::Token;

const PLAIN: Color = Color::White;

fn color_of(token: Result<Token, ()>) -> Color {
    match token {
        Ok(Token::Keyword) => Color::Magenta,
        Ok(Token::Builtin) => Color::Blue,
        Ok(Token::Ident) => Color::Red,
        Ok(Token::Integer | Token::Float) => Color::Cyan,
        Ok(Token::String) => Color::Green,
        Ok(Token::UnterminatedString) => Color::Yellow,
        Ok(Token::Operator) => PLAIN,
        Ok(Token::LParen | Token::RParen | Token::LBrace | Token::RBrace | Token::Comma) => {
            Color::DarkGray
        }
        Err(()) => Color::LightRed,
    }
}

/// Colours a REPL line by token category.
pub struct Highlighter;

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut output = StyledText::new();
        let mut curr_end = 0;

        for (token, span) in Token::lexer(line).spanned() {
            if span.start > curr_end {
                output.push((Style::new().fg(PLAIN), line[curr_end..span.start].to_string()));
            }
            output.push((Style::new().fg(color_of(token)), line[span.clone()].to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((Style::new().fg(PLAIN), line[curr_end..].to_string()));
        }

        output
    }
}
