use std::iter::Peekable;
use std::str::Chars;

use crate::dictionary::MAX_WORD_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos(pub u32, pub u32);

impl Pos {
    pub fn start() -> Pos {
        Pos(0, 0)
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub start: Pos,
    pub lexeme: String,
}

/// Splits prose into candidate words.
///
/// A word is a run of ASCII letters and apostrophes that starts with a
/// letter. Runs containing digits, and runs longer than the word length
/// bound, are dropped whole.
#[derive(Debug)]
pub struct Lexer<'a> {
    text: Peekable<Chars<'a>>,
    max_len: usize,
    col: u32,
    line: u32,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Lexer<'a> {
        Self::with_max_len(text, MAX_WORD_LENGTH)
    }

    pub fn with_max_len(text: &'a str, max_len: usize) -> Lexer<'a> {
        Lexer {
            text: text.chars().peekable(),
            max_len,
            col: 0,
            line: 0,
        }
    }

    fn pos(&self) -> Pos {
        Pos(self.line, self.col)
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            let next_char = *self.text.peek()?;
            match next_char {
                'a'..='z' | 'A'..='Z' => {
                    if let Some(token) = self.word() {
                        return Some(token);
                    }
                }
                '0'..='9' => self.skip_alphanumeric(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.text.next()?;

        self.col += 1;
        if char == '\n' {
            self.col = 0;
            self.line += 1;
        }

        Some(char)
    }

    fn word(&mut self) -> Option<Token> {
        let start = self.pos();
        let mut lexeme = String::new();

        while let Some(&char) = self.text.peek() {
            match char {
                'a'..='z' | 'A'..='Z' | '\'' => {
                    lexeme.push(char);
                    self.advance();
                    if lexeme.len() > self.max_len {
                        self.skip_alphanumeric();
                        return None;
                    }
                }
                '0'..='9' => {
                    self.skip_alphanumeric();
                    return None;
                }
                _ => break,
            }
        }

        Some(Token { start, lexeme })
    }

    fn skip_alphanumeric(&mut self) {
        while let Some(&char) = self.text.peek() {
            if !(char.is_ascii_alphanumeric() || char == '\'') {
                break;
            }
            self.advance();
        }
    }
}
