use std::iter::Peekable;
use std::str::CharIndices;

use crate::{is_list_space, ListError};

/// Split a Tcl list into its elements.
pub fn parse_list(src: &str) -> Result<Vec<String>, ListError> {
    ListParser::new(src).collect()
}

struct ListParser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> ListParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.char_indices().peekable(),
        }
    }

    fn skip_space(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if !is_list_space(c) {
                break;
            }
            self.chars.next();
        }
    }

    /// A closing brace or quote must end the element.
    fn expect_separator(&mut self, delimiter: &'static str) -> Result<(), ListError> {
        match self.chars.peek() {
            Some(&(position, found)) if !is_list_space(found) => Err(ListError::TrailingGarbage {
                delimiter,
                found,
                position,
            }),
            _ => Ok(()),
        }
    }

    fn read_braced(&mut self, start: usize) -> Result<String, ListError> {
        let mut out = String::new();
        let mut depth = 1usize;
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => {
                    // kept verbatim; the escaped char does not count as a brace
                    out.push(c);
                    if let Some((_, next)) = self.chars.next() {
                        out.push(next);
                    }
                }
                '{' => {
                    depth += 1;
                    out.push(c);
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.expect_separator("braces")?;
                        return Ok(out);
                    }
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        Err(ListError::UnmatchedBrace { position: start })
    }

    fn read_quoted(&mut self, start: usize) -> Result<String, ListError> {
        let mut out = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => {
                    self.expect_separator("quotes")?;
                    return Ok(out);
                }
                '\\' => self.backslash(&mut out),
                _ => out.push(c),
            }
        }
        Err(ListError::UnmatchedQuote { position: start })
    }

    fn read_bare(&mut self) -> String {
        let mut out = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if is_list_space(c) {
                break;
            }
            self.chars.next();
            if c == '\\' {
                self.backslash(&mut out);
            } else {
                out.push(c);
            }
        }
        out
    }

    fn take_digits(&mut self, radix: u32, max: usize) -> Option<u32> {
        let mut value: Option<u32> = None;
        for _ in 0..max {
            let Some(digit) = self.chars.peek().and_then(|&(_, c)| c.to_digit(radix)) else {
                break;
            };
            self.chars.next();
            value = Some(value.unwrap_or(0) * radix + digit);
        }
        value
    }

    /// Backslash substitution; the backslash itself has been consumed.
    fn backslash(&mut self, out: &mut String) {
        let Some((_, c)) = self.chars.next() else {
            out.push('\\');
            return;
        };
        match c {
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            'x' | 'u' | 'U' => {
                let max = match c {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                match self.take_digits(16, max) {
                    Some(code) => out.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                    None => out.push(c),
                }
            }
            '0'..='7' => {
                let mut code = c as u32 - '0' as u32;
                for _ in 0..2 {
                    let Some(digit) = self.chars.peek().and_then(|&(_, c)| c.to_digit(8)) else {
                        break;
                    };
                    self.chars.next();
                    code = code * 8 + digit;
                }
                out.push(char::from_u32(code & 0xff).unwrap_or('\u{FFFD}'));
            }
            '\n' => {
                while let Some(&(_, ' ' | '\t')) = self.chars.peek() {
                    self.chars.next();
                }
                out.push(' ');
            }
            other => out.push(other),
        }
    }
}

impl Iterator for ListParser<'_> {
    type Item = Result<String, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_space();
        let &(position, c) = self.chars.peek()?;
        let element = match c {
            '{' => {
                self.chars.next();
                self.read_braced(position)
            }
            '"' => {
                self.chars.next();
                self.read_quoted(position)
            }
            _ => Ok(self.read_bare()),
        };
        Some(element)
    }
}
