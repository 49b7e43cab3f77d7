// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument string splitting and quoting.
//!
//! A run may be configured with a single argument string (`"-la '/tmp/my dir'"`).
//! It is split into argv words with POSIX-like quoting rules; no expansion of
//! variables, globs or substitutions is performed.

use thiserror::Error;

/// Errors produced while splitting an argument string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    #[error("unterminated single quote at position {position}")]
    UnterminatedSingleQuote { position: usize },

    #[error("unterminated double quote at position {position}")]
    UnterminatedDoubleQuote { position: usize },

    #[error("trailing backslash at position {position}")]
    TrailingBackslash { position: usize },
}

/// Split an argument string into words.
///
/// - unquoted whitespace separates words
/// - `'...'` is taken literally
/// - `"..."` honors `\\ \" \$ \` \'` plus `\n` and `\t`; any other escape is kept verbatim
/// - a backslash outside quotes escapes the next character
///
/// Positions in errors are byte offsets of the opening quote or backslash.
pub fn split_arguments(input: &str) -> Result<Vec<String>, ArgsError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.char_indices();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, c)) => current.push(c),
                        None => return Err(ArgsError::UnterminatedSingleQuote { position: pos }),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, esc)) => push_double_quoted_escape(&mut current, esc),
                            None => return Err(ArgsError::UnterminatedDoubleQuote { position: pos }),
                        },
                        Some((_, c)) => current.push(c),
                        None => return Err(ArgsError::UnterminatedDoubleQuote { position: pos }),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some((_, c)) => current.push(c),
                    None => return Err(ArgsError::TrailingBackslash { position: pos }),
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn push_double_quoted_escape(out: &mut String, esc: char) {
    match esc {
        '\\' | '"' | '$' | '`' | '\'' => out.push(esc),
        'n' => out.push('\n'),
        't' => out.push('\t'),
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}

/// Quote a word so a POSIX shell reads it back unchanged.
///
/// Words made only of shell-inert characters are returned as-is.
pub fn quote_argument(word: &str) -> String {
    let inert = |c: char| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c);
    if !word.is_empty() && word.chars().all(inert) {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
