//! Ivy repository patterns.
//!
//! A pattern is a URL template made of constants, `[variable]` chunks,
//! `${property}` chunks and `( ... )` optional sections that are dropped
//! when one of their variables is missing.

use std::fmt;

use thiserror::Error;

/// Piece of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Const(String),
    Var(String),
    Prop(String),
    Opt(Vec<Chunk>),
}

/// Parsed Ivy pattern, keeping its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    chunks: Vec<Chunk>,
}

/// Pattern parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,

    #[error("unclosed '{open}' at position {position}")]
    Unclosed { open: &'static str, position: usize },

    #[error("unexpected ')' at position {position}")]
    UnexpectedClose { position: usize },

    #[error("empty variable name at position {position}")]
    EmptyName { position: usize },
}

impl Pattern {
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        if input.trim().is_empty() {
            return Err(PatternError::Empty);
        }

        let chars: Vec<char> = input.chars().collect();
        let mut pos = 0;
        let chunks = parse_chunks(&chars, &mut pos, None)?;

        Ok(Self {
            source: input.to_string(),
            chunks,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Names of every `[variable]` of the pattern, optional ones included
    pub fn variables(&self) -> Vec<&str> {
        fn collect<'a>(chunks: &'a [Chunk], out: &mut Vec<&'a str>) {
            for chunk in chunks {
                match chunk {
                    Chunk::Var(name) => out.push(name),
                    Chunk::Opt(inner) => collect(inner, out),
                    Chunk::Const(_) | Chunk::Prop(_) => {},
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.chunks, &mut out);
        out
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_chunks(
    chars: &[char],
    pos: &mut usize,
    open_paren: Option<usize>,
) -> Result<Vec<Chunk>, PatternError> {
    let mut chunks = Vec::new();
    let mut constant = String::new();

    fn flush(constant: &mut String, chunks: &mut Vec<Chunk>) {
        if !constant.is_empty() {
            chunks.push(Chunk::Const(std::mem::take(constant)));
        }
    }

    while let Some(&ch) = chars.get(*pos) {
        match ch {
            '[' => {
                flush(&mut constant, &mut chunks);
                let name = read_name(chars, pos, ']', "[")?;
                chunks.push(Chunk::Var(name));
            },
            '$' if chars.get(*pos + 1) == Some(&'{') => {
                flush(&mut constant, &mut chunks);
                *pos += 1;
                let name = read_name(chars, pos, '}', "${")?;
                chunks.push(Chunk::Prop(name));
            },
            '(' => {
                flush(&mut constant, &mut chunks);
                let start = *pos;
                *pos += 1;
                let inner = parse_chunks(chars, pos, Some(start))?;
                chunks.push(Chunk::Opt(inner));
            },
            ')' => {
                if open_paren.is_none() {
                    return Err(PatternError::UnexpectedClose { position: *pos });
                }
                flush(&mut constant, &mut chunks);
                *pos += 1;
                return Ok(chunks);
            },
            _ => {
                constant.push(ch);
                *pos += 1;
            },
        }
    }

    if let Some(position) = open_paren {
        return Err(PatternError::Unclosed {
            open: "(",
            position,
        });
    }

    flush(&mut constant, &mut chunks);
    Ok(chunks)
}

/// Read a name up to `close`, with `pos` on the opening character
fn read_name(
    chars: &[char],
    pos: &mut usize,
    close: char,
    open: &'static str,
) -> Result<String, PatternError> {
    let start = if open.len() > 1 { *pos - 1 } else { *pos };
    *pos += 1;

    let mut name = String::new();
    loop {
        match chars.get(*pos) {
            Some(&ch) if ch == close => {
                *pos += 1;
                break;
            },
            Some(&ch) => {
                name.push(ch);
                *pos += 1;
            },
            None => {
                return Err(PatternError::Unclosed {
                    open,
                    position: start,
                })
            },
        }
    }

    if name.is_empty() {
        return Err(PatternError::EmptyName { position: start });
    }
    Ok(name)
}
