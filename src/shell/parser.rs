//! Turns one input line into exactly one [`Shape`].
//!
//! Operators are found by a single scan of the raw line, so `a>b` and
//! `a > b` redirect alike. Priority: pipeline, then `>>`, `>`, `<`, then
//! built-in, then external. A trailing `&` is stripped first and applies to
//! external and redirected commands only.

use std::fmt;
use std::path::PathBuf;

use crate::process::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Builtin { name: String, args: Vec<String> },
    Simple(Vec<String>),
    Pipeline(Vec<Vec<String>>),
    Redirect {
        words: Vec<String>,
        direction: Direction,
        path: PathBuf,
    },
    Backgrounded(Box<Shape>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingCommand,
    EmptyPipelineStage(usize),
    MissingRedirectTarget,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingCommand => write!(f, "Malformed input: missing command"),
            ParseError::EmptyPipelineStage(index) => {
                write!(f, "Malformed input: pipeline stage {} is empty", index + 1)
            }
            ParseError::MissingRedirectTarget => {
                write!(f, "Malformed input: redirection needs a target path")
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

/// Byte offsets of the first occurrence of each operator.
#[derive(Debug, Default, PartialEq, Eq)]
struct Operators {
    pipe: Option<usize>,
    append: Option<usize>,
    write: Option<usize>,
    read: Option<usize>,
}

impl Operators {
    fn scan(line: &str) -> Self {
        let mut ops = Operators::default();
        let mut chars = line.char_indices().peekable();

        while let Some((at, c)) = chars.next() {
            match c {
                '|' => {
                    ops.pipe.get_or_insert(at);
                }
                '>' if matches!(chars.peek(), Some((_, '>'))) => {
                    chars.next();
                    ops.append.get_or_insert(at);
                }
                '>' => {
                    ops.write.get_or_insert(at);
                }
                '<' => {
                    ops.read.get_or_insert(at);
                }
                _ => {}
            }
        }
        ops
    }

    fn redirection(&self) -> Option<(Direction, usize, usize)> {
        if let Some(at) = self.append {
            Some((Direction::Append, at, 2))
        } else if let Some(at) = self.write {
            Some((Direction::Write, at, 1))
        } else {
            self.read.map(|at| (Direction::Read, at, 1))
        }
    }
}

/// Parses a raw line. `Ok(None)` means the line was blank.
pub fn parse_line(
    line: &str,
    is_builtin: impl Fn(&str) -> bool,
) -> Result<Option<Shape>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (line, background) = match line.strip_suffix('&') {
        Some(rest) => (rest.trim_end(), true),
        None => (line, false),
    };
    if line.is_empty() {
        return Err(ParseError::MissingCommand);
    }

    let ops = Operators::scan(line);

    if ops.pipe.is_some() {
        if background {
            log::debug!("ignoring trailing '&' on pipeline");
        }
        return parse_pipeline(line).map(Some);
    }

    let shape = if let Some((direction, at, width)) = ops.redirection() {
        let words = tokenize(&line[..at]);
        if words.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        let target = line[at + width..].trim();
        if target.is_empty() {
            return Err(ParseError::MissingRedirectTarget);
        }
        Shape::Redirect {
            words,
            direction,
            path: PathBuf::from(target),
        }
    } else {
        let mut words = tokenize(line);
        if is_builtin(&words[0]) {
            if background {
                log::debug!("ignoring trailing '&' on built-in '{}'", words[0]);
            }
            let name = words.remove(0);
            return Ok(Some(Shape::Builtin { name, args: words }));
        }
        Shape::Simple(words)
    };

    Ok(Some(if background {
        Shape::Backgrounded(Box::new(shape))
    } else {
        shape
    }))
}

fn parse_pipeline(line: &str) -> Result<Shape, ParseError> {
    let stages = line
        .split('|')
        .enumerate()
        .map(|(index, segment)| {
            let words = tokenize(segment);
            if words.is_empty() {
                Err(ParseError::EmptyPipelineStage(index))
            } else {
                Ok(words)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Shape::Pipeline(stages))
}
