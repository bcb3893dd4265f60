//! Tab-separated edge-list reader
//!
//! Each non-comment line holds at least two tab-separated tokens: the source
//! and destination identifiers. Further tokens are ignored.

use crate::config::DEFAULT_COMMENT;
use crate::error::{RankError, RankResult};
use std::io::{BufRead, Split};

/// One edge record in original-identifier space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    /// 1-based line number in the input
    pub line: usize,
    pub source: String,
    pub target: String,
}

/// Lazily parses edge records from a buffered stream.
pub struct EdgeListReader<R> {
    lines: Split<R>,
    line: usize,
    comment: char,
}

impl<R: BufRead> EdgeListReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_comment(reader, DEFAULT_COMMENT)
    }

    pub fn with_comment(reader: R, comment: char) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line: 0,
            comment,
        }
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = RankResult<RawEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(RankError::Io(e))),
            };
            self.line += 1;
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    return Some(Err(RankError::MalformedInput {
                        line: self.line,
                        reason: format!(
                            "invalid UTF-8 at byte {}",
                            e.utf8_error().valid_up_to()
                        ),
                    }))
                }
            };
            if let Some(record) = parse_record(self.line, &text, self.comment) {
                return Some(record);
            }
        }
    }
}

/// Parse one line. Returns `None` for blank and comment lines.
pub fn parse_record(line: usize, text: &str, comment: char) -> Option<RankResult<RawEdge>> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with(comment) {
        return None;
    }

    let mut tokens = text.split('\t').map(str::trim);
    let source = tokens.next().unwrap_or_default();
    let Some(target) = tokens.next() else {
        return Some(Err(RankError::MalformedInput {
            line,
            reason: format!("expected two tab-separated identifiers, found one: {:?}", trimmed),
        }));
    };

    for (role, token) in [("source", source), ("destination", target)] {
        if token.is_empty() {
            return Some(Err(RankError::MalformedInput {
                line,
                reason: format!("empty {} identifier", role),
            }));
        }
    }

    Some(Ok(RawEdge {
        line,
        source: source.to_string(),
        target: target.to_string(),
    }))
}
