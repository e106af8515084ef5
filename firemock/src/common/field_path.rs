use crate::common::Value;
use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub(crate) const FIELD_SEPARATOR: char = '.';
const QUOTE: char = '`';
const ESCAPE: char = '\\';

type Segments = SmallVec<[String; 4]>;

/// A dot-separated address into a document's (possibly nested) field data.
///
/// `a.b.c` addresses key `c` of the map stored under key `b` of the map stored
/// in top-level field `a`. A segment containing the separator can be quoted
/// with backticks: `` a.`b.c` `` has the two segments `a` and `b.c`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Segments,
}

impl FieldPath {
    /// Parses a field path, rejecting empty segments and unbalanced quotes.
    pub fn parse(path: &str) -> FiremockResult<FieldPath> {
        if path.is_empty() {
            log::error!("Field path cannot be empty");
            return Err(FiremockError::new(
                "Field path cannot be empty",
                ErrorKind::InvalidFieldPath,
            ));
        }

        let mut segments = Segments::new();
        let mut current = String::new();
        let mut chars = path.chars().peekable();
        let mut quoted_segment = false;

        while let Some(c) = chars.next() {
            match c {
                QUOTE if current.is_empty() && !quoted_segment => {
                    quoted_segment = true;
                    let mut closed = false;
                    while let Some(q) = chars.next() {
                        match q {
                            ESCAPE => match chars.next() {
                                Some(escaped) => current.push(escaped),
                                None => break,
                            },
                            QUOTE => {
                                closed = true;
                                break;
                            }
                            other => current.push(other),
                        }
                    }
                    if !closed {
                        return Err(invalid(path, "unterminated backtick"));
                    }
                    if !matches!(chars.peek(), None | Some(&FIELD_SEPARATOR)) {
                        return Err(invalid(path, "quoted segment must end at a separator"));
                    }
                }
                FIELD_SEPARATOR => {
                    if current.is_empty() {
                        return Err(invalid(path, "empty segment"));
                    }
                    segments.push(std::mem::take(&mut current));
                    quoted_segment = false;
                }
                other => current.push(other),
            }
        }

        if current.is_empty() {
            return Err(invalid(path, "empty segment"));
        }
        segments.push(current);
        Ok(FieldPath { segments })
    }

    /// Builds a path from already separated segments.
    pub fn from_segments<I, S>(segments: I) -> FiremockResult<FieldPath>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Segments = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            log::error!("Field path segments cannot be empty");
            return Err(FiremockError::new(
                "Field path segments cannot be empty",
                ErrorKind::InvalidFieldPath,
            ));
        }
        Ok(FieldPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The top-level field this path starts at.
    pub fn first(&self) -> &str {
        &self.segments[0]
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Resolves this path starting from the value of its first segment.
    ///
    /// Every intermediate value must be a map holding the next segment,
    /// otherwise the field is absent and `None` is returned.
    pub fn descend<'a>(&self, top: Option<&'a Value>) -> Option<&'a Value> {
        let mut current = top?;
        for segment in &self.segments[1..] {
            current = match current {
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolves this path against a plain field map.
    pub fn get_in<'a>(&self, fields: &'a BTreeMap<String, Value>) -> Option<&'a Value> {
        self.descend(fields.get(self.first()))
    }
}

fn invalid(path: &str, reason: &str) -> FiremockError {
    log::error!("Invalid field path {:?}: {}", path, reason);
    FiremockError::new(
        &format!("Invalid field path {:?}: {}", path, reason),
        ErrorKind::InvalidFieldPath,
    )
}

fn needs_quoting(segment: &str) -> bool {
    segment.contains(FIELD_SEPARATOR) || segment.contains(QUOTE) || segment.contains(ESCAPE)
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", FIELD_SEPARATOR)?;
            }
            if needs_quoting(segment) {
                let escaped = segment.replace(ESCAPE, "\\\\").replace(QUOTE, "\\`");
                write!(f, "`{}`", escaped)?;
            } else {
                write!(f, "{}", segment)?;
            }
        }
        Ok(())
    }
}
