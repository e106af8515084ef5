use crate::common::Fields;
use chrono::{DateTime, Utc};

/// One mutation of a commit.
///
/// Without an update mask (or with an empty one) the write replaces every
/// top-level field of the document. With a mask, only the named field paths
/// are written: each takes its value from `fields`, and a path missing from
/// `fields` is removed from the document.
///
/// # Examples
///
/// ```rust
/// use firemock::fields;
/// use firemock::write::Write;
///
/// let replace = Write::set("users/alice", fields! { "age" => 30 });
/// assert!(replace.update_mask().is_none());
///
/// let patch = Write::update("users/alice", fields! { "age" => 31 }, &["age"]);
/// assert!(patch.requires_exists());
/// ```
#[derive(Debug, Clone)]
pub struct Write {
    path: String,
    fields: Fields,
    update_mask: Option<Vec<String>>,
    require_exists: bool,
}

impl Write {
    pub fn new(
        path: &str,
        fields: Fields,
        update_mask: Option<Vec<String>>,
        require_exists: bool,
    ) -> Self {
        Write {
            path: path.to_string(),
            fields,
            update_mask,
            require_exists,
        }
    }

    /// Replaces the document, creating it if needed.
    pub fn set(path: &str, fields: Fields) -> Self {
        Write::new(path, fields, None, false)
    }

    /// Writes the masked fields of an existing document.
    pub fn update(path: &str, fields: Fields, mask: &[&str]) -> Self {
        Write::new(path, fields, Some(to_mask(mask)), true)
    }

    /// Writes the masked fields, creating the document if needed.
    pub fn merge(path: &str, fields: Fields, mask: &[&str]) -> Self {
        Write::new(path, fields, Some(to_mask(mask)), false)
    }

    /// Declares whether the document must already exist.
    pub fn require_exists(mut self, require_exists: bool) -> Self {
        self.require_exists = require_exists;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn update_mask(&self) -> Option<&[String]> {
        self.update_mask.as_deref()
    }

    pub fn requires_exists(&self) -> bool {
        self.require_exists
    }
}

fn to_mask(mask: &[&str]) -> Vec<String> {
    mask.iter().map(|path| path.to_string()).collect()
}

/// The outcome of one applied write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    update_time: DateTime<Utc>,
}

impl WriteResult {
    pub fn new(update_time: DateTime<Utc>) -> Self {
        WriteResult { update_time }
    }

    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }
}
