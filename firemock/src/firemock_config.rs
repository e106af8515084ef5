//! Configuration of a Firemock store.

use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const DEFAULT_PROJECT_ID: &str = "projectID";
pub const DEFAULT_DATABASE_ID: &str = "(default)";
pub const DEFAULT_DOCUMENT_ID_KEYS: [&str; 2] = ["__name__", "DocumentID"];

/// Configuration of a Firemock store.
///
/// Settings can only be changed until the store is opened; afterwards every
/// setter fails with `InvalidArgument`.
///
/// # Examples
///
/// ```rust
/// use firemock::FiremockConfig;
///
/// let config = FiremockConfig::new();
/// assert_eq!(config.documents_root(), "projects/projectID/databases/(default)/documents");
/// assert!(config.is_document_id_key("__name__"));
/// ```
#[derive(Clone, Debug)]
pub struct FiremockConfig {
    /// The pointer to implementation. Uses Arc for cheap cloning and thread safety.
    inner: Arc<FiremockConfigInner>,
}

impl Default for FiremockConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FiremockConfig {
    /// Creates a new configuration instance with default values.
    pub fn new() -> Self {
        FiremockConfig {
            inner: Arc::new(FiremockConfigInner::new()),
        }
    }

    pub fn project_id(&self) -> String {
        self.inner.settings.read().project_id.clone()
    }

    /// Sets the project id used in full resource names.
    ///
    /// # Errors
    ///
    /// Returns error if already configured or if the id is empty or holds a `/`.
    pub fn set_project_id(&self, project_id: &str) -> FiremockResult<()> {
        self.inner.check_not_configured("project id")?;
        check_resource_id(project_id, "Project id")?;
        self.inner.settings.write().project_id = project_id.to_string();
        Ok(())
    }

    pub fn database_id(&self) -> String {
        self.inner.settings.read().database_id.clone()
    }

    /// Sets the database id used in full resource names.
    ///
    /// # Errors
    ///
    /// Returns error if already configured or if the id is empty or holds a `/`.
    pub fn set_database_id(&self, database_id: &str) -> FiremockResult<()> {
        self.inner.check_not_configured("database id")?;
        check_resource_id(database_id, "Database id")?;
        self.inner.settings.write().database_id = database_id.to_string();
        Ok(())
    }

    /// Field paths that order query results by document id.
    pub fn document_id_keys(&self) -> Vec<String> {
        self.inner.settings.read().document_id_keys.clone()
    }

    /// Replaces the field paths that order query results by document id.
    ///
    /// # Errors
    ///
    /// Returns error if already configured, if `keys` is empty or if any key
    /// is empty.
    pub fn set_document_id_keys(&self, keys: &[&str]) -> FiremockResult<()> {
        self.inner.check_not_configured("document id keys")?;
        if keys.is_empty() || keys.iter().any(|key| key.is_empty()) {
            log::error!("Document id keys cannot be empty: {:?}", keys);
            return Err(FiremockError::new(
                "Document id keys cannot be empty",
                ErrorKind::InvalidArgument,
            ));
        }
        self.inner.settings.write().document_id_keys =
            keys.iter().map(|key| key.to_string()).collect();
        Ok(())
    }

    pub fn is_document_id_key(&self, field: &str) -> bool {
        self.inner
            .settings
            .read()
            .document_id_keys
            .iter()
            .any(|key| key == field)
    }

    /// `projects/{project}/databases/{database}/documents`
    pub fn documents_root(&self) -> String {
        let settings = self.inner.settings.read();
        format!(
            "projects/{}/databases/{}/documents",
            settings.project_id, settings.database_id
        )
    }

    /// Full resource name of a path relative to the documents root.
    pub fn resource_name(&self, path: &str) -> String {
        let relative = path.trim_matches('/');
        if relative.is_empty() {
            self.documents_root()
        } else {
            format!("{}/{}", self.documents_root(), relative)
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }

    /// Freezes the configuration.
    pub(crate) fn initialize(&self) {
        self.inner.configured.store(true, Ordering::Relaxed);
    }
}

fn check_resource_id(id: &str, what: &str) -> FiremockResult<()> {
    if id.is_empty() || id.contains('/') {
        log::error!("{} {:?} is not a valid resource id", what, id);
        return Err(FiremockError::new(
            &format!("{} {:?} is not a valid resource id", what, id),
            ErrorKind::InvalidArgument,
        ));
    }
    Ok(())
}

#[derive(Debug)]
struct Settings {
    project_id: String,
    database_id: String,
    document_id_keys: Vec<String>,
}

/// Private implementation of Firemock configuration.
#[derive(Debug)]
struct FiremockConfigInner {
    /// Indicates whether this configuration has been initialized
    configured: AtomicBool,
    settings: RwLock<Settings>,
}

impl FiremockConfigInner {
    fn new() -> Self {
        FiremockConfigInner {
            configured: AtomicBool::new(false),
            settings: RwLock::new(Settings {
                project_id: DEFAULT_PROJECT_ID.to_string(),
                database_id: DEFAULT_DATABASE_ID.to_string(),
                document_id_keys: DEFAULT_DOCUMENT_ID_KEYS
                    .iter()
                    .map(|key| key.to_string())
                    .collect(),
            }),
        }
    }

    fn check_not_configured(&self, setting: &str) -> FiremockResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("The {} cannot be changed after initialization", setting);
            return Err(FiremockError::new(
                &format!("The {} cannot be changed after initialization", setting),
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(())
    }
}
