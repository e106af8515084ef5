use crate::errors::{FiremockError, FiremockResult};
use crate::firemock::Firemock;
use crate::firemock_config::FiremockConfig;

/// Builder for creating and configuring a Firemock store.
///
/// Errors raised by a setter are captured and returned by [FiremockBuilder::open];
/// once an error is captured the remaining setters are skipped.
///
/// # Examples
///
/// ```rust
/// use firemock::Firemock;
///
/// let store = Firemock::builder()
///     .project_id("my-project")
///     .document_id_keys(&["__name__"])
///     .open()
///     .unwrap();
/// assert_eq!(store.config().project_id(), "my-project");
///
/// assert!(Firemock::builder().database_id("").open().is_err());
/// ```
#[derive(Default)]
pub struct FiremockBuilder {
    error: Option<FiremockError>,
    config: FiremockConfig,
}

impl FiremockBuilder {
    /// Creates a new `FiremockBuilder` with default configuration.
    pub fn new() -> Self {
        FiremockBuilder {
            error: None,
            config: FiremockConfig::new(),
        }
    }

    fn configure(mut self, setter: impl FnOnce(&FiremockConfig) -> FiremockResult<()>) -> Self {
        if self.error.is_none() {
            if let Err(e) = setter(&self.config) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Sets the project id used in full resource names.
    pub fn project_id(self, project_id: &str) -> Self {
        self.configure(|config| config.set_project_id(project_id))
    }

    /// Sets the database id used in full resource names.
    pub fn database_id(self, database_id: &str) -> Self {
        self.configure(|config| config.set_database_id(database_id))
    }

    /// Sets the field paths that order query results by document id.
    pub fn document_id_keys(self, keys: &[&str]) -> Self {
        self.configure(|config| config.set_document_id_keys(keys))
    }

    /// Opens an empty store with the configured settings.
    ///
    /// # Errors
    ///
    /// The first error captured by a setter.
    pub fn open(self) -> FiremockResult<Firemock> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.config.initialize();
        Ok(Firemock::new(self.config))
    }
}
