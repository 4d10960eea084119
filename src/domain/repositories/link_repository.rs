//! Repository trait for the authoritative link store.

use crate::domain::entities::LinkRecord;
use crate::domain::errors::LinkError;
use async_trait::async_trait;

/// Authoritative store of link records.
///
/// Every mutation is a conditional write: creation requires the path to be
/// absent, update and delete require it to be present. Implementations rely on
/// the backing store for these checks and never hold application-level locks
/// across the read and the write of [`LinkRepository::update_link`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Ensures the schema backing the store exists.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Internal`] if the schema cannot be created.
    async fn init_database(&self) -> Result<(), LinkError>;

    /// Fetches the record stored under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no record exists (including an empty
    /// row from the backing store) and [`LinkError::Internal`] on store errors.
    async fn get_link_details(&self, path: &str) -> Result<LinkRecord, LinkError>;

    /// Inserts a new record, stamping `created_time` and `last_modified`.
    ///
    /// # Errors
    ///
    /// - [`LinkError::MissingPath`] if `record.path` is empty
    /// - [`LinkError::AlreadyExists`] if the path is taken
    /// - [`LinkError::Internal`] on store errors
    async fn create_link(&self, record: LinkRecord) -> Result<(), LinkError>;

    /// Replaces the mutable fields of an existing record.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] if the record is absent, or disappears before
    ///   the conditional write lands
    /// - [`LinkError::NoChange`] if the mutable fields already match; nothing
    ///   is written
    /// - [`LinkError::Internal`] on store errors
    async fn update_link(&self, record: LinkRecord) -> Result<(), LinkError>;

    /// Removes the record stored under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if nothing was removed and
    /// [`LinkError::Internal`] on store errors.
    async fn delete_link(&self, path: &str) -> Result<(), LinkError>;

    /// Checks whether the store is reachable.
    async fn health_check(&self) -> bool;
}
