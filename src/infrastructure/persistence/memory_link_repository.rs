//! In-process implementation of the link store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::error;

use crate::domain::entities::{LinkRecord, next_modified_time};
use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::clock::epoch_now;

/// Link store held in process memory.
///
/// Used for development without PostgreSQL and in tests. Each write checks its
/// precondition under the write lock, which gives the same conditional
/// semantics as the database. Like the PostgreSQL store, `update_link` reads
/// and writes under separate lock acquisitions.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, LinkRecord>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, LinkRecord>>, LinkError> {
        self.links.read().map_err(|_| {
            error!("Memory link store lock poisoned");
            LinkError::Internal
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, LinkRecord>>, LinkError> {
        self.links.write().map_err(|_| {
            error!("Memory link store lock poisoned");
            LinkError::Internal
        })
    }

    /// Writes the mutable fields of `record`, provided the entry still exists.
    fn conditional_update(&self, record: &LinkRecord) -> Result<(), LinkError> {
        let mut links = self.write()?;
        let stored = links.get_mut(&record.path).ok_or(LinkError::NotFound)?;

        stored.canonical_name = record.canonical_name.clone();
        stored.target_url = record.target_url.clone();
        stored.enabled = record.enabled;
        stored.last_modified = next_modified_time(stored.last_modified, epoch_now());
        stored.last_modified_by = record.last_modified_by.clone();

        Ok(())
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn init_database(&self) -> Result<(), LinkError> {
        Ok(())
    }

    async fn get_link_details(&self, path: &str) -> Result<LinkRecord, LinkError> {
        let links = self.read()?;

        match links.get(path) {
            Some(record) if !record.path.is_empty() => Ok(record.clone()),
            _ => Err(LinkError::NotFound),
        }
    }

    async fn create_link(&self, record: LinkRecord) -> Result<(), LinkError> {
        if record.path.is_empty() {
            return Err(LinkError::MissingPath);
        }

        let mut links = self.write()?;

        match links.entry(record.path.clone()) {
            Entry::Occupied(_) => Err(LinkError::AlreadyExists),
            Entry::Vacant(slot) => {
                let now = epoch_now();
                slot.insert(LinkRecord {
                    created_time: now,
                    last_modified: now,
                    ..record
                });
                Ok(())
            }
        }
    }

    async fn update_link(&self, record: LinkRecord) -> Result<(), LinkError> {
        let existing = self.get_link_details(&record.path).await?;

        if existing.content_eq(&record) {
            return Err(LinkError::NoChange);
        }

        self.conditional_update(&record)
    }

    async fn delete_link(&self, path: &str) -> Result<(), LinkError> {
        let mut links = self.write()?;

        links.remove(path).map(|_| ()).ok_or(LinkError::NotFound)
    }

    async fn health_check(&self) -> bool {
        self.links.read().is_ok()
    }
}
