//! Business logic services

pub mod catalog;
pub mod ledger;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub ledger: ledger::LedgerService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let catalog = catalog::CatalogService::new(repository.clone());
        Self {
            ledger: ledger::LedgerService::new(repository.clone(), catalog.clone()),
            catalog,
            repository,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.store.ping().await
    }
}
