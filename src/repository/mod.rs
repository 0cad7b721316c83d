//! Repository layer over the key/attribute store

pub mod books;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod transactions;

use std::sync::Arc;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

/// Main repository struct holding the shared store handle
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn Store>,
    pub books: books::BooksRepository,
    pub transactions: transactions::TransactionsRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            books: books::BooksRepository::new(store.clone()),
            transactions: transactions::TransactionsRepository::new(store.clone()),
            store,
        }
    }
}
