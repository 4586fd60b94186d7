//! In-memory storage of each company's catalog and events
//!
//! Every company book sits behind its own mutex. Handlers lock the book for
//! the whole of an operation, so two completions touching the same lots can
//! never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use shared::{Catalog, Event};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Everything one company owns
#[derive(Debug, Clone, Default)]
pub struct CompanyBook {
    pub catalog: Catalog,
    pub events: Vec<Event>,
}

impl CompanyBook {
    pub fn event(&self, event_id: &Uuid) -> Option<&Event> {
        self.events.iter().find(|event| event.id == *event_id)
    }

    /// Split borrow of an event and the catalog it depletes
    pub fn event_and_catalog_mut(&mut self, event_id: &Uuid) -> Option<(&mut Event, &mut Catalog)> {
        let event = self.events.iter_mut().find(|event| event.id == *event_id)?;
        Some((event, &mut self.catalog))
    }

    pub fn remove_event(&mut self, event_id: &Uuid) -> Option<Event> {
        let index = self.events.iter().position(|event| event.id == *event_id)?;
        Some(self.events.remove(index))
    }
}

pub type SharedBook = Arc<Mutex<CompanyBook>>;

#[derive(Clone, Default)]
pub struct Store {
    books: Arc<RwLock<HashMap<Uuid, SharedBook>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// The company's book, created empty on first use
    pub async fn book(&self, company_id: Uuid) -> SharedBook {
        if let Some(book) = self.books.read().await.get(&company_id) {
            return book.clone();
        }

        let mut books = self.books.write().await;
        books
            .entry(company_id)
            .or_insert_with(|| {
                tracing::debug!("Opening book for company {}", company_id);
                Arc::new(Mutex::new(CompanyBook::default()))
            })
            .clone()
    }
}
