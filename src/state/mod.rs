use crate::config::{Settings, StoreKind};
use crate::store::PostStore;
use std::sync::Arc;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

#[derive(Debug)]
pub struct State {
    pub store: Box<dyn PostStore>,
}

impl State {
    pub fn new(store: impl PostStore + 'static) -> State {
        State {
            store: Box::new(store),
        }
    }

    pub async fn from_settings(settings: &Settings) -> crate::store::Result<State> {
        Ok(match settings.store {
            StoreKind::Memory => State::new(crate::store::memory::MemoryStore::new()),
            StoreKind::File => {
                State::new(crate::store::file::FileStore::open(&settings.store_path).await?)
            }
        })
    }
}
