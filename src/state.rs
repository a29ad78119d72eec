use crate::storage::RecordStore;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub template_dir: PathBuf,
}

impl AppState {
    pub fn new(store: RecordStore, template_dir: PathBuf) -> Self {
        Self {
            store: Arc::new(store),
            template_dir,
        }
    }
}
