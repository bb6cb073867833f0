use crate::services::catalog::BookCatalog;
use database::Database;
use shared::NoteCalculator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub notes: NoteCalculator,
    pub catalog: Arc<dyn BookCatalog>,
}
