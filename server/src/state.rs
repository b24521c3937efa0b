use moodnotes_core::NoteStore;

#[derive(Clone)]
pub struct AppState {
    pub store: NoteStore, // Shared for the whole process, never rebuilt per request
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}
