pub mod manager;
pub mod store;

pub use manager::{Mode, QueueManager};
pub use store::{DeckStore, Slot};
