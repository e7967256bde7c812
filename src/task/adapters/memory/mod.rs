//! In-memory task adapters.

mod history;
mod task;

pub use history::InMemoryTaskHistoryRepository;
pub use task::InMemoryTaskRepository;
