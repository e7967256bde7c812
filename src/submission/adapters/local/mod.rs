//! In-process adapters bridging to the task service.

mod task_client;

pub use task_client::InProcessTaskClient;
