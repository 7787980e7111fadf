mod auth;
mod task;

pub use auth::{handle_login, handle_register};
pub use task::{create_task, list_tasks};
