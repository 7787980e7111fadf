mod user;
mod forms;
mod task;
mod responses;

pub use user::{NewUser, User};
pub use forms::{LoginForm, RegisterForm, TaskRequest};
pub use task::{NewTask, Task};
pub use responses::{RegisterResponse, TaskCreated, TokenResponse};
