use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub task_name: String,
    pub task_description: String,
    pub status: String,  // free text, stored as submitted
    pub owner_username: String,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_name: String,
    pub task_description: String,
    pub status: String,
    pub owner_username: String,
}
