use axum::{
    extract::{Extension, State},
    response::Json,
};
use crate::app::AppState;
use crate::errors::AppResult;
use crate::extract::AppJson;
use crate::middleware::CurrentUser;
use crate::models::{NewTask, Task, TaskCreated, TaskRequest};

pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    AppJson(request): AppJson<TaskRequest>,
) -> AppResult<Json<TaskCreated>> {
    tracing::debug!("Creating task '{}' for user: {}", request.task_name, user.username);

    // Owner always comes from the token, never from the body
    let task = state
        .db
        .create_task(NewTask {
            task_name: request.task_name,
            task_description: request.task_description,
            status: request.status,
            owner_username: user.username,
        })
        .await?;

    tracing::info!("Saved task {} for user: {}", task.id, task.owner_username);
    Ok(Json(TaskCreated {
        message: "Task saved successfully",
        id: task.id,
    }))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.db.list_tasks(&user.username).await?;
    tracing::debug!("Found {} tasks for user: {}", tasks.len(), user.username);
    Ok(Json(tasks))
}
