use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument};

use crate::{
    accounts::session::SessionUser,
    error::AppError,
    flash::{self, Flashes},
    state::AppState,
    tasks::{
        dto::{partition, TaskForm},
        repo::Task,
    },
    views,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/edit/:task_id/", get(edit_page))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/add/", post(add))
        .route("/edit/:task_id/", post(edit))
        .route("/complete/:task_id/", get(complete))
        .route("/delete/:task_id/", get(delete))
        .route("/undo/:task_id/", get(undo_delete))
}

#[instrument(skip(state, flashes))]
pub async fn index(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let tasks = Task::list_for_account(&state.db, account_id).await?;
    let partitions = partition(tasks);
    Ok((
        [(header::SET_COOKIE, flash::clear_cookie())],
        Html(views::index_page(&partitions, &flashes.0)),
    )
        .into_response())
}

#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    let due_date = form.parse_due_date()?;
    let task = Task::create(&state.db, account_id, &form.title, &form.description, due_date).await?;
    info!(%account_id, task_id = task.id, "task created");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn edit_page(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Path(task_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let task = Task::find_for_account(&state.db, task_id, account_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Html(views::edit_page(&task)))
}

#[instrument(skip(state, form))]
pub async fn edit(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Path(task_id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    // Resolve the task before parsing the date, so a miss is a 404 even
    // when the submitted due date is malformed.
    Task::find_for_account(&state.db, task_id, account_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let due_date = form.parse_due_date()?;
    Task::update(
        &state.db,
        task_id,
        account_id,
        &form.title,
        &form.description,
        due_date,
    )
    .await?;

    info!(%account_id, task_id, "task updated");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn complete(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Path(task_id): Path<i64>,
) -> Result<Redirect, AppError> {
    Task::complete(&state.db, task_id, account_id)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(%account_id, task_id, "task completed");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Path(task_id): Path<i64>,
) -> Result<Redirect, AppError> {
    Task::set_deleted(&state.db, task_id, account_id, true)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(%account_id, task_id, "task soft-deleted");
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn undo_delete(
    State(state): State<AppState>,
    SessionUser(account_id): SessionUser,
    Path(task_id): Path<i64>,
) -> Result<Redirect, AppError> {
    Task::set_deleted(&state.db, task_id, account_id, false)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(%account_id, task_id, "task restored");
    Ok(Redirect::to("/"))
}
