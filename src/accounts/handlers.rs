use axum::{
    extract::{FromRef, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::{LoginForm, RegisterForm},
        password,
        repo::Account,
        session::{self, SessionKeys, SessionUser},
    },
    error::AppError,
    flash::{self, Flashes, Level},
    state::AppState,
    views,
};

pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", get(register_page).post(register))
        .route("/login/", get(login_page).post(login))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout/", get(logout))
}

#[instrument(skip(flashes))]
pub async fn register_page(flashes: Flashes) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, flash::clear_cookie())],
        Html(views::register_page(&flashes.0)),
    )
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if form.password != form.password2 {
        warn!(username = %form.username, "registration password mismatch");
        return Err(AppError::Validation("Passwords do not match"));
    }

    if Account::find_by_username(&state.db, &form.username)
        .await?
        .is_some()
    {
        warn!(username = %form.username, "username already taken");
        return Err(AppError::Conflict("Username already exists"));
    }

    let hash = password::hash(&form.password)?;
    let account = Account::create(&state.db, &form.username, &form.email, &hash).await?;

    info!(account_id = %account.id, username = %account.username, "account registered");
    Ok(flash::redirect_with(
        "/login/",
        Level::Success,
        "Account created successfully!",
    ))
}

#[instrument(skip(flashes))]
pub async fn login_page(flashes: Flashes) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, flash::clear_cookie())],
        Html(views::login_page(&flashes.0)),
    )
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(account) = Account::find_by_username(&state.db, &form.username).await? else {
        warn!(username = %form.username, "login unknown username");
        return Err(AppError::Authentication);
    };

    if !password::verify(&form.password, &account.password_hash)? {
        warn!(account_id = %account.id, "login invalid password");
        return Err(AppError::Authentication);
    }

    let keys = SessionKeys::from_ref(&state);
    let token = keys.sign(account.id)?;

    info!(account_id = %account.id, username = %account.username, "account logged in");
    Ok((
        [(header::SET_COOKIE, session::session_cookie(&token, keys.ttl))],
        Redirect::to("/"),
    )
        .into_response())
}

#[instrument]
pub async fn logout(SessionUser(account_id): SessionUser) -> impl IntoResponse {
    info!(%account_id, "account logged out");
    (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        Redirect::to("/login/"),
    )
}
