use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};

use crate::{
    AppState,
    error::AppResult,
    models::{Film, FilmRequest, User, UserRequest},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/films", get(list_films).post(create_film).put(update_film))
        .route("/users", get(list_users).post(create_user).put(update_user))
        .with_state(state)
}

pub async fn list_films(State(state): State<Arc<AppState>>) -> Json<Vec<Film>> {
    Json(state.films.find_all().await)
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FilmRequest>, JsonRejection>,
) -> AppResult<Json<Film>> {
    let Json(req) = body?;
    Ok(Json(state.films.create(req).await?))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FilmRequest>, JsonRejection>,
) -> AppResult<Json<Film>> {
    let Json(req) = body?;
    Ok(Json(state.films.update(req).await?))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.users.find_all().await)
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(req) = body?;
    Ok(Json(state.users.create(req).await?))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(req) = body?;
    Ok(Json(state.users.update(req).await?))
}
