use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::list;

pub async fn list_categories(State(state): State<AppState>) -> Result<Response, AppError> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(AppError::store("Failed to fetch categories"))?;

    Ok(list(categories, "Successfully fetched categories").into_response())
}

pub async fn list_organisations(State(state): State<AppState>) -> Result<Response, AppError> {
    let organisations = state
        .store
        .list_organisations()
        .await
        .map_err(AppError::store("Failed to fetch organisations"))?;

    Ok(list(organisations, "Successfully fetched organisations").into_response())
}
