use std::num::IntErrorKind;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};

use crate::models::{EventDetail, EventSummary};
use crate::presentation::{EventCard, EventPage};
use crate::state::AppState;
use crate::store::{EventFilter, SearchParams};
use crate::utils::error::AppError;
use crate::utils::response::{list, search, success};

const RELATED_EVENTS_LIMIT: usize = 3;

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}

/// Any integer is a well-formed id. Integers no row can have are not found.
fn parse_event_id(raw: &str) -> Result<i32, AppError> {
    let id = raw.trim().parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => event_not_found(),
        _ => AppError::ValidationError("Invalid event ID".to_string()),
    })?;

    i32::try_from(id).map_err(|_| event_not_found())
}

async fn load_event(state: &AppState, raw_id: &str) -> Result<EventDetail, AppError> {
    let id = parse_event_id(raw_id)?;

    state
        .store
        .find_event(id)
        .await
        .map_err(AppError::store("Failed to fetch event details"))?
        .ok_or_else(event_not_found)
}

fn cards(state: &AppState, events: Vec<EventSummary>) -> Vec<EventCard> {
    let now = state.now();
    events
        .into_iter()
        .map(|event| EventCard::new(event, now))
        .collect()
}

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state
        .store
        .list_active_events()
        .await
        .map_err(AppError::store("Failed to fetch event list"))?;

    tracing::debug!(count = events.len(), "Fetched active events");

    Ok(list(cards(&state, events), "Successfully fetched event list").into_response())
}

pub async fn search_events(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params?;
    let filter = EventFilter::from_params(&params)?;
    tracing::debug!(?filter, "Search filters");

    let events = state
        .store
        .search_events(&filter)
        .await
        .map_err(AppError::store("Failed to search events"))?;

    tracing::debug!(count = events.len(), "Search completed");

    Ok(search(cards(&state, events), filter, "Search completed").into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = load_event(&state, &id).await?;
    let page = EventPage::new(event, state.now());

    Ok(success(page, "Successfully fetched event details").into_response())
}

/// Other active events in the same category, earliest first.
pub async fn related_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = load_event(&state, &id).await?;

    let related = match event.category_id {
        Some(category_id) => state
            .store
            .search_events(&EventFilter::by_category(category_id))
            .await
            .map_err(AppError::store("Failed to fetch related events"))?
            .into_iter()
            .filter(|candidate| candidate.id != event.id)
            .take(RELATED_EVENTS_LIMIT)
            .collect(),
        None => Vec::new(),
    };

    Ok(list(cards(&state, related), "Successfully fetched related events").into_response())
}
