//! Contact directory handlers (add, search)

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::{AddContactRequest, SearchContactsRequest, SearchContactsResponse, StatusResponse};
use crate::error::ApiError;
use crate::extract::{validated, CurrentSession};
use crate::response::respond;
use crate::state::AppState;

const ADD_FAILED: &str = "Failed to add contact";
const SEARCH_FAILED: &str = "Failed to scan neural grid";

/// POST /AddContact
pub async fn add_contact(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<AddContactRequest>, JsonRejection>,
) -> Json<StatusResponse> {
    respond(try_add(&state, &session, payload).await, ADD_FAILED)
}

/// POST /SearchContacts
pub async fn search_contacts(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<SearchContactsRequest>, JsonRejection>,
) -> Json<SearchContactsResponse> {
    respond(try_search(&state, &session, payload).await, SEARCH_FAILED)
}

async fn try_add(
    state: &AppState,
    session: &CurrentSession,
    payload: Result<Json<AddContactRequest>, JsonRejection>,
) -> Result<StatusResponse, ApiError> {
    let request = validated(payload)?;
    let owner = session.require(request.user_id)?;
    state.contacts.add(owner, request.user_id, &request.contact).await?;
    Ok(StatusResponse::ok())
}

async fn try_search(
    state: &AppState,
    session: &CurrentSession,
    payload: Result<Json<SearchContactsRequest>, JsonRejection>,
) -> Result<SearchContactsResponse, ApiError> {
    let request = validated(payload)?;
    let owner = session.require(request.user_id)?;
    let results = state.contacts.search(owner, request.user_id, &request.search).await?;
    Ok(SearchContactsResponse {
        results,
        error: String::new(),
    })
}
