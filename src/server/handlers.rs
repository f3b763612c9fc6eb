//! Request handlers for every endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::assistant::SessionSnapshot;
use crate::catalog::{ProcessStep, Service, TeamMember};
use crate::insight::InsightState;
use crate::server::types::{
    ContactRequest, ContactResponse, ErrorResponse, SendMessageRequest, SessionCreatedResponse,
    StatusResponse,
};
use crate::server::AppState;

/// Acknowledgement shown after a contact transmission.
pub const CONTACT_ACK: &str =
    "A senior strategist will review your project parameters and contact you shortly.";

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
}

fn not_found(message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

pub async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.services().to_vec())
}

/// Unknown segments bounce to the home page rather than erroring.
pub async fn get_service(State(state): State<AppState>, Path(segment): Path<String>) -> Response {
    match state.catalog.service_by_segment(&segment) {
        Some(service) => Json(service.clone()).into_response(),
        None => Redirect::temporary("/").into_response(),
    }
}

pub async fn list_team(State(state): State<AppState>) -> Json<Vec<TeamMember>> {
    Json(state.catalog.team().to_vec())
}

pub async fn get_team_member(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.team_member(&id) {
        Some(member) => Json(member.clone()).into_response(),
        None => Redirect::temporary("/").into_response(),
    }
}

pub async fn get_process(State(state): State<AppState>) -> Json<Vec<ProcessStep>> {
    Json(state.catalog.process().to_vec())
}

/// Contact stub: validates the submission and acknowledges it. Delivery is
/// handled offline by the studio.
pub async fn submit_contact(
    Json(form): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    for (field, value) in [
        ("name", &form.name),
        ("email", &form.email),
        ("brief", &form.brief),
    ] {
        if value.trim().is_empty() {
            return Err(bad_request(format!("{field} is required")));
        }
    }
    if !form.email.contains('@') {
        return Err(bad_request("email is invalid".to_string()));
    }

    info!(name = %form.name, service = ?form.service, "contact transmission received");
    Ok(Json(ContactResponse {
        message: CONTACT_ACK,
    }))
}

pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let (id, snapshot) = state.assistant.create_session().await;
    Json(SessionCreatedResponse { id, snapshot })
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .assistant
        .snapshot(id)
        .await
        .map(Json)
        .ok_or_else(|| not_found("unknown session"))
}

pub async fn open_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .assistant
        .open(id)
        .await
        .map(Json)
        .ok_or_else(|| not_found("unknown session"))
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .assistant
        .close(id)
        .await
        .map(Json)
        .ok_or_else(|| not_found("unknown session"))
}

/// The widget's send action. Resolves once the turn settles; rejected
/// submissions come back as the unchanged snapshot.
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .assistant
        .send_message(id, &body.text)
        .await
        .map(Json)
        .ok_or_else(|| not_found("unknown session"))
}

pub async fn end_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.assistant.end_session(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Triggers (or reuses) the insight for a service. The response carries the
/// settled state for a fresh call and `pending` for a coalesced one.
pub async fn request_insight(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<InsightState>, ApiError> {
    let service = state
        .catalog
        .service_by_segment(&segment)
        .ok_or_else(|| not_found("unknown service"))?;
    let outcome = state
        .insights
        .request(&service.id, &service.title, &service.full_description)
        .await;
    Ok(Json(outcome))
}

pub async fn get_insight(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<InsightState>, ApiError> {
    let service = state
        .catalog
        .service_by_segment(&segment)
        .ok_or_else(|| not_found("unknown service"))?;
    Ok(Json(state.insights.status(&service.id).await))
}
