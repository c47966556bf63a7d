// HTTP inbound adapter for the assignment orchestrator.
//
// Responsibilities
// - Translate json bodies and query strings into commands and query calls.
// - Map application errors onto status codes: 404 unknown assignment, 409 blocked by
//   conflicts, 422 invalid input, 500 for backend failures.
//
// Times travel as "HH:MM" (seconds are accepted and ignored by scheduling).
// Availability searches take the class length in minutes, 1 to a full day.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use tracing::error;

use crate::application::errors::ApplicationError;
use crate::application::query_handlers::schedule_grid_queries::GridScope;
use crate::core::ports::RepositoryError;
use crate::core::schedule::assignment::DayOfWeek;
use crate::core::schedule::decider::create::command::CreateAssignment;
use crate::core::schedule::decider::decision::DecideError;
use crate::core::schedule::decider::reschedule::command::RescheduleAssignment;
use crate::core::schedule::export::{DocumentFormat, ExportHeader};
use crate::core::schedule::grid::GridMatrix;
use crate::core::schedule::grid_view::{CellRef, active_cells};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateAssignmentBody {
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub professor_id: String,
    pub professor_name: String,
    pub room_id: String,
    pub room_code: String,
    pub section_id: String,
    pub course_id: String,
    pub course_name: String,
}

#[derive(Deserialize)]
pub struct RescheduleAssignmentBody {
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize)]
pub struct ExportParams {
    pub program_code: String,
    pub program_name: String,
    pub track_label: String,
    pub section_label: String,
    pub format: Option<DocumentFormat>,
}

#[derive(Deserialize)]
pub struct AvailableProfessorsParams {
    pub needed_minutes: u32,
}

#[derive(Deserialize)]
pub struct AvailableRoomsParams {
    pub professor_id: String,
    pub needed_minutes: u32,
}

const MAX_NEEDED_MINUTES: u32 = 24 * 60;

#[derive(Serialize)]
pub struct GridResponse {
    pub matrix: GridMatrix,
    pub active_now: BTreeSet<CellRef>,
    /// How often the client should refresh `active_now`.
    pub active_now_refresh_secs: u64,
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn invalid_time(value: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": format!("invalid time of day: {value}") })),
    )
        .into_response()
}

fn invalid_needed_minutes(needed_minutes: u32) -> Option<Response> {
    if (1..=MAX_NEEDED_MINUTES).contains(&needed_minutes) {
        return None;
    }
    Some(
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("needed_minutes must be between 1 and {MAX_NEEDED_MINUTES}, got {needed_minutes}")
            })),
        )
            .into_response(),
    )
}

/// Quotes and backslashes would end the quoted filename early; anything outside printable
/// ascii is not a valid header byte.
fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

fn error_response(err: ApplicationError) -> Response {
    let message = err.to_string();
    match err {
        ApplicationError::Repository(RepositoryError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
        }
        ApplicationError::Domain(DecideError::Conflicting(conflicts)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": message, "conflicts": conflicts })),
        )
            .into_response(),
        ApplicationError::Domain(DecideError::InvalidInterval) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": message })),
        )
            .into_response(),
        other => {
            error!(error = %other, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn create_assignment(
    State(state): State<AppState>,
    body: Result<Json<CreateAssignmentBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let Some(start_time) = parse_clock(&body.start_time) else {
        return invalid_time(&body.start_time);
    };
    let Some(end_time) = parse_clock(&body.end_time) else {
        return invalid_time(&body.end_time);
    };

    let command = CreateAssignment {
        day_of_week: body.day_of_week,
        start_time,
        end_time,
        professor_id: body.professor_id,
        professor_name: body.professor_name,
        room_id: body.room_id,
        room_code: body.room_code,
        section_id: body.section_id,
        course_id: body.course_id,
        course_name: body.course_name,
    };

    match state.create_handler.handle(command).await {
        Ok(assignment) => (StatusCode::CREATED, Json(assignment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn reschedule_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
    body: Result<Json<RescheduleAssignmentBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    let mut command = RescheduleAssignment {
        assignment_id,
        day_of_week: body.day_of_week,
        start_time: None,
        end_time: None,
    };
    if let Some(value) = body.start_time {
        match parse_clock(&value) {
            Some(time) => command.start_time = Some(time),
            None => return invalid_time(&value),
        }
    }
    if let Some(value) = body.end_time {
        match parse_clock(&value) {
            Some(time) => command.end_time = Some(time),
            None => return invalid_time(&value),
        }
    }

    match state.reschedule_handler.handle(command).await {
        Ok(assignment) => Json(assignment).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
) -> Response {
    match state.delete_handler.handle(&assignment_id).await {
        Ok(removed) => Json(removed).into_response(),
        Err(err) => error_response(err),
    }
}

async fn list_assignments(state: AppState, scope: GridScope, id: &str) -> Response {
    let queries = &state.assignment_queries;
    let result = match scope {
        GridScope::Section => queries.list_by_section(id).await,
        GridScope::Professor => queries.list_by_professor(id).await,
        GridScope::Room => queries.list_by_room(id).await,
    };
    match result {
        Ok(assignments) => Json(assignments).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_section_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    list_assignments(state, GridScope::Section, &id).await
}

pub async fn list_professor_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    list_assignments(state, GridScope::Professor, &id).await
}

pub async fn list_room_assignments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    list_assignments(state, GridScope::Room, &id).await
}

async fn grid(state: AppState, scope: GridScope, id: &str) -> Response {
    match state.grid_queries.grid(scope, id).await {
        Ok(matrix) => {
            let active_now = active_cells(&matrix, Local::now().naive_local());
            let active_now_refresh_secs =
                state.grid_queries.config().active_now_period.as_secs();
            Json(GridResponse {
                matrix,
                active_now,
                active_now_refresh_secs,
            })
            .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub async fn section_grid(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    grid(state, GridScope::Section, &id).await
}

pub async fn professor_grid(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    grid(state, GridScope::Professor, &id).await
}

pub async fn room_grid(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    grid(state, GridScope::Room, &id).await
}

pub async fn export_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Query(params): Query<ExportParams>,
) -> Response {
    let export_header = ExportHeader {
        program_code: params.program_code,
        program_name: params.program_name,
        track_label: params.track_label,
        section_label: params.section_label,
    };
    let format = params.format.unwrap_or_default();
    match state
        .grid_queries
        .export(&section_id, &export_header, format)
        .await
    {
        Ok(file) => (
            [
                (header::CONTENT_TYPE, file.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    attachment_disposition(&file.file_name),
                ),
            ],
            file.bytes,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn available_professors(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Query(params): Query<AvailableProfessorsParams>,
) -> Response {
    if let Some(rejection) = invalid_needed_minutes(params.needed_minutes) {
        return rejection;
    }
    match state
        .assignment_queries
        .find_available_professors(&section_id, params.needed_minutes)
        .await
    {
        Ok(candidates) => Json(candidates).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn available_rooms(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
    Query(params): Query<AvailableRoomsParams>,
) -> Response {
    if let Some(rejection) = invalid_needed_minutes(params.needed_minutes) {
        return rejection;
    }
    match state
        .assignment_queries
        .find_available_rooms(&section_id, &params.professor_id, params.needed_minutes)
        .await
    {
        Ok(candidates) => Json(candidates).into_response(),
        Err(err) => error_response(err),
    }
}
