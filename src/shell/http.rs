use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::adapters::inbound::http as schedule_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/assignments", post(schedule_http::create_assignment))
        .route(
            "/assignments/{id}",
            patch(schedule_http::reschedule_assignment).delete(schedule_http::delete_assignment),
        )
        .route(
            "/sections/{id}/assignments",
            get(schedule_http::list_section_assignments),
        )
        .route(
            "/professors/{id}/assignments",
            get(schedule_http::list_professor_assignments),
        )
        .route(
            "/rooms/{id}/assignments",
            get(schedule_http::list_room_assignments),
        )
        .route("/sections/{id}/grid", get(schedule_http::section_grid))
        .route("/professors/{id}/grid", get(schedule_http::professor_grid))
        .route("/rooms/{id}/grid", get(schedule_http::room_grid))
        .route("/sections/{id}/export", get(schedule_http::export_section))
        .route(
            "/sections/{id}/available-professors",
            get(schedule_http::available_professors),
        )
        .route(
            "/sections/{id}/available-rooms",
            get(schedule_http::available_rooms),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
