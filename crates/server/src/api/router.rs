use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{openapi::ApiDoc, state::AppState};

use super::handlers;

pub fn create_router(state: AppState) -> (Router, utoipa::openapi::OpenApi) {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::list_downloads, handlers::create_download))
        .routes(routes!(handlers::get_download, handlers::delete_download))
        .routes(routes!(handlers::pause_download))
        .routes(routes!(handlers::resume_download))
        .routes(routes!(handlers::list_categories))
        .routes(routes!(handlers::list_reminders, handlers::create_reminder))
        .routes(routes!(handlers::update_reminder, handlers::delete_reminder))
        .routes(routes!(handlers::trigger_sync))
        .routes(routes!(handlers::health_check))
        .with_state(state)
        .split_for_parts();

    (router, api)
}
