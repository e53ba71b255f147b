use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use server_api::{apply_option, brew_coffee, ApiContext};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{BrewForm, BrewResponseWire, OptionForm, OptionResponse, METHOD_MAKE_COFFEE},
};
use tracing::info;
use uuid::Uuid;

mod config;
mod page;

use config::load_settings;
use page::render_machine_page;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
    csrf_token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let state = AppState {
        api: ApiContext::new(),
        csrf_token: Uuid::new_v4().to_string(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "coffee machine listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(machine_page).post(make_coffee))
        .route("/ajax/", post(ajax_options))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn machine_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_machine_page(&state.csrf_token))
}

async fn make_coffee(
    State(state): State<Arc<AppState>>,
    Form(form): Form<BrewForm>,
) -> Result<Json<BrewResponseWire>, (StatusCode, Json<ApiError>)> {
    check_csrf(&state, &form.csrfmiddlewaretoken)?;
    if form.method != METHOD_MAKE_COFFEE {
        return Err(error_response(ApiError::new(
            ErrorCode::Validation,
            format!("unsupported method '{}'", form.method),
        )));
    }

    let wire = brew_coffee(&state.api, &form.coffee_type)
        .await
        .map_err(error_response)?;
    Ok(Json(wire))
}

async fn ajax_options(
    State(state): State<Arc<AppState>>,
    Form(form): Form<OptionForm>,
) -> Result<Json<OptionResponse>, (StatusCode, Json<ApiError>)> {
    check_csrf(&state, &form.csrfmiddlewaretoken)?;

    let action = apply_option(&state.api, &form.method)
        .await
        .map_err(error_response)?;
    Ok(Json(OptionResponse { action }))
}

fn check_csrf(state: &AppState, token: &str) -> Result<(), (StatusCode, Json<ApiError>)> {
    if token != state.csrf_token {
        return Err(error_response(ApiError::new(
            ErrorCode::Forbidden,
            "CSRF token missing or incorrect",
        )));
    }
    Ok(())
}

fn error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
