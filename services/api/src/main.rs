use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gabc_core::{Deadline, GabcError, Syllabifier, CODE_BLANK_FIELD, CODE_INVALID_JSON};
use gabc_preface::{handle_preface, ErrorResponse, Generator, PrefaceRequest, PrefaceResponse};
use gabc_syllabifier::{DictionarySyllabifier, StorePaths};

mod config;

use config::ServerConfig;

#[derive(Clone)]
struct AppState {
    generator: Generator,
    timeout: Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let store = Arc::new(DictionarySyllabifier::new(StorePaths::in_dir(&config.dict_dir)));
    store
        .load()
        .with_context(|| format!("failed loading syllable dictionaries from {}", config.dict_dir.display()))?;

    let state = AppState { generator: Generator::new(store), timeout: config.timeout };
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed binding {}", config.addr))?;
    info!("listening on http://{}", config.addr);
    axum::serve(listener, app(state)).await.context("server stopped")?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/preface", post(preface))
        .with_state(state)
}

async fn ping() -> &'static str {
    "pong"
}

fn reply(status: StatusCode, error_code: u16, error_message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error_code, error_message: error_message.into() })).into_response()
}

fn error_reply(e: &GabcError) -> Response {
    let status = match e {
        GabcError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %e, "preface generation failed");
    }
    (status, Json(ErrorResponse::from(e))).into_response()
}

async fn preface(State(state): State<AppState>, body: Bytes) -> Response {
    let req: PrefaceRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return reply(StatusCode::BAD_REQUEST, CODE_INVALID_JSON, format!("invalid request body: {e}")),
    };
    if req.text.trim().is_empty() {
        return reply(StatusCode::BAD_REQUEST, CODE_BLANK_FIELD, "field \"text\" must not be blank");
    }

    let deadline = Deadline::after(state.timeout);
    let generator = state.generator.clone();
    let job = {
        let deadline = deadline.clone();
        tokio::task::spawn_blocking(move || handle_preface(&generator, &req, &deadline))
    };

    match tokio::time::timeout(state.timeout, job).await {
        Ok(Ok(Ok(resp))) => (StatusCode::OK, Json::<PrefaceResponse>(resp)).into_response(),
        Ok(Ok(Err(e))) => error_reply(&e),
        Ok(Err(join)) => {
            error!(error = %join, "generation task failed");
            reply(StatusCode::INTERNAL_SERVER_ERROR, 500, "internal error")
        }
        Err(_) => {
            deadline.cancel();
            warn!(timeout = ?state.timeout, "preface generation timed out");
            error_reply(&GabcError::Timeout)
        }
    }
}
