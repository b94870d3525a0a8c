//! HTTP endpoints for rendering YAML and TSV text.
//!
//! - `POST /api/v1/yaml` renders a YAML document.
//! - `POST /api/v1/tsv` renders tab separated values.
//!
//! Both accept a JSON body `{"text": "..."}` and answer with an HTML fragment.

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use log::{info, warn};
use serde::Deserialize;

use crate::error::YamlTableError;
use crate::tsv::{TsvRenderer, TsvRendererOptions};

/// Body of a 400 response for YAML that cannot be rendered.
pub const YAML_ERROR_MESSAGE: &str = "Unable to parse YAML";

#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Address to listen on.
    pub listen: SocketAddr,
    /// Options for the TSV endpoint.
    pub tsv: TsvRendererOptions,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Clone)]
struct AppState {
    tsv: TsvRendererOptions,
}

/// Builds the router with both endpoints.
pub fn router(tsv: TsvRendererOptions) -> Router {
    Router::new()
        .route("/api/v1/yaml", post(render_yaml))
        .route("/api/v1/tsv", post(render_tsv))
        .with_state(AppState { tsv })
}

/// Serves the router until the process is stopped.
pub async fn serve(options: ServerOptions) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(options.listen).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(options.tsv)).await?;
    Ok(())
}

async fn render_yaml(Json(req): Json<RenderRequest>) -> Response {
    if req.text.is_empty() {
        return html_response(String::new());
    }
    info!("yaml render request ({} bytes)", req.text.len());
    match crate::render_string(req.text.as_bytes()) {
        Ok(html) => html_response(html),
        Err(err) => yaml_error_response(&err),
    }
}

/// Both error kinds answer 400; only the log line tells them apart.
fn yaml_error_response(err: &YamlTableError) -> Response {
    if err.is_shape_error() {
        warn!("yaml render rejected a record list element: {}", err);
    } else {
        warn!("yaml decode failed: {}", err);
    }
    (StatusCode::BAD_REQUEST, YAML_ERROR_MESSAGE).into_response()
}

async fn render_tsv(State(state): State<AppState>, Json(req): Json<RenderRequest>) -> Response {
    if req.text.is_empty() {
        return html_response(String::new());
    }
    info!("tsv render request ({} bytes)", req.text.len());
    match TsvRenderer::new(state.tsv).render_sanitized(&req.text) {
        Ok(html) => html_response(html),
        Err(err) => {
            warn!("tsv render failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

fn html_response(html: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}
