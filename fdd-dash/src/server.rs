//! HTTP surface: the page, its script, and the JSON API the page calls.

use crate::config::ServerConfig;
use crate::context::SharedContext;
use crate::controller::{Controller, Outputs, Update};
use crate::controls::{ControlChange, ControlState, Panel, Tab};
use crate::error::Error;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use fdd_core::chart_kind::ChartKind;
use fdd_core::date_range::DateRange;
use fdd_core::flight::DelayColumn;
use fdd_core::reduction::Reduction;
use fdd_data::group::TimeUnit;
use fdd_db::models::DatasetSummary;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const DASHBOARD_JS: &str = include_str!("../assets/dashboard.js");

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct ServerState {
    context: SharedContext,
}

/// A selectable value and the text shown for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Choice {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Everything the page needs to draw its controls.
#[derive(Debug, Clone, Serialize)]
pub struct ControlOptions {
    pub carriers: Vec<Choice>,
    pub date_bounds: Option<DateRange>,
    pub delay_columns: Vec<Choice>,
    pub methods: Vec<Choice>,
    pub chart_kinds: Vec<Choice>,
    pub time_units: Vec<Choice>,
    pub tabs: Vec<Choice>,
    pub panels: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlsResponse {
    pub state: ControlState,
    pub options: ControlOptions,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub state: ControlState,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub outputs: Outputs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    pub state: ControlState,
    pub change: ControlChange,
}

/// `Json` whose rejections answer with the API's `{"error": ...}` body.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

pub fn router(context: SharedContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/assets/dashboard.js", get(dashboard_js))
        .route("/api/controls", get(controls))
        .route("/api/render", post(render))
        .route("/api/update", post(update))
        .route("/api/reload", post(reload))
        .layer(
            // Lets graceful shutdown finish even if a client stalls
            TimeoutLayer::new(REQUEST_TIMEOUT),
        )
        .with_state(ServerState { context })
}

/// Serve the dashboard until Ctrl-C.
pub async fn serve(config: &ServerConfig, context: SharedContext) -> Result<(), Error> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|cause| Error::IO {
            message: format!("Failed to listen on {}", config.addr),
            cause,
        })?;
    let local = listener.local_addr().map_err(|cause| Error::IO {
        message: "Failed to read local address".to_string(),
        cause,
    })?;
    log::info!("server: dashboard listening on http://{}", local);
    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|cause| Error::IO {
            message: "Server stopped with an error".to_string(),
            cause,
        })?;
    log::info!("server: shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("server: failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("server: starting graceful shutdown...");
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}

async fn controls(State(state): State<ServerState>) -> Json<ControlsResponse> {
    let context = state.context.current();
    let carriers = context
        .carrier_codes()
        .iter()
        .map(|code| Choice::new(code.as_str(), context.carriers().display_name(code)))
        .collect();
    let options = ControlOptions {
        carriers,
        date_bounds: context.bounds(),
        delay_columns: DelayColumn::ALL
            .iter()
            .map(|c| Choice::new(c.column_name(), c.label()))
            .collect(),
        methods: Reduction::ALL
            .iter()
            .map(|m| Choice::new(m.name(), m.label()))
            .collect(),
        chart_kinds: ChartKind::ALL
            .iter()
            .map(|k| Choice::new(k.name(), k.name()))
            .collect(),
        time_units: TimeUnit::ALL
            .iter()
            .map(|u| Choice::new(u.name(), u.label()))
            .collect(),
        tabs: vec![
            Choice::new(Tab::Charts.name(), "Charts"),
            Choice::new(Tab::Map.name(), "Airport Map"),
        ],
        panels: Panel::ALL
            .iter()
            .map(|p| Choice::new(p.name(), p.label()))
            .collect(),
    };
    Json(ControlsResponse {
        state: ControlState::defaults(&context),
        options,
    })
}

async fn render(
    State(state): State<ServerState>,
    ApiJson(request): ApiJson<RenderRequest>,
) -> Result<Json<RenderResponse>, Error> {
    let context = state.context.current();
    let outputs = tokio::task::spawn_blocking(move || {
        Controller::new(context).render_all(&request.state)
    })
    .await??;
    Ok(Json(RenderResponse { outputs }))
}

async fn update(
    State(state): State<ServerState>,
    ApiJson(request): ApiJson<UpdateRequest>,
) -> Result<Json<Update>, Error> {
    let context = state.context.current();
    let update = tokio::task::spawn_blocking(move || {
        Controller::new(context).update(request.state, request.change)
    })
    .await??;
    Ok(Json(update))
}

async fn reload(State(state): State<ServerState>) -> Result<Json<DatasetSummary>, Error> {
    let current = state.context.current();
    let (fresh, summary) = tokio::task::spawn_blocking(move || {
        let fresh = current.reload()?;
        let summary = fresh.db().summary()?;
        Ok::<_, anyhow::Error>((fresh, summary))
    })
    .await??;
    state.context.replace(fresh);
    log::info!("server: reloaded {} flights", summary.flights);
    Ok(Json(summary))
}
