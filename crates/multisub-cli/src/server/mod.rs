//! HTTP endpoint serving merged feeds.
//!
//! - `GET /sub/{id}` - merged base64 feed of one subscription set
//! - `GET /` - JSON index of sets with their public links

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use multisub::{Aggregator, PublicBaseUrl, SubscriptionSet};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;

/// Immutable snapshot shared by all requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    sets: Vec<SubscriptionSet>,
    aggregator: Aggregator,
    public_base_url: PublicBaseUrl,
}

impl AppState {
    /// Build the state from its parts.
    pub fn new(sets: Vec<SubscriptionSet>, aggregator: Aggregator, public_base_url: PublicBaseUrl) -> Self {
        Self {
            inner: Arc::new(StateInner {
                sets,
                aggregator,
                public_base_url,
            }),
        }
    }

    /// Snapshot the sets and settings of `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let aggregator = Aggregator::with_config(config.fetch_config())?;
        Ok(Self::new(config.sets.clone(), aggregator, config.public_base_url()))
    }

    fn find(&self, id: &str) -> Option<&SubscriptionSet> {
        self.inner.sets.iter().find(|set| set.id == id)
    }
}

/// One row of the index.
#[derive(Debug, Serialize)]
struct SetSummary {
    id: String,
    title: String,
    link: String,
    sources: usize,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/sub/{id}", get(subscription))
        .with_state(state)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, sets = state.inner.sets.len(), "Serving subscription feeds");
    }
    axum::serve(listener, router(state)).await
}

async fn subscription(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(set) = state.find(&id) else {
        debug!(id = %id, "Unknown subscription set");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let feed = state.inner.aggregator.aggregate(&set.urls).await;

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "inline"),
        ],
        feed.into_string(),
    )
        .into_response()
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Json<Vec<SetSummary>> {
    let scheme = header_str(&headers, "x-forwarded-proto").unwrap_or("http");
    let host = header_str(&headers, header::HOST.as_str()).unwrap_or("localhost");

    let summaries = state
        .inner
        .sets
        .iter()
        .map(|set| SetSummary {
            id: set.id.clone(),
            title: set.title.clone(),
            link: state.inner.public_base_url.link_for(scheme, host, &set.id),
            sources: set.urls.len(),
        })
        .collect();

    Json(summaries)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
