//! Avatar Studio Gateway — server-rendered landing, pricing and studio pages.
//! Store access goes through the privileged REST client; components round-trip via htmx and SSE.

mod pages;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use avatar_studio_core::{fetch_studio_data, ConfigError, RestStore, StorageUrls, StudioConfig};
use axum::{
    body::Body,
    extract::{ConnectInfo, Query, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{
        sse::{Event, Sse},
        Html, Response,
    },
    routing::get,
    Router,
};
use futures_util::stream::{self, Stream};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pages::FaqPage;

/// Longest text the reveal stream will animate.
const MAX_REVEAL_CHARS: usize = 280;

struct AppState {
    store: RestStore,
    storage: StorageUrls,
    avatar_bucket: String,
}

impl AppState {
    fn from_config(config: &StudioConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store: RestStore::privileged(config)?,
            storage: StorageUrls::new(config.public_url()?),
            avatar_bucket: config.avatar_bucket.clone(),
        })
    }
}

#[derive(Deserialize)]
struct StudioParams {
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    owner: Option<String>,
}

#[derive(Deserialize)]
struct FaqParams {
    page: String,
    index: usize,
    /// State the item was rendered in; the response is the toggled state.
    #[serde(default)]
    expanded: bool,
}

#[derive(Deserialize)]
struct RevealParams {
    text: String,
    #[serde(default)]
    duration: Option<f32>,
    #[serde(default)]
    blur: Option<bool>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(".env not loaded: {} (using system environment)", e);
    }

    let config = match StudioConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("cannot build store client: {}", e);
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/", get(landing))
        .route("/pricing", get(pricing))
        .route("/studio", get(studio))
        .route("/components/faq", get(faq_toggle))
        .route("/components/reveal/stream", get(reveal_stream))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_request));

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("cannot bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Avatar Studio gateway v{} listening on {}",
        avatar_studio_core::version(),
        config.bind_addr
    );

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("server error: {}", e);
    }
}

async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response {
    tracing::info!(
        client = %addr,
        method = %request.method(),
        path = request.uri().path(),
        "request"
    );
    next.run(request).await
}

async fn health() -> &'static str {
    "OK"
}

async fn landing() -> Html<String> {
    Html(pages::landing_page())
}

async fn pricing() -> Html<String> {
    Html(pages::pricing_page())
}

/// GET /studio?avatar=<id>&owner=<id>. Never fails: missing data renders as empty sections.
async fn studio(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StudioParams>,
) -> Html<String> {
    let avatar = non_blank(params.avatar.as_deref());
    let owner = non_blank(params.owner.as_deref());

    let data = fetch_studio_data(&state.store, avatar, owner).await;
    if data.is_degraded() {
        tracing::warn!(?avatar, ?owner, "studio rendered with degraded sections");
    }
    Html(pages::studio_page(&data, &state.storage, &state.avatar_bucket))
}

/// htmx fragment: one FAQ item re-rendered in the opposite of its current state.
async fn faq_toggle(
    Query(params): Query<FaqParams>,
) -> Result<Html<String>, (StatusCode, String)> {
    let page = FaqPage::parse(&params.page)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown page `{}`", params.page)))?;
    let mut item = pages::faq_item(page, params.index, params.expanded)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("no FAQ item {}", params.index)))?;
    item.toggle();
    Ok(Html(item.render()))
}

/// SSE: a mounted word reveal. Sends the hidden frame, the visible frame once the
/// reveal timer fires, then `done`. A disconnect drops the mount and cancels its timer.
async fn reveal_stream(
    Query(params): Query<RevealParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, String)> {
    if params.text.chars().count() > MAX_REVEAL_CHARS {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("text longer than {} characters", MAX_REVEAL_CHARS),
        ));
    }
    // SSE data lines cannot carry carriage returns.
    if params.text.contains('\r') {
        return Err((StatusCode::BAD_REQUEST, "text contains a carriage return".into()));
    }
    let reveal = pages::hero_reveal(
        &params.text,
        params.duration.unwrap_or(pages::HERO_DURATION_SECS),
        params.blur.unwrap_or(true),
    );
    let mounted = reveal.mount();

    let frames = stream::unfold((mounted, 0u8), |(mut mounted, step)| async move {
        let event = match step {
            0 => Event::default().event("reveal").data(mounted.render()),
            1 => {
                mounted.animated().await;
                Event::default().event("reveal").data(mounted.render())
            }
            2 => Event::default().event("done").data(""),
            _ => return None,
        };
        Some((Ok(event), (mounted, step + 1)))
    });
    Ok(Sse::new(frames))
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    async fn faq(
        page: &str,
        index: usize,
        expanded: bool,
    ) -> Result<Html<String>, (StatusCode, String)> {
        faq_toggle(Query(FaqParams {
            page: page.to_string(),
            index,
            expanded,
        }))
        .await
    }

    fn reveal_params(text: &str) -> RevealParams {
        RevealParams {
            text: text.to_string(),
            duration: None,
            blur: None,
        }
    }

    /// `(event, data)` pairs of an SSE body.
    fn sse_frames(body: &str) -> Vec<(String, String)> {
        body.split("\n\n")
            .filter(|frame| !frame.trim().is_empty())
            .map(|frame| {
                let mut event = String::new();
                let mut data = String::new();
                for line in frame.lines() {
                    if let Some(v) = line.strip_prefix("event:") {
                        event = v.trim().to_string();
                    } else if let Some(v) = line.strip_prefix("data:") {
                        data = v.trim_start().to_string();
                    }
                }
                (event, data)
            })
            .collect()
    }

    #[tokio::test]
    async fn faq_toggle_returns_opposite_state() {
        let Ok(Html(opened)) = faq("landing", 1, false).await else {
            panic!("landing item 1 should exist");
        };
        assert!(opened.contains(r#"data-expanded="true""#));
        assert!(opened.contains("expanded=true"));

        let Ok(Html(closed)) = faq("landing", 1, true).await else {
            panic!("landing item 1 should exist");
        };
        assert!(closed.contains(r#"data-expanded="false""#));
    }

    #[tokio::test]
    async fn faq_toggle_unknown_page_or_index_is_not_found() {
        let (status, _) = faq("blog", 0, false).await.err().unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, message) = faq("pricing", 99, false).await.err().unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "no FAQ item 99");
    }

    #[tokio::test]
    async fn reveal_stream_sends_hidden_visible_then_done() {
        let mut params = reveal_params("hello  world next");
        params.duration = Some(f32::NAN);
        let Ok(sse) = reveal_stream(Query(params)).await else {
            panic!("valid text should stream");
        };
        let bytes = axum::body::to_bytes(sse.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        let frames = sse_frames(&String::from_utf8(bytes.to_vec()).unwrap());

        let events: Vec<&str> = frames.iter().map(|(e, _)| e.as_str()).collect();
        assert_eq!(events, vec!["reveal", "reveal", "done"]);
        assert!(frames[0].1.contains(r#"data-animated="false""#));
        assert!(frames[0].1.contains("filter:blur(10px)"));
        assert!(frames[1].1.contains(r#"data-animated="true""#));
        assert!(frames[1].1.contains("transition:opacity 0s ease"));
        assert_eq!(frames[1].1.matches("opacity:1").count(), 3);
        assert_eq!(frames[2].1, "");
    }

    #[tokio::test]
    async fn reveal_stream_rejects_long_text_and_carriage_returns() {
        let long = "a".repeat(MAX_REVEAL_CHARS + 1);
        let (status, _) = reveal_stream(Query(reveal_params(&long))).await.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = reveal_stream(Query(reveal_params("hello\r\nworld")))
            .await
            .err()
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let at_limit = "a".repeat(MAX_REVEAL_CHARS);
        assert!(reveal_stream(Query(reveal_params(&at_limit))).await.is_ok());
    }
}
