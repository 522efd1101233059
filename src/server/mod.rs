//! HTTP server rendering pages on request

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cms::ContentSource;
use crate::error::Error;
use crate::pagination::{self, Cursor};
use crate::templates::{PostCard, TemplateRenderer};
use crate::SpaceTraveling;

/// Server state shared by all handlers
pub struct ServerState {
    source: Arc<dyn ContentSource>,
    renderer: TemplateRenderer,
    page_size: usize,
}

impl ServerState {
    pub fn new(site: &SpaceTraveling, source: Arc<dyn ContentSource>) -> Result<Self> {
        Ok(Self {
            source,
            renderer: TemplateRenderer::new(&site.config, site.helpers())?,
            page_size: site.config.prismic.page_size,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/post/:slug", get(post_handler))
        .route("/posts/more", get(more_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(
    site: &SpaceTraveling,
    source: Arc<dyn ContentSource>,
    ip: &str,
    port: u16,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState::new(site, source)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler failures mapped to HTTP responses
#[derive(Debug)]
pub enum ServerError {
    Content(Error),
    Render(anyhow::Error),
}

impl From<Error> for ServerError {
    fn from(err: Error) -> Self {
        ServerError::Content(err)
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Render(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Content(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Content(Error::InvalidCursor(_)) => StatusCode::BAD_REQUEST,
            ServerError::Content(Error::Network(_))
            | ServerError::Content(Error::MalformedResponse(_)) => StatusCode::BAD_GATEWAY,
            ServerError::Content(_) | ServerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            ServerError::Content(e) if status == StatusCode::NOT_FOUND => {
                tracing::debug!("{}", e)
            }
            ServerError::Content(e) => tracing::error!("{}", e),
            ServerError::Render(e) => tracing::error!("Render failed: {:#}", e),
        }

        let message = match status {
            StatusCode::NOT_FOUND => "Post não encontrado",
            StatusCode::BAD_REQUEST => "Requisição inválida",
            _ => "Não foi possível carregar o conteúdo",
        };
        (status, message).into_response()
    }
}

/// Home page with the first batch of posts
async fn index_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Html<String>, ServerError> {
    let page = state.source.query_posts(state.page_size).await?;
    let html = state
        .renderer
        .render_index(&page.results, page.next_page.as_ref())?;
    Ok(Html(html))
}

/// A single post
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ServerError> {
    let post = state.source.get_by_uid(&slug).await?;
    let html = state.renderer.render_post(&post)?;
    Ok(Html(html))
}

#[derive(Debug, Deserialize)]
pub struct MoreParams {
    cursor: String,
}

/// Batch returned to the "load more" control
#[derive(Debug, Serialize)]
pub struct MoreResponse {
    pub results: Vec<PostCard>,
    pub next_page: Option<Cursor>,
}

/// Next batch of posts for the cursor the page was given
async fn more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<MoreParams>,
) -> Result<Json<MoreResponse>, ServerError> {
    let cursor = Cursor::parse(&params.cursor)?;
    let page = pagination::load_next_page(state.source.as_ref(), &cursor).await?;
    Ok(Json(MoreResponse {
        results: state.renderer.cards(&page.results),
        next_page: page.next_page,
    }))
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
