//! In-process stand-in for a Prismic repository

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use spacetraveling::config::PrismicConfig;

pub const MASTER_REF: &str = "master-ref";

pub struct MockState {
    docs: RwLock<Vec<Value>>,
    master_ref: RwLock<String>,
    addr: SocketAddr,
    searches: AtomicUsize,
}

impl MockState {
    fn master_ref(&self) -> String {
        self.master_ref.read().unwrap().clone()
    }
}

pub struct MockCms {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockCms {
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }

    pub fn config(&self) -> PrismicConfig {
        PrismicConfig {
            api_endpoint: self.endpoint(),
            page_size: 2,
            request_timeout_secs: 5,
            ..PrismicConfig::default()
        }
    }

    /// Number of search requests served so far
    pub fn searches(&self) -> usize {
        self.state.searches.load(Ordering::SeqCst)
    }

    pub fn page_url(&self, page: usize, page_size: usize) -> String {
        page_url(self.addr, &self.state.master_ref(), page, page_size)
    }

    /// Add a document at the top of the list and move the master ref, as a
    /// publish in the repository does
    pub fn publish(&self, doc: Value, new_ref: &str) {
        self.state.docs.write().unwrap().insert(0, doc);
        *self.state.master_ref.write().unwrap() = new_ref.to_string();
    }
}

fn page_url(addr: SocketAddr, master_ref: &str, page: usize, page_size: usize) -> String {
    format!(
        "http://{}/api/v2/documents/search?ref={}&pageSize={}&page={}",
        addr, master_ref, page_size, page
    )
}

/// A full post document; list queries see the same documents
pub fn post_doc(uid: &str, title: &str, date: Option<&str>, body_words: usize) -> Value {
    let body = vec!["palavra"; body_words].join(" ");
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "href": format!("http://cms/documents/{}", uid),
        "tags": [],
        "lang": "pt-br",
        "first_publication_date": date,
        "last_publication_date": date,
        "data": {
            "title": title,
            "subtitle": format!("Subtítulo de {}", title),
            "author": "Joseph Oliveira",
            "banner": { "url": format!("https://images.prismic.io/{}.png", uid), "alt": null },
            "content": [
                {
                    "heading": "Introdução",
                    "body": [
                        { "type": "paragraph", "text": body, "spans": [] }
                    ]
                }
            ]
        }
    })
}

/// Four well-formed posts, newest first
pub fn sample_posts() -> Vec<Value> {
    vec![
        post_doc("primeiro-post", "Primeiro post", Some("2023-12-10T00:00:00+0000"), 10),
        post_doc("segundo-post", "Segundo post", Some("2023-11-02T12:00:00+0000"), 199),
        post_doc("terceiro-post", "Terceiro post", Some("2021-03-25T19:25:28+0000"), 300),
        post_doc("quarto-post", "Quarto post", None, 0),
    ]
}

pub async fn spawn(docs: Vec<Value>) -> MockCms {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(MockState {
        docs: RwLock::new(docs),
        master_ref: RwLock::new(MASTER_REF.to_string()),
        addr,
        searches: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/api/v2", get(api_root))
        .route("/api/v2/documents/search", get(search))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockCms { addr, state }
}

async fn api_root(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(json!({
        "refs": [
            { "id": "preview", "ref": "preview-ref", "label": "Preview", "isMasterRef": false },
            { "id": "master", "ref": state.master_ref(), "label": "Master", "isMasterRef": true }
        ],
        "types": { "posts": "Posts" }
    }))
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.searches.fetch_add(1, Ordering::SeqCst);

    let master_ref = state.master_ref();
    if params.get("ref") != Some(&master_ref) {
        return (StatusCode::BAD_REQUEST, "missing or stale ref").into_response();
    }
    let docs = state.docs.read().unwrap().clone();

    let q = params.get("q").cloned().unwrap_or_default();
    if let Some(uid) = q
        .strip_prefix("[[at(my.posts.uid,\"")
        .and_then(|rest| rest.strip_suffix("\")]]"))
    {
        let results: Vec<Value> = docs
            .iter()
            .filter(|d| d["uid"] == uid)
            .cloned()
            .collect();
        return Json(json!({ "page": 1, "results": results, "next_page": null })).into_response();
    }

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: usize = params
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(20);
    let start = (page - 1) * size;
    let results: Vec<Value> = docs.iter().skip(start).take(size).cloned().collect();
    let next_page = if start + size < docs.len() {
        Value::String(page_url(state.addr, &master_ref, page + 1, size))
    } else {
        Value::Null
    };

    Json(json!({
        "page": page,
        "results_per_page": size,
        "results_size": results.len(),
        "total_results_size": docs.len(),
        "results": results,
        "next_page": next_page,
        "prev_page": null
    }))
    .into_response()
}
