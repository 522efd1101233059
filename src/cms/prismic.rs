//! HTTP client for a Prismic content repository

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::ContentSource;
use crate::config::PrismicConfig;
use crate::content::{PostDetail, RawSearchResponse};
use crate::error::{Error, Result};
use crate::pagination::{Cursor, PostPage};

/// API root document; only the refs are needed
#[derive(Debug, Deserialize)]
struct ApiRoot {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// Client for one repository, built explicitly from configuration
pub struct PrismicClient {
    http: Client,
    endpoint: Url,
    access_token: Option<String>,
    document_type: String,
}

impl PrismicClient {
    /// Create a new client for the configured repository
    pub fn new(config: &PrismicConfig) -> Result<Self> {
        let endpoint = Url::parse(config.api_endpoint.trim()).map_err(|e| {
            Error::Config(format!("invalid API endpoint {:?}: {}", config.api_endpoint, e))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("spacetraveling/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            access_token: config.access_token.clone(),
            document_type: config.document_type.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve the current master ref.
    ///
    /// The ref moves on every publish, so it is read from the API root for
    /// each search. `next_page` URLs carry their own ref and need no lookup.
    async fn master_ref(&self) -> Result<String> {
        let root: ApiRoot = self
            .get_json(self.with_token(self.http.get(self.endpoint.clone())))
            .await?;
        let master = root
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .ok_or_else(|| Error::missing("refs[isMasterRef]"))?;
        tracing::debug!("Resolved master ref {}", master.reference);
        Ok(master.reference)
    }

    fn search_url(&self) -> Result<Url> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/documents/search", base))
            .map_err(|e| Error::Config(format!("invalid search URL: {}", e)))
    }

    /// Run a search for the given predicate against the master ref
    async fn search(
        &self,
        predicate: &str,
        page_size: usize,
        fetch: Option<&str>,
    ) -> Result<RawSearchResponse> {
        let reference = self.master_ref().await?;
        let page_size = page_size.to_string();

        let mut request = self.http.get(self.search_url()?).query(&[
            ("ref", reference.as_str()),
            ("q", predicate),
            ("pageSize", page_size.as_str()),
        ]);
        if let Some(fields) = fetch {
            request = request.query(&[("fetch", fields)]);
        }

        self.get_json(self.with_token(request)).await
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.query(&[("access_token", token.as_str())]),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?.error_for_status()?;
        let url = response.url().clone();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Unexpected response from {}: {}", url, e);
            Error::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query_posts(&self, page_size: usize) -> Result<PostPage> {
        let predicate = format!(r#"[[at(document.type,"{}")]]"#, self.document_type);
        let fetch = ["title", "subtitle", "author"]
            .iter()
            .map(|field| format!("{}.{}", self.document_type, field))
            .collect::<Vec<_>>()
            .join(",");

        tracing::debug!("Querying {} (page size {})", self.document_type, page_size);
        self.search(&predicate, page_size, Some(&fetch))
            .await?
            .into_page()
    }

    async fn fetch_page(&self, cursor: &Cursor) -> Result<PostPage> {
        if !cursor.same_origin(&self.endpoint) {
            return Err(Error::InvalidCursor(format!(
                "{} is not on {}",
                cursor,
                self.endpoint.origin().ascii_serialization()
            )));
        }

        let response: RawSearchResponse =
            self.get_json(self.http.get(cursor.url().clone())).await?;
        response.into_page()
    }

    async fn get_by_uid(&self, uid: &str) -> Result<PostDetail> {
        let predicate = format!(
            r#"[[at(my.{}.uid,"{}")]]"#,
            self.document_type,
            uid.replace('"', "\\\"")
        );

        tracing::debug!("Fetching {} {:?}", self.document_type, uid);
        let response = self.search(&predicate, 1, None).await?;
        match response.results.into_iter().next() {
            Some(doc) => doc.into_detail(),
            None => Err(Error::NotFound(uid.to_string())),
        }
    }
}
