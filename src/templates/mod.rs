//! Built-in site templates using Tera template engine
//!
//! Templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{richtext, PostDetail, PostSummary};
use crate::helpers::{self, Helpers};
use crate::pagination::Cursor;

/// Template renderer with embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
    config: ConfigData,
    helpers: Helpers,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig, helpers: Helpers) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
        ])?;

        Ok(Self {
            tera,
            config: ConfigData::from(config),
            helpers,
        })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the home page with the first batch of posts
    pub fn render_index(
        &self,
        posts: &[PostSummary],
        next_page: Option<&Cursor>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &self.config);
        context.insert("posts", &self.cards(posts));
        context.insert("next_page", &next_page.map(Cursor::as_str));
        self.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let mut context = Context::new();
        context.insert("config", &self.config);
        context.insert("post", &PostView::new(post, &self.helpers));
        self.render("post.html", &context)
    }

    /// Card view models for a list of summaries
    pub fn cards(&self, posts: &[PostSummary]) -> Vec<PostCard> {
        posts
            .iter()
            .map(|p| PostCard::new(p, &self.helpers))
            .collect()
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub language: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            language: config.language.clone(),
        }
    }
}

/// A post in the home page list
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub uid: String,
    pub path: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
    pub datetime: String,
}

impl PostCard {
    pub fn new(post: &PostSummary, helpers: &Helpers) -> Self {
        Self {
            uid: post.uid.clone(),
            path: post.path(),
            title: post.data.title.clone(),
            subtitle: post.data.subtitle.clone(),
            author: post.data.author.clone(),
            date: helpers.date_or_blank(post.first_publication_date.as_deref()),
            datetime: machine_date(post.first_publication_date.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub uid: String,
    pub title: String,
    pub author: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub date: String,
    pub datetime: String,
    pub reading_time: u64,
    pub blocks: Vec<BlockView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockView {
    pub heading: String,
    pub html: String,
}

impl PostView {
    pub fn new(post: &PostDetail, helpers: &Helpers) -> Self {
        Self {
            uid: post.uid.clone(),
            title: post.data.title.clone(),
            author: post.data.author.clone(),
            banner_url: post.data.banner.url.clone(),
            banner_alt: post
                .data
                .banner
                .alt
                .clone()
                .unwrap_or_else(|| "banner".to_string()),
            date: helpers.date_or_blank(post.first_publication_date.as_deref()),
            datetime: machine_date(post.first_publication_date.as_deref()),
            reading_time: helpers.reading_minutes(&post.data.content),
            blocks: post
                .data
                .content
                .iter()
                .map(|block| BlockView {
                    heading: block.heading.clone(),
                    html: richtext::as_html(&block.body),
                })
                .collect(),
        }
    }
}

/// Timestamp for a `datetime` attribute, empty when absent or unparsable
fn machine_date(timestamp: Option<&str>) -> String {
    timestamp
        .and_then(|ts| helpers::parse_timestamp(ts).ok())
        .map(|date| helpers::date_xml(&date))
        .unwrap_or_default()
}
