//! Community service
//!
//! The feed's startup sequence: locate the feed element, load the posts,
//! render, enhance.

use std::sync::Arc;

use serde::Serialize;

use crate::config::FeedConfig;
use crate::dom::Page;
use crate::domain::ports::PostSource;
use crate::feed::{enhance, render, EnhanceReport};

use super::loader::FeedLoader;

/// How [`CommunityService::init`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum InitOutcome {
    /// The page has no feed element; nothing was loaded or touched
    FeedMissing,
    /// Loading failed or returned no posts; the feed was cleared
    Empty,
    Rendered(EnhanceReport),
}

pub struct CommunityService<S>
where
    S: PostSource,
{
    loader: FeedLoader<S>,
    config: FeedConfig,
}

impl<S> CommunityService<S>
where
    S: PostSource,
{
    pub fn new(source: Arc<S>, config: FeedConfig) -> Self {
        Self {
            loader: FeedLoader::new(source, config.clone()),
            config,
        }
    }

    /// Run the startup sequence against `page`
    pub async fn init(&self, page: &mut Page) -> InitOutcome {
        let scope = self.config.log_scope();

        if !page.locate_feed(&self.config.feed_element_id) {
            if self.config.debug {
                tracing::debug!(
                    "{}: #{} not found, not initializing",
                    scope,
                    self.config.feed_element_id
                );
            }
            return InitOutcome::FeedMissing;
        }

        let posts = self.loader.load_posts().await.unwrap_or_default();
        if posts.is_empty() {
            page.replace_feed_children(Vec::new());
            if self.config.debug {
                tracing::debug!("{}: no posts to show", scope);
            }
            return InitOutcome::Empty;
        }

        render(page, &posts, &self.config);
        let report = enhance(page, &self.config);

        if self.config.debug {
            tracing::debug!("{}: page initialized with {} posts", scope, report.posts);
        }
        InitOutcome::Rendered(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageVariant;
    use crate::dom::Environment;
    use crate::feed::VISIBLE_CLASS;
    use crate::markup::{Element, Node};
    use crate::test_utils::{mixed_feed, static_page, test_page, InMemoryPostSource};
    use serde_json::json;

    fn create_service(
        source: InMemoryPostSource,
        config: FeedConfig,
    ) -> (Arc<InMemoryPostSource>, CommunityService<InMemoryPostSource>) {
        let source = Arc::new(source);
        (source.clone(), CommunityService::new(source, config))
    }

    /// Page whose feed still shows server-side placeholder content
    fn page_with_placeholder() -> Page {
        let mut page = test_page();
        page.locate_feed("community-feed");
        page.replace_feed_children(vec![Node::Text("Cargando…".to_string())]);
        page
    }

    #[tokio::test]
    async fn init_renders_and_enhances() {
        let (source, service) = create_service(
            InMemoryPostSource::with_document(json!(mixed_feed())),
            FeedConfig::default(),
        );
        let mut page = test_page();

        let outcome = service.init(&mut page).await;

        assert_eq!(
            outcome,
            InitOutcome::Rendered(EnhanceReport {
                posts: 3,
                pinned: 1,
                revealed: 0,
                observed: 3,
            })
        );
        assert_eq!(source.fetches(), 1);
        assert_eq!(page.post_count(), 3);
        assert_eq!(page.feed().unwrap().get_attribute("role"), Some("feed"));
        assert_eq!(page.key_listener_count(), 3);
    }

    #[tokio::test]
    async fn init_without_feed_element_does_nothing() {
        let (source, service) = create_service(
            InMemoryPostSource::with_document(json!(mixed_feed())),
            FeedConfig::default().with_debug(true),
        );
        let mut page = Page::new(
            Element::new("body").child(Element::new("main").attr("id", "portfolio")),
            Environment::new(),
        );

        let outcome = service.init(&mut page).await;

        assert_eq!(outcome, InitOutcome::FeedMissing);
        assert_eq!(source.fetches(), 0);
        assert_eq!(page.body().to_html(), r#"<body><main id="portfolio"></main></body>"#);
    }

    #[tokio::test]
    async fn init_load_failure_clears_feed() {
        let (_, service) = create_service(
            InMemoryPostSource::failing_with_status(500),
            FeedConfig::default().with_debug(true),
        );
        let mut page = page_with_placeholder();

        let outcome = service.init(&mut page).await;

        assert_eq!(outcome, InitOutcome::Empty);
        assert!(page.feed().unwrap().child_nodes().is_empty());
    }

    #[tokio::test]
    async fn init_empty_document_clears_feed() {
        let (_, service) = create_service(
            InMemoryPostSource::with_document(json!([])),
            FeedConfig::default(),
        );
        let mut page = page_with_placeholder();

        assert_eq!(service.init(&mut page).await, InitOutcome::Empty);
        assert!(page.feed().unwrap().child_nodes().is_empty());
    }

    #[tokio::test]
    async fn init_non_array_clears_feed() {
        let (_, service) = create_service(
            InMemoryPostSource::with_document(json!({ "posts": mixed_feed() })),
            FeedConfig::default(),
        );
        let mut page = page_with_placeholder();

        assert_eq!(service.init(&mut page).await, InitOutcome::Empty);
        assert_eq!(page.post_count(), 0);
    }

    #[tokio::test]
    async fn init_on_static_host_reveals_all() {
        let (_, service) = create_service(
            InMemoryPostSource::with_document(json!(mixed_feed())),
            FeedConfig::for_variant(PageVariant::Mobile),
        );
        let mut page = static_page();

        let outcome = service.init(&mut page).await;

        let InitOutcome::Rendered(report) = outcome else {
            panic!("expected rendered feed, got {:?}", outcome);
        };
        assert_eq!(report.revealed, 3);
        assert_eq!(report.pinned, 0);
        assert!(page.posts().iter().all(|p| p.has_class(VISIBLE_CLASS)));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(InitOutcome::Empty).unwrap();
        assert_eq!(json, json!({ "outcome": "empty" }));
    }
}
