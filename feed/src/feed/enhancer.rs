//! Post-render enhancement
//!
//! Runs once over the rendered feed: accessibility attributes, pinned
//! markers, keyboard activation and the staggered reveal.

use serde::Serialize;

use crate::config::FeedConfig;
use crate::dom::{
    IntersectionEntry, IntersectionObserver, KeyboardEvent, LinkActivation, Observation,
    ObserverOptions, Page, RootMargin, KEY_ENTER, KEY_SPACE,
};
use crate::markup::Element;

/// Class added to a post once it has scrolled into view
pub const VISIBLE_CLASS: &str = "community-post--visible";

/// Tag text (case-insensitive) that marks a pinned post
pub const PINNED_TAG: &str = "fijado";

/// Reveal observer: 15% visible, bottom edge pulled up by 80px
pub const REVEAL_OPTIONS: ObserverOptions = ObserverOptions {
    threshold: 0.15,
    root_margin: RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: -80.0,
        left: 0.0,
    },
};

const ELLIPSIS: char = '…';

/// What [`enhance`] did to the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnhanceReport {
    pub posts: usize,
    pub pinned: usize,
    /// Posts made visible immediately (no intersection observation)
    pub revealed: usize,
    /// Posts handed to the reveal observer
    pub observed: usize,
}

/// Enhance the rendered posts of the page's feed
///
/// A missing feed or an empty feed leaves the page untouched.
pub fn enhance(page: &mut Page, config: &FeedConfig) -> EnhanceReport {
    let mut report = EnhanceReport::default();
    if !page.locate_feed(&config.feed_element_id) {
        return report;
    }
    report.posts = page.post_count();
    if report.posts == 0 {
        return report;
    }

    report.pinned = annotate(page, config);
    attach_key_listeners(page, report.posts);

    if page.environment().intersection_observer {
        let mut observer = IntersectionObserver::new(REVEAL_OPTIONS, Box::new(reveal_on_intersect));
        for index in 0..report.posts {
            observer.observe(index);
        }
        report.observed = observer.observed_count();
        page.set_observer(observer);
    } else {
        for post in page.posts_mut() {
            post.add_class(VISIBLE_CLASS);
        }
        report.revealed = report.posts;
    }

    if config.debug {
        tracing::debug!(
            "{}: accessibility enhanced for {} posts",
            config.log_scope(),
            report.posts
        );
        if report.pinned > 0 {
            tracing::debug!(
                "{}: {} pinned posts detected",
                config.log_scope(),
                report.pinned
            );
        }
        tracing::debug!("{}: keyboard interaction initialized", config.log_scope());
    }

    report
}

/// Feed and per-post attributes; returns the number of pinned posts
fn annotate(page: &mut Page, config: &FeedConfig) -> usize {
    if let Some(feed) = page.feed_mut() {
        feed.set_attribute("role", "feed");
        feed.set_attribute("aria-label", config.feed_label.as_str());
    }

    let mut pinned = 0;
    for (index, post) in page.posts_mut().into_iter().enumerate() {
        post.set_attribute("role", "article");
        post.set_attribute("tabindex", "0");
        post.set_attribute("data-index", index.to_string());

        let label = post
            .find_by_class("community-post-body")
            .map(|body| preview_text(body, config.preview_max_chars))
            .unwrap_or_default();
        if !label.is_empty() {
            post.set_attribute("aria-label", label);
        }

        if config.pinned_detection && is_pinned(post) {
            post.set_attribute("data-pinned", "true");
            pinned += 1;
        }
    }
    pinned
}

fn attach_key_listeners(page: &mut Page, count: usize) {
    for index in 0..count {
        page.add_key_listener(index, Box::new(activate_primary_link));
    }
}

/// Accessible preview of an element's text
///
/// Text segments are trimmed and joined with single spaces, inner
/// whitespace collapsed. Adjacent paragraphs are therefore separated by a
/// space (`["A.", "B."]` reads `"A. B."`), where the page's `textContent`
/// would run them together as `"A.B."`. Longer than `max_chars`
/// characters: the first `max_chars` characters, trimmed, followed by an
/// ellipsis.
pub fn preview_text(element: &Element, max_chars: usize) -> String {
    let joined = element
        .text_segments()
        .iter()
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = joined.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}

/// A post is pinned when one of its tags reads "fijado"
pub fn is_pinned(post: &Element) -> bool {
    post.select_class("community-tag")
        .iter()
        .any(|tag| tag.text_content().trim().to_lowercase() == PINNED_TAG)
}

/// Link a keyboard user reaches by activating the post
///
/// The footer link wins over links inside the body.
pub fn primary_link(post: &Element) -> Option<&Element> {
    post.find_by_class("community-post-footer")
        .and_then(|footer| footer.find_by_tag("a"))
        .or_else(|| {
            post.find_by_class("community-post-body")
                .and_then(|body| body.find_by_tag("a"))
        })
}

fn activate_primary_link(post: &Element, event: &mut KeyboardEvent) -> Option<LinkActivation> {
    if event.key() != KEY_ENTER && event.key() != KEY_SPACE {
        return None;
    }
    let link = primary_link(post)?;
    event.prevent_default();
    Some(LinkActivation::click(link))
}

fn reveal_on_intersect(entry: &IntersectionEntry, post: &mut Element) -> Observation {
    if !entry.is_intersecting {
        return Observation::Keep;
    }
    post.add_class(VISIBLE_CLASS);
    Observation::Unobserve
}
