//! Feed renderer
//!
//! Renders post records to the community feed markup: one `<article>` per
//! post, built by one of three templates that share a common header.

use serde_json::Value;

use crate::config::FeedConfig;
use crate::dom::Page;
use crate::domain::entities::{Post, PostImage, PostKind, PostMeta};
use crate::domain::ports::EmbedProvider;
use crate::markup::{Element, Node};

/// Avatar alt text when a text post has no author name
const MEMBER_ALT: &str = "Miembro de Ocean Graph";

/// Avatar alt text when an embed post has no author name
const CONTENT_MEMBER_ALT: &str = "Miembro de contenido Ocean Graph";

const INSTAGRAM_LINK_LABEL: &str = "Ver publicación en Instagram";
const TIKTOK_LINK_LABEL: &str = "Ver en TikTok";
const INSTAGRAM_EMBED_VERSION: &str = "14";
const TIKTOK_EMBED_STYLE: &str = "max-width: 605px; min-width: 325px; margin:0;";
const EXTERNAL_REL: &str = "noopener noreferrer";

/// Render posts into the page's feed element
///
/// Returns the number of posts rendered. A missing feed element is a no-op;
/// an empty list clears the feed. Embed hooks present in the environment
/// are invoked after insertion.
pub fn render(page: &mut Page, posts: &[Value], config: &FeedConfig) -> usize {
    if !page.locate_feed(&config.feed_element_id) {
        if config.debug {
            tracing::debug!(
                "{}: #{} not found, nothing rendered",
                config.log_scope(),
                config.feed_element_id
            );
        }
        return 0;
    }

    if posts.is_empty() {
        page.replace_feed_children(Vec::new());
        return 0;
    }

    let nodes: Vec<Node> = posts
        .iter()
        .map(|record| Node::Element(render_post(&Post::from_value(record), config)))
        .collect();
    let count = nodes.len();
    page.replace_feed_children(nodes);

    for provider in [EmbedProvider::Instagram, EmbedProvider::TikTok] {
        if let Some(hook) = page.environment().embed_hook(provider) {
            hook.process();
            if config.debug {
                tracing::debug!("{}: {} embeds processed", config.log_scope(), provider);
            }
        }
    }

    count
}

/// Render the whole feed to an HTML string, without a page
pub fn render_feed_html(posts: &[Value], config: &FeedConfig) -> String {
    let mut buf = String::new();
    for record in posts {
        render_post(&Post::from_value(record), config).write_html(&mut buf);
    }
    buf
}

/// Render one post to an HTML string
pub fn render_post_html(post: &Post, config: &FeedConfig) -> String {
    render_post(post, config).to_html()
}

/// Build the element for one post
pub fn render_post(post: &Post, config: &FeedConfig) -> Element {
    match &post.kind {
        PostKind::Text { image } => render_text_post(post, image.as_ref()),
        PostKind::Instagram { url } => render_instagram_post(post, url),
        PostKind::TikTok { url, video_id } => render_tiktok_post(post, url, video_id, config),
    }
}

fn render_text_post(post: &Post, image: Option<&PostImage>) -> Element {
    let body = Element::new("div")
        .class("community-post-body")
        .maybe_child(image.map(render_image))
        .children(render_paragraphs(&post.paragraphs));

    post_root(&post.meta, None).child(
        Element::new("div")
            .class("community-post-inner")
            .child(render_header(&post.meta, MEMBER_ALT))
            .child(body),
    )
}

fn render_instagram_post(post: &Post, url: &str) -> Element {
    let embed = Element::new("blockquote")
        .class("instagram-media")
        .flag("data-instgrm-captioned")
        .attr("data-instgrm-permalink", url)
        .attr("data-instgrm-version", INSTAGRAM_EMBED_VERSION)
        .attr("style", "margin:0;")
        .child(Element::new("a").attr("href", url));

    let body = Element::new("div")
        .class("community-post-body")
        .child(embed)
        .child(render_description(&post.paragraphs));

    post_root(&post.meta, Some("instagram")).child(
        Element::new("div")
            .class("community-post-inner")
            .child(render_header(&post.meta, CONTENT_MEMBER_ALT))
            .child(body)
            .child(render_footer(url, INSTAGRAM_LINK_LABEL)),
    )
}

fn render_tiktok_post(post: &Post, url: &str, video_id: &str, config: &FeedConfig) -> Element {
    let mut section = Element::new("section");
    if config.tiktok_handle_link {
        let handle = if post.meta.handle.is_empty() {
            config.default_tiktok_handle.as_str()
        } else {
            post.meta.handle.as_str()
        };
        section = section.child(
            Element::new("a")
                .attr("target", "_blank")
                .attr("rel", EXTERNAL_REL)
                .attr("title", handle)
                .attr("href", tiktok_profile_url(handle))
                .text(handle),
        );
    }
    // Shown until the TikTok player replaces the blockquote
    section = section.child(Element::new("p").text(post.first_paragraph()));

    let embed = Element::new("blockquote")
        .class("tiktok-embed")
        .attr("cite", url)
        .attr("data-video-id", video_id)
        .attr("style", TIKTOK_EMBED_STYLE)
        .child(section);

    let body = Element::new("div")
        .class("community-post-body")
        .child(embed)
        .child(render_description(&post.paragraphs));

    post_root(&post.meta, Some("tiktok")).child(
        Element::new("div")
            .class("community-post-inner")
            .child(render_header(&post.meta, CONTENT_MEMBER_ALT))
            .child(body)
            .child(render_footer(url, TIKTOK_LINK_LABEL)),
    )
}

/// `<article>` root with kind and variant modifiers
fn post_root(meta: &PostMeta, kind_modifier: Option<&str>) -> Element {
    let mut root = Element::new("article").class("community-post");
    if let Some(modifier) = kind_modifier {
        root.add_class(&format!("community-post--{}", modifier));
    }
    if let Some(variant) = &meta.variant {
        root.add_class(&format!("community-post--{}", variant));
    }
    root.attr("data-post-id", meta.id.as_str())
}

/// Header shared by all three templates
fn render_header(meta: &PostMeta, fallback_alt: &str) -> Element {
    let alt = if meta.name.is_empty() {
        fallback_alt
    } else {
        meta.name.as_str()
    };

    let avatar = Element::new("div").class("community-avatar").child(
        Element::new("img")
            .attr("src", meta.avatar.as_str())
            .attr("alt", alt),
    );

    let name_row = Element::new("div")
        .class("community-name-row")
        .child(
            Element::new("span")
                .class("community-name")
                .text(meta.name.as_str()),
        )
        .child(
            Element::new("span")
                .class("community-handle")
                .text(meta.handle.as_str()),
        )
        .child(Element::new("span").class("community-dot").text("·"))
        .child(
            Element::new("time")
                .attr("datetime", meta.date.as_str())
                .text(meta.date_text.as_str()),
        );

    Element::new("header")
        .class("community-post-header")
        .child(avatar)
        .child(
            Element::new("div")
                .class("community-header-meta")
                .child(name_row)
                .maybe_child(render_tags(&meta.tags)),
        )
}

fn render_tags(tags: &[String]) -> Option<Element> {
    if tags.is_empty() {
        return None;
    }
    let row = Element::new("div")
        .class("community-tag-row")
        .children(tags.iter().map(String::as_str).map(render_tag));
    Some(row)
}

fn render_tag(tag: &str) -> Element {
    Element::new("span").class("community-tag").text(tag)
}

fn render_paragraphs(paragraphs: &[String]) -> impl Iterator<Item = Element> + '_ {
    paragraphs
        .iter()
        .map(|p| Element::new("p").text(p.as_str()))
}

fn render_description(paragraphs: &[String]) -> Element {
    Element::new("div")
        .class("community-post-description")
        .children(render_paragraphs(paragraphs))
}

fn render_image(image: &PostImage) -> Element {
    let img = Element::new("img")
        .attr("src", image.src.as_str())
        .attr("alt", image.alt.as_str())
        .attr("loading", "lazy");

    let content = match &image.link {
        None => img,
        Some(link) => {
            let mut anchor = Element::new("a").attr("href", link.as_str());
            if image.has_external_link() {
                anchor = anchor.attr("target", "_blank").attr("rel", EXTERNAL_REL);
            }
            anchor.child(img)
        }
    };

    Element::new("figure")
        .class("community-post-media")
        .child(content)
}

fn render_footer(url: &str, label: &str) -> Element {
    Element::new("footer").class("community-post-footer").child(
        Element::new("a")
            .attr("href", url)
            .attr("target", "_blank")
            .attr("rel", EXTERNAL_REL)
            .class("portfolio-more-link")
            .text(label),
    )
}

/// Profile link for a TikTok handle (first `@` dropped)
fn tiktok_profile_url(handle: &str) -> String {
    format!(
        "https://www.tiktok.com/{}?refer=embed",
        handle.replacen('@', "", 1)
    )
}
