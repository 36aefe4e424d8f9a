//! The page context
//!
//! Owns the document tree and everything the page script would otherwise
//! keep in globals: which element is the feed, the host environment's
//! capabilities, registered key listeners, the active intersection observer
//! and the links activated so far.

use std::sync::Arc;

use crate::domain::ports::{EmbedHook, EmbedProvider};
use crate::markup::{Element, Node};

use super::events::{KeyHandler, KeyboardEvent, LinkActivation};
use super::observer::{IntersectionEntry, IntersectionObserver, Rect};

/// Class carried by every rendered post
pub const POST_CLASS: &str = "community-post";

/// Capabilities of the hosting environment
#[derive(Clone)]
pub struct Environment {
    /// `IntersectionObserver` is available
    pub intersection_observer: bool,
    instagram: Option<Arc<dyn EmbedHook>>,
    tiktok: Option<Arc<dyn EmbedHook>>,
}

impl Environment {
    /// A modern browser without third-party widgets loaded
    pub fn new() -> Self {
        Self {
            intersection_observer: true,
            instagram: None,
            tiktok: None,
        }
    }

    /// A host without intersection observation (old browsers, prerendering)
    pub fn static_host() -> Self {
        Self {
            intersection_observer: false,
            ..Self::new()
        }
    }

    pub fn with_embed_hook(mut self, provider: EmbedProvider, hook: Arc<dyn EmbedHook>) -> Self {
        match provider {
            EmbedProvider::Instagram => self.instagram = Some(hook),
            EmbedProvider::TikTok => self.tiktok = Some(hook),
        }
        self
    }

    pub fn embed_hook(&self, provider: EmbedProvider) -> Option<&Arc<dyn EmbedHook>> {
        match provider {
            EmbedProvider::Instagram => self.instagram.as_ref(),
            EmbedProvider::TikTok => self.tiktok.as_ref(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("intersection_observer", &self.intersection_observer)
            .field("instagram", &self.instagram.is_some())
            .field("tiktok", &self.tiktok.is_some())
            .finish()
    }
}

struct KeyListener {
    post_index: usize,
    handler: KeyHandler,
}

/// In-memory page: document, environment and event state
pub struct Page {
    body: Element,
    environment: Environment,
    feed_id: Option<String>,
    key_listeners: Vec<KeyListener>,
    observer: Option<IntersectionObserver>,
    activations: Vec<LinkActivation>,
}

impl Page {
    pub fn new(body: Element, environment: Environment) -> Self {
        Self {
            body,
            environment,
            feed_id: None,
            key_listeners: Vec::new(),
            observer: None,
            activations: Vec::new(),
        }
    }

    /// A page whose body holds a single empty feed section with `feed_id`
    pub fn with_feed_section(feed_id: &str, environment: Environment) -> Self {
        let body = Element::new("body").child(
            Element::new("section")
                .attr("id", feed_id)
                .class("community-feed"),
        );
        Self::new(body, environment)
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Locate the feed element by id and remember it as the page's feed
    ///
    /// Returns `false` (and forgets any previous feed) when absent.
    pub fn locate_feed(&mut self, id: &str) -> bool {
        let found = self.body.get_element_by_id(id).is_some();
        self.feed_id = found.then(|| id.to_string());
        found
    }

    pub fn feed(&self) -> Option<&Element> {
        let id = self.feed_id.as_deref()?;
        self.body.get_element_by_id(id)
    }

    pub fn feed_mut(&mut self) -> Option<&mut Element> {
        let id = self.feed_id.as_deref()?;
        self.body.get_element_by_id_mut(id)
    }

    /// Replace the feed's children (the `innerHTML` assignment)
    ///
    /// Listeners and observation of the old posts go away with them.
    pub fn replace_feed_children(&mut self, children: Vec<Node>) -> bool {
        let Some(feed) = self.feed_mut() else {
            return false;
        };
        feed.replace_children(children);
        self.key_listeners.clear();
        self.observer = None;
        true
    }

    /// Posts of the feed, in document order
    pub fn posts(&self) -> Vec<&Element> {
        self.feed()
            .map(|feed| feed.select_class(POST_CLASS))
            .unwrap_or_default()
    }

    pub fn posts_mut(&mut self) -> Vec<&mut Element> {
        self.feed_mut()
            .map(|feed| feed.select_class_mut(POST_CLASS))
            .unwrap_or_default()
    }

    pub fn post_count(&self) -> usize {
        self.posts().len()
    }

    // --- Keyboard ---

    pub fn add_key_listener(&mut self, post_index: usize, handler: KeyHandler) {
        self.key_listeners.push(KeyListener {
            post_index,
            handler,
        });
    }

    pub fn key_listener_count(&self) -> usize {
        self.key_listeners.len()
    }

    /// Deliver a key press to the post at `post_index`
    ///
    /// Returns the link activated by a listener, which is also recorded in
    /// [`Page::activations`].
    pub fn dispatch_key(
        &mut self,
        post_index: usize,
        event: &mut KeyboardEvent,
    ) -> Option<LinkActivation> {
        let activation = {
            let post = self.posts().into_iter().nth(post_index)?;
            self.key_listeners
                .iter()
                .filter(|listener| listener.post_index == post_index)
                .find_map(|listener| (listener.handler)(post, event))
        };
        if let Some(activation) = &activation {
            self.activations.push(activation.clone());
        }
        activation
    }

    pub fn activations(&self) -> &[LinkActivation] {
        &self.activations
    }

    // --- Intersection observation ---

    pub fn set_observer(&mut self, observer: IntersectionObserver) {
        self.observer = Some(observer);
    }

    pub fn observer(&self) -> Option<&IntersectionObserver> {
        self.observer.as_ref()
    }

    /// Deliver entries to the active observer, if any
    pub fn deliver_intersections(&mut self, entries: &[IntersectionEntry]) {
        let Some(mut observer) = self.observer.take() else {
            return;
        };
        {
            let mut posts = self.posts_mut();
            for entry in entries {
                if let Some(post) = posts.get_mut(entry.index) {
                    observer.notify(entry, post);
                }
            }
        }
        self.observer = Some(observer);
    }

    /// Lay posts out at `layout[i]` and report what `viewport` shows
    pub fn scroll_to(&mut self, viewport: Rect, layout: &[Rect]) {
        let Some(options) = self.observer.as_ref().map(|o| *o.options()) else {
            return;
        };
        let entries: Vec<IntersectionEntry> = layout
            .iter()
            .enumerate()
            .map(|(index, rect)| options.measure(index, rect, &viewport))
            .collect();
        self.deliver_intersections(&entries);
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("feed_id", &self.feed_id)
            .field("environment", &self.environment)
            .field("key_listeners", &self.key_listeners.len())
            .field("observer", &self.observer)
            .field("activations", &self.activations)
            .finish()
    }
}
