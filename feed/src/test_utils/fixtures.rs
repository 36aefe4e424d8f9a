//! Test fixtures
//!
//! Factory functions for post records and pages. Records mirror what the
//! content team writes into `community-posts.json`.

use serde_json::{json, Value};

use crate::config::FEED_ELEMENT_ID;
use crate::dom::{Environment, Page};

/// Text post with tags (one of them "Fijado") and two paragraphs
pub fn text_post() -> Value {
    json!({
        "type": "text",
        "id": "p1",
        "name": "Marina",
        "handle": "@marina",
        "avatar": "img/marina.jpg",
        "date": "2024-05-01",
        "dateText": "1 de mayo",
        "tags": ["Fijado", "Eventos"],
        "paragraphs": ["Bienvenidos a la comunidad.", "Nos vemos en el puerto."]
    })
}

pub fn instagram_post() -> Value {
    json!({
        "type": "instagram",
        "id": "ig1",
        "name": "Ocean Graph",
        "handle": "@oceangraficos",
        "avatar": "img/og.png",
        "date": "2024-04-20",
        "dateText": "20 de abril",
        "instagramUrl": "https://www.instagram.com/p/C0ceanGraph/",
        "paragraphs": ["Nuevo mural en el muelle."]
    })
}

pub fn tiktok_post() -> Value {
    json!({
        "type": "tiktok",
        "id": "tt1",
        "name": "Surf Club",
        "handle": "@surf.club",
        "avatar": "img/surf.png",
        "date": "2024-04-02",
        "dateText": "2 de abril",
        "tags": ["Video"],
        "tiktokId": "7351234567890",
        "tiktokUrl": "https://www.tiktok.com/@surf.club/video/7351234567890",
        "paragraphs": ["Clase de surf al amanecer.", "Gracias a todos."]
    })
}

/// Text, Instagram and TikTok post, in that order
pub fn mixed_feed() -> Vec<Value> {
    vec![text_post(), instagram_post(), tiktok_post()]
}

/// Page with an empty feed section, in a browser with intersection observation
pub fn test_page() -> Page {
    Page::with_feed_section(FEED_ELEMENT_ID, Environment::new())
}

/// Page with an empty feed section, in a host without intersection observation
pub fn static_page() -> Page {
    Page::with_feed_section(FEED_ELEMENT_ID, Environment::static_host())
}
