//! Post domain entity
//!
//! Post records arrive as untyped JSON. Conversion never fails: absent or
//! wrong-typed fields degrade to empty strings and empty lists, and an
//! unknown `type` falls back to a plain text post.

use serde_json::{Map, Value};

/// Discriminant of a post record (`type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostType {
    #[default]
    Text,
    Instagram,
    TikTok,
}

impl PostType {
    /// Lenient parse used for records: anything unrecognized is `Text`
    pub fn from_discriminant(value: Option<&str>) -> Self {
        value.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Text => write!(f, "text"),
            PostType::Instagram => write!(f, "instagram"),
            PostType::TikTok => write!(f, "tiktok"),
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = String;

    /// Exact match, as the page script compares `post.type === "..."`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(PostType::Text),
            "instagram" => Ok(PostType::Instagram),
            "tiktok" => Ok(PostType::TikTok),
            _ => Err(format!("Unknown post type: {}", s)),
        }
    }
}

/// Fields shared by every post kind (rendered in the common header)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMeta {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub avatar: String,
    /// Machine-readable date (`<time datetime>`)
    pub date: String,
    /// Display date
    pub date_text: String,
    pub tags: Vec<String>,
    /// CSS modifier appended as `community-post--{variant}`
    pub variant: Option<String>,
}

/// Optional image of a text post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImage {
    pub src: String,
    pub alt: String,
    pub link: Option<String>,
}

impl PostImage {
    /// Absolute `http(s)` links open in a new tab; anything else is in-page navigation
    pub fn has_external_link(&self) -> bool {
        self.link.as_deref().is_some_and(is_absolute_http)
    }
}

/// Kind-specific part of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostKind {
    Text { image: Option<PostImage> },
    Instagram { url: String },
    TikTok { url: String, video_id: String },
}

/// A post record, normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub meta: PostMeta,
    pub paragraphs: Vec<String>,
    pub kind: PostKind,
}

impl Post {
    /// Build a post from one element of the posts document
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let record = value.as_object().unwrap_or(&empty);

        let meta = PostMeta {
            id: string_field(record, "id"),
            name: string_field(record, "name"),
            handle: string_field(record, "handle"),
            avatar: string_field(record, "avatar"),
            date: string_field(record, "date"),
            date_text: string_field(record, "dateText"),
            tags: string_list(record, "tags"),
            variant: non_empty_field(record, "variant"),
        };

        let post_type = PostType::from_discriminant(record.get("type").and_then(Value::as_str));
        let kind = match post_type {
            PostType::Instagram => PostKind::Instagram {
                url: string_field(record, "instagramUrl"),
            },
            PostType::TikTok => PostKind::TikTok {
                url: string_field(record, "tiktokUrl"),
                video_id: string_field(record, "tiktokId"),
            },
            PostType::Text => PostKind::Text {
                image: non_empty_field(record, "image").map(|src| PostImage {
                    src,
                    alt: string_field(record, "imageAlt"),
                    link: non_empty_field(record, "imageLink"),
                }),
            },
        };

        Self {
            meta,
            paragraphs: string_list(record, "paragraphs"),
            kind,
        }
    }

    pub fn post_type(&self) -> PostType {
        match self.kind {
            PostKind::Text { .. } => PostType::Text,
            PostKind::Instagram { .. } => PostType::Instagram,
            PostKind::TikTok { .. } => PostType::TikTok,
        }
    }

    /// First paragraph, or empty (TikTok loading fallback)
    pub fn first_paragraph(&self) -> &str {
        self.paragraphs.first().map(String::as_str).unwrap_or("")
    }
}

fn is_absolute_http(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn string_field(record: &Map<String, Value>, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn non_empty_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    Some(string_field(record, key)).filter(|s| !s.is_empty())
}

fn string_list(record: &Map<String, Value>, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
