//! Third-party embed processing port
//!
//! Instagram and TikTok ship widget scripts that scan the page for their
//! blockquote markup. The renderer asks them to re-scan after every render
//! pass when they are present.

/// Which widget a hook belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedProvider {
    Instagram,
    TikTok,
}

impl std::fmt::Display for EmbedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedProvider::Instagram => write!(f, "instagram"),
            EmbedProvider::TikTok => write!(f, "tiktok"),
        }
    }
}

/// Port trait for an embed widget loader
pub trait EmbedHook: Send + Sync {
    /// Process embeds currently present in the document
    fn process(&self);
}
