//! Community feed prerenderer
//!
//! Runs the community feed startup sequence outside the browser and writes
//! the resulting feed markup, so the page can ship with posts already in
//! place. Configuration comes from the environment (see `config`).

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use community_feed::adapters::{FilePostSource, HttpPostSource};
use community_feed::domain::ports::PostSource;
use community_feed::{CommunityService, Environment, FeedConfig, InitOutcome, Page};
use config::{PrerenderConfig, SourceLocation};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: it loads .env and decides the fallback log filter
    let config = PrerenderConfig::from_env()?;

    // Logs go to stderr, stdout carries the markup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_directive().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Prerendering community feed ({}) from {}",
        config.variant,
        config.source
    );

    let feed_config = config.feed_config();
    let html = match &config.source {
        SourceLocation::Url(url) => {
            prerender(Arc::new(HttpPostSource::new(url.clone())), feed_config).await
        }
        SourceLocation::File(path) => {
            prerender(Arc::new(FilePostSource::new(path.clone())), feed_config).await
        }
    };

    match &config.output {
        Some(path) => tokio::fs::write(path, &html)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(html.as_bytes())
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

/// Run the feed against a static page and return the feed element's markup
async fn prerender<S: PostSource>(source: Arc<S>, config: FeedConfig) -> String {
    let mut page = Page::with_feed_section(&config.feed_element_id, Environment::static_host());
    let service = CommunityService::new(source, config);

    match service.init(&mut page).await {
        InitOutcome::Rendered(report) => {
            tracing::info!("Rendered {} posts ({} pinned)", report.posts, report.pinned)
        }
        InitOutcome::Empty => tracing::warn!("No posts available, feed left empty"),
        InitOutcome::FeedMissing => tracing::warn!("Feed element missing"),
    }

    page.feed().map(|feed| feed.to_html()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_posts(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "community-prerender-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn prerender_file_source() {
        let path = temp_posts(
            "ok",
            r#"[
                {"id": "a", "name": "Ana", "tags": ["Fijado"], "paragraphs": ["Hola"]},
                {"type": "instagram", "id": "b", "instagramUrl": "https://www.instagram.com/p/x/"}
            ]"#,
        );

        let html = prerender(Arc::new(FilePostSource::new(&path)), FeedConfig::default()).await;

        assert!(html.starts_with(
            r#"<section id="community-feed" class="community-feed" role="feed""#
        ));
        assert_eq!(html.matches("<article ").count(), 2);
        assert!(html.contains(r#"data-pinned="true""#));
        assert_eq!(html.matches("community-post--visible").count(), 2);
        assert!(html.contains(r#"aria-label="Hola""#));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn prerender_missing_file_yields_empty_feed() {
        let path = std::env::temp_dir().join("community-prerender-does-not-exist.json");

        let html = prerender(Arc::new(FilePostSource::new(path)), FeedConfig::default()).await;

        assert_eq!(html, r#"<section id="community-feed" class="community-feed"></section>"#);
    }
}
