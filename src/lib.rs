use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

pub mod config;
pub mod database;
pub mod gemini;
pub mod server;
pub mod survey;

use config::{AppConfig, StoreBackend};
use database::{MemorySurveyStore, PostgresSurveyStore, SurveyStore};
use gemini::GeminiClient;
use survey::{ReferenceTexts, SurveyProcessor};

/// Wire up the collaborators and serve until the listener fails.
pub async fn run(config: AppConfig) -> Result<()> {
    info!("Survey processor starting...");
    log_environment_status(&config);

    let texts = ReferenceTexts::load(&config.short_hair_text_path, &config.long_hair_text_path)?;
    info!(
        "Loaded reference texts ({} and {} bytes)",
        texts.short_hair.len(),
        texts.long_hair.len()
    );

    let store: Arc<dyn SurveyStore> = match config.store {
        StoreBackend::Postgres => Arc::new(
            PostgresSurveyStore::connect(&config.database)
                .await
                .context("Failed to connect to the survey database")?,
        ),
        StoreBackend::Memory => {
            warn!("Using in-memory store, results are lost on restart");
            Arc::new(MemorySurveyStore::new())
        }
    };

    let generator = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone().unwrap_or_default(),
        config.gemini_api_url.clone(),
        config.generation_timeout,
    ));

    let processor = SurveyProcessor::new(generator, store, texts)
        .with_generation_timeout(config.generation_timeout);
    let app = server::router(server::AppState::new(processor), &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.address)
        .await
        .with_context(|| format!("Failed to bind {}", config.address))?;
    info!("Listening on http://{}", config.address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn log_environment_status(config: &AppConfig) {
    info!("Environment configuration status:");

    match &config.gemini_api_key {
        Some(key) => info!("✅ GEMINI_API_KEY: {} (length: {})", key_preview(key), key.len()),
        None => warn!("❌ GEMINI_API_KEY: Not set, description requests will be rejected"),
    }

    info!("CORS origins: {}", config.cors_origins.join(", "));
    info!("Description timeout: {:?}", config.generation_timeout);
    if config.store == StoreBackend::Postgres {
        info!(
            "Database: {}@{}:{}/{}",
            config.database.user, config.database.host, config.database.port, config.database.dbname
        );
    }
}

fn key_preview(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_preview() {
        assert_eq!(key_preview("AIzaSyExampleKey1234"), "AIza...1234");
        assert_eq!(key_preview("short"), "***");
    }
}
