use log::{error, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::{
    classify, compute, select_content, validate, ReferenceTexts, SurveyRecord, SurveyResultRecord,
    ValidationError,
};
use crate::database::{DatabaseError, SurveyStore};
use crate::gemini::{DescriptionGenerator, GenerationError};

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    ValidationFailed(#[from] ValidationError),
    #[error("Failed to save data to the database: {0}")]
    PersistenceFailed(#[source] DatabaseError),
}

/// Runs one submission through validation, classification, statistics,
/// description generation and persistence.
///
/// Holds the shared collaborators; a single instance serves every request.
pub struct SurveyProcessor {
    generator: Arc<dyn DescriptionGenerator>,
    store: Arc<dyn SurveyStore>,
    texts: ReferenceTexts,
    generation_timeout: Duration,
}

impl SurveyProcessor {
    pub fn new(
        generator: Arc<dyn DescriptionGenerator>,
        store: Arc<dyn SurveyStore>,
        texts: ReferenceTexts,
    ) -> Self {
        Self {
            generator,
            store,
            texts,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub async fn process(&self, payload: &Value) -> Result<SurveyResultRecord, ProcessError> {
        let user_label = payload.get("user_id").cloned().unwrap_or(Value::Null);
        info!("Processing survey for user: {}", user_label);

        let submission = validate(payload).map_err(|e| {
            warn!("Invalid payload for user {}: {}", user_label, e);
            e
        })?;

        let answers = submission.answers();
        let classification = classify(&answers);
        let statistics = compute(&submission.values());

        let content = self.texts.select(select_content(&answers));
        let description = match self.generate_description(content).await {
            Ok(text) => text,
            Err(e) => {
                error!("Description generation failed for user {}: {}", submission.user_id, e);
                e.to_string()
            }
        };

        let record = SurveyRecord {
            user_id: submission.user_id,
            classification,
            description: clean_description(&description),
            statistics,
        };

        let id = self.store.insert_record(&record).await.map_err(|e| {
            error!("Failed to save data to the database for user {}: {}", record.user_id, e);
            ProcessError::PersistenceFailed(e)
        })?;

        info!("Survey processed successfully for user {}, inserted ID: {}", record.user_id, id);
        Ok(record.with_id(id))
    }

    async fn generate_description(&self, content: &str) -> Result<String, GenerationError> {
        let generation = self.generator.generate(content);
        match tokio::time::timeout(self.generation_timeout, generation).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Exception(format!(
                "description generation timed out after {:?}",
                self.generation_timeout
            ))),
        }
    }
}

/// Drop embedded newlines, then surrounding whitespace.
fn clean_description(description: &str) -> String {
    description.replace('\n', "").trim().to_string()
}
