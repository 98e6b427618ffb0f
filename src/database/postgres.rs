use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use log::{error, info};
use tokio_postgres::NoTls;
use uuid::Uuid;

use super::{DatabaseError, Result, SurveyStore};
use crate::survey::SurveyRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "survey_database".to_string(),
            user: "survey_user".to_string(),
            password: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct PostgresSurveyStore {
    pool: Pool,
}

impl PostgresSurveyStore {
    /// Build the pool, check that a connection can be made and create the
    /// results table if it is missing.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        info!(
            "Connecting to database: {}@{}:{}/{}",
            settings.user, settings.host, settings.port, settings.dbname
        );

        let mut cfg = Config::new();
        cfg.host = Some(settings.host.clone());
        cfg.port = Some(settings.port);
        cfg.dbname = Some(settings.dbname.clone());
        cfg.user = Some(settings.user.clone());
        cfg.password = Some(settings.password.clone());
        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DatabaseError::ConnectionFailed(format!("Pool creation failed: {}", e)))?;

        let store = Self { pool };
        store.ensure_schema().await?;

        info!("Database connection established successfully");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| {
                DatabaseError::ConnectionFailed(format!("Connection test failed: {}", e))
            })?;

        client
            .batch_execute(
                r#"
                CREATE TABLE IF NOT EXISTS survey_results (
                    id UUID PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    overall_analysis TEXT NOT NULL,
                    cat_dog TEXT NOT NULL,
                    fur_value TEXT NOT NULL,
                    tail_value TEXT NOT NULL,
                    description TEXT NOT NULL,
                    statistics JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL
                )
                "#,
            )
            .await
            .map_err(|e| {
                error!("Failed to create survey_results table: {}", e);
                DatabaseError::QueryFailed(format!("Failed to create survey_results table: {}", e))
            })
    }
}

#[async_trait]
impl SurveyStore for PostgresSurveyStore {
    async fn insert_record(&self, record: &SurveyRecord) -> Result<Uuid> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let statistics = serde_json::to_value(record.statistics)
            .map_err(|e| {
                DatabaseError::QueryFailed(format!("Failed to encode statistics: {}", e))
            })?;
        let classification = &record.classification;

        client
            .execute(
                r#"
                INSERT INTO survey_results
                (id, user_id, overall_analysis, cat_dog, fur_value, tail_value,
                 description, statistics, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
                &[
                    &id,
                    &record.user_id,
                    &classification.overall_analysis.as_str(),
                    &classification.cat_dog.as_str(),
                    &classification.fur_value.as_str(),
                    &classification.tail_value.as_str(),
                    &record.description,
                    &statistics,
                    &now,
                ],
            )
            .await
            .map_err(|e| {
                error!("Failed to insert survey result for user {}: {}", record.user_id, e);
                DatabaseError::QueryFailed(format!("Failed to insert survey result: {}", e))
            })?;

        Ok(id)
    }
}
