use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{Result, SurveyStore};
use crate::survey::SurveyRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSurvey {
    pub id: Uuid,
    pub record: SurveyRecord,
    pub created_at: DateTime<Utc>,
}

/// Process-local store, used for `SURVEY_STORE=memory` runs and in tests.
#[derive(Debug, Default)]
pub struct MemorySurveyStore {
    records: Mutex<Vec<StoredSurvey>>,
}

impl MemorySurveyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<StoredSurvey> {
        self.records.lock().iter().find(|s| &s.id == id).cloned()
    }
}

#[async_trait]
impl SurveyStore for MemorySurveyStore {
    async fn insert_record(&self, record: &SurveyRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.records.lock().push(StoredSurvey {
            id,
            record: record.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}
