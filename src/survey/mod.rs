pub mod classifier;
pub mod processor;
pub mod reference;
pub mod statistics;
pub mod validation;

pub use classifier::{
    classify, select_content, ClassificationResult, ContentChoice, Length, OverallAnalysis,
    PetPreference,
};
pub use processor::{ProcessError, SurveyProcessor};
pub use reference::ReferenceTexts;
pub use statistics::{compute, StatisticsSummary};
pub use validation::{validate, ValidationError};

use serde::{Deserialize, Serialize};

pub const QUESTION_COUNT: usize = 10;
pub const MIN_QUESTION_VALUE: i64 = 1;
pub const MAX_QUESTION_VALUE: i64 = 7;
pub const MIN_USER_ID_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    pub question_number: u8,
    pub question_value: u8,
}

/// A payload that passed validation. Only `validation::validate` builds one,
/// so every question 1..=10 is present exactly once with a value in 1..=7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub user_id: String,
    pub survey_results: Vec<SurveyAnswer>,
}

impl SurveySubmission {
    pub fn answers(&self) -> Answers {
        let mut values = [0u8; QUESTION_COUNT];
        for answer in &self.survey_results {
            values[usize::from(answer.question_number) - 1] = answer.question_value;
        }
        Answers(values)
    }

    /// Answer values in submission order.
    pub fn values(&self) -> Vec<u8> {
        self.survey_results.iter().map(|a| a.question_value).collect()
    }
}

/// Answer values keyed by question number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers([u8; QUESTION_COUNT]);

impl Answers {
    /// Values ordered by question number, so `values[0]` answers question 1.
    pub fn from_values(values: [u8; QUESTION_COUNT]) -> Self {
        Answers(values)
    }

    pub fn get(&self, question_number: usize) -> u8 {
        self.0[question_number - 1]
    }

    pub fn values(&self) -> &[u8] {
        &self.0
    }

    pub fn mean(&self) -> f64 {
        let sum: u32 = self.0.iter().map(|&v| u32::from(v)).sum();
        f64::from(sum) / QUESTION_COUNT as f64
    }
}

/// Everything stored for one submission, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub classification: ClassificationResult,
    pub description: String,
    pub statistics: StatisticsSummary,
}

impl SurveyRecord {
    pub fn with_id(self, db_id: impl ToString) -> SurveyResultRecord {
        SurveyResultRecord {
            record: self,
            db_id: db_id.to_string(),
        }
    }
}

/// A persisted record as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResultRecord {
    #[serde(flatten)]
    pub record: SurveyRecord,
    pub db_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> SurveySubmission {
        // Submitted out of order on purpose
        let pairs = [
            (3, 3),
            (1, 7),
            (2, 5),
            (4, 1),
            (5, 6),
            (6, 6),
            (7, 2),
            (8, 7),
            (9, 6),
            (10, 6),
        ];
        SurveySubmission {
            user_id: "test_user123".to_string(),
            survey_results: pairs
                .iter()
                .map(|&(n, v)| SurveyAnswer { question_number: n, question_value: v })
                .collect(),
        }
    }

    #[test]
    fn test_answers_are_keyed_by_question_number() {
        let answers = submission().answers();
        assert_eq!(answers.get(1), 7);
        assert_eq!(answers.get(3), 3);
        assert_eq!(answers.get(10), 6);
        assert_eq!(answers.values(), &[7, 5, 3, 1, 6, 6, 2, 7, 6, 6]);
    }

    #[test]
    fn test_values_keep_submission_order() {
        assert_eq!(submission().values(), vec![3, 7, 5, 1, 6, 6, 2, 7, 6, 6]);
    }

    #[test]
    fn test_answers_mean() {
        let answers = Answers::from_values([1, 2, 3, 4, 5, 6, 7, 1, 2, 3]);
        assert!((answers.mean() - 3.4).abs() < 1e-9);
    }

    #[test]
    fn test_result_record_json_shape() {
        let record = SurveyRecord {
            user_id: "test_user123".to_string(),
            classification: ClassificationResult {
                overall_analysis: OverallAnalysis::Unsure,
                cat_dog: PetPreference::Dogs,
                fur_value: Length::Short,
                tail_value: Length::Long,
            },
            description: "Test description".to_string(),
            statistics: StatisticsSummary { mean: 4.9, median: 6.0, std_dev: 2.13 },
        }
        .with_id("65f1c0ffee");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "test_user123",
                "overall_analysis": "unsure",
                "cat_dog": "dogs",
                "fur_value": "short",
                "tail_value": "long",
                "description": "Test description",
                "statistics": {"mean": 4.9, "median": 6.0, "std_dev": 2.13},
                "db_id": "65f1c0ffee"
            })
        );

        let text = serde_json::to_string(&record).unwrap();
        let user_pos = text.find("user_id").unwrap();
        let db_pos = text.find("db_id").unwrap();
        assert!(user_pos < db_pos);
    }
}
