use serde::{Deserialize, Serialize};

use super::Answers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallAnalysis {
    Certain,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetPreference {
    Cats,
    Dogs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Long,
    Short,
}

impl OverallAnalysis {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallAnalysis::Certain => "certain",
            OverallAnalysis::Unsure => "unsure",
        }
    }
}

impl PetPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetPreference::Cats => "cats",
            PetPreference::Dogs => "dogs",
        }
    }
}

impl Length {
    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Long => "long",
            Length::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub overall_analysis: OverallAnalysis,
    pub cat_dog: PetPreference,
    pub fur_value: Length,
    pub tail_value: Length,
}

/// Which reference text the description is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentChoice {
    ShortHair,
    LongHair,
}

pub fn classify(answers: &Answers) -> ClassificationResult {
    let overall_analysis = if answers.get(1) == 7 && answers.get(4) < 3 {
        OverallAnalysis::Unsure
    } else {
        OverallAnalysis::Certain
    };

    let cat_dog = if answers.get(10) > 5 && answers.get(9) <= 5 {
        PetPreference::Cats
    } else {
        PetPreference::Dogs
    };

    let fur_value = if answers.mean() > 5.0 { Length::Long } else { Length::Short };
    let tail_value = if answers.get(7) > 4 { Length::Long } else { Length::Short };

    ClassificationResult { overall_analysis, cat_dog, fur_value, tail_value }
}

/// Pick the reference text for the description call.
///
/// The cut-off here is an average above 4, while `fur_value` uses 5. Both
/// thresholds are kept as they are.
pub fn select_content(answers: &Answers) -> ContentChoice {
    if answers.mean() > 4.0 {
        ContentChoice::ShortHair
    } else {
        ContentChoice::LongHair
    }
}
