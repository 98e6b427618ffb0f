use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::ContentChoice;

/// The two prompt texts the description is generated from. Read once at
/// startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTexts {
    pub short_hair: String,
    pub long_hair: String,
}

impl ReferenceTexts {
    pub fn new(short_hair: impl Into<String>, long_hair: impl Into<String>) -> Self {
        Self {
            short_hair: short_hair.into(),
            long_hair: long_hair.into(),
        }
    }

    pub fn load(
        short_hair_path: impl AsRef<Path>,
        long_hair_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let short_hair_path = short_hair_path.as_ref();
        let long_hair_path = long_hair_path.as_ref();

        let short_hair = fs::read_to_string(short_hair_path).with_context(|| {
            format!("Failed to read short-hair text from {}", short_hair_path.display())
        })?;
        let long_hair = fs::read_to_string(long_hair_path).with_context(|| {
            format!("Failed to read long-hair text from {}", long_hair_path.display())
        })?;

        Ok(Self { short_hair, long_hair })
    }

    pub fn select(&self, choice: ContentChoice) -> &str {
        match choice {
            ContentChoice::ShortHair => &self.short_hair,
            ContentChoice::LongHair => &self.long_hair,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        let texts = ReferenceTexts::new("short", "long");
        assert_eq!(texts.select(ContentChoice::ShortHair), "short");
        assert_eq!(texts.select(ContentChoice::LongHair), "long");
    }

    #[test]
    fn test_load_bundled_texts() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let texts = ReferenceTexts::load(
            dir.join("the_value_of_short_hair.txt"),
            dir.join("the_value_of_long_hair.txt"),
        )
        .expect("bundled texts should load");
        assert!(!texts.short_hair.trim().is_empty());
        assert!(!texts.long_hair.trim().is_empty());
        assert_ne!(texts.short_hair, texts.long_hair);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = ReferenceTexts::load("does/not/exist_short.txt", "does/not/exist_long.txt")
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist_short.txt"));
    }
}
