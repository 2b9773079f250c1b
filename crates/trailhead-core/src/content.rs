use crate::error::{Result, TrailheadError};
use crate::paths;
use crate::types::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Lesson content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// 1-based index of the correct answer option.
    pub correct_answer: u8,
    /// Remedial task handed out when this question is answered wrong.
    pub quest: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

/// A plan lesson is either reading material or an embedded quiz. The two are
/// distinguished structurally: a quiz entry carries `questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LessonContent {
    Quiz(Quiz),
    Material(Material),
}

impl LessonContent {
    pub fn is_quiz(&self) -> bool {
        matches!(self, LessonContent::Quiz(_))
    }
}

// ---------------------------------------------------------------------------
// TrainingContent
// ---------------------------------------------------------------------------

/// The whole training catalog: section -> lesson title -> content. Loaded
/// wholesale from one JSON document; lookup order never matters here, the
/// course plan owns progression order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingContent {
    pub sections: HashMap<Section, HashMap<String, LessonContent>>,
}

impl TrainingContent {
    /// Load the catalog. A missing file is an empty catalog, not an error;
    /// the cursor reports the missing section when it is actually needed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::content_path(root);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "training content file not found");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let content: TrainingContent = serde_json::from_str(&data)?;
        tracing::info!(sections = content.sections.len(), "training content loaded");
        Ok(content)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::content_path(root);
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn section(&self, section: Section) -> Option<&HashMap<String, LessonContent>> {
        self.sections.get(&section)
    }

    pub fn lesson(&self, section: Section, title: &str) -> Option<&LessonContent> {
        self.sections.get(&section)?.get(title)
    }

    pub fn quiz(&self, section: Section, title: &str) -> Result<&Quiz> {
        match self.lesson(section, title) {
            Some(LessonContent::Quiz(quiz)) => Ok(quiz),
            _ => Err(TrailheadError::LessonNotFound {
                section,
                title: title.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "Events": {
                "Инфо": { "text": "Events overview" },
                "Тест": {
                    "questions": [
                        {
                            "text": "Question one?",
                            "correct_answer": 2,
                            "quest": "Reread the events handbook"
                        }
                    ]
                }
            }
        }"#
    }

    #[test]
    fn parses_material_and_quiz() {
        let content: TrainingContent = serde_json::from_str(sample_json()).unwrap();
        assert!(!content
            .lesson(Section::Events, "Инфо")
            .unwrap()
            .is_quiz());
        assert!(content.lesson(Section::Events, "Тест").unwrap().is_quiz());

        let quiz = content.quiz(Section::Events, "Тест").unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, 2);
    }

    #[test]
    fn quiz_lookup_on_material_fails() {
        let content: TrainingContent = serde_json::from_str(sample_json()).unwrap();
        assert!(content.quiz(Section::Events, "Инфо").is_err());
        assert!(content.quiz(Section::Arena, "Тест").is_err());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let content = TrainingContent::load(dir.path()).unwrap();
        assert!(content.sections.is_empty());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let content: TrainingContent = serde_json::from_str(sample_json()).unwrap();
        content.save(dir.path()).unwrap();
        let loaded = TrainingContent::load(dir.path()).unwrap();
        assert!(loaded.lesson(Section::Events, "Тест").unwrap().is_quiz());
    }
}
