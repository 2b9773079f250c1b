use crate::content::Question;
use crate::error::{Result, TrailheadError};
use crate::types::{QuestStatus, Section};
use serde::{Deserialize, Serialize};

/// A remedial task created from a wrong quiz answer. Lives in the trainee
/// record independently of the lesson plan; the mentor flips `quest_status`
/// after reviewing the material with the trainee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mistake {
    pub section: Section,
    pub test_name: String,
    pub question_text: String,
    pub correct_answer: u8,
    pub quest: String,
    pub quest_status: QuestStatus,
}

impl Mistake {
    pub fn from_question(section: Section, test_name: &str, question: &Question) -> Self {
        Self {
            section,
            test_name: test_name.to_string(),
            question_text: question.text.clone(),
            correct_answer: question.correct_answer,
            quest: question.quest.clone(),
            quest_status: QuestStatus::NotCompleted,
        }
    }
}

// ---------------------------------------------------------------------------
// Task list operations (operate on the record's mistakes slice)
// ---------------------------------------------------------------------------

/// Mark one task completed by position. Completing an already-completed
/// task is a no-op; a task never reverts to open.
pub fn complete(mistakes: &mut [Mistake], index: usize) -> Result<&Mistake> {
    let task = mistakes
        .get_mut(index)
        .ok_or(TrailheadError::TaskNotFound(index))?;
    task.quest_status = QuestStatus::Completed;
    Ok(task)
}

/// Vacuously true for a trainee with no recorded mistakes.
pub fn all_completed(mistakes: &[Mistake]) -> bool {
    mistakes.iter().all(|m| m.quest_status.is_completed())
}

pub fn completed_count(mistakes: &[Mistake]) -> usize {
    mistakes
        .iter()
        .filter(|m| m.quest_status.is_completed())
        .count()
}

/// Human-readable summary: "2/5 tasks completed"
pub fn summarize(mistakes: &[Mistake]) -> String {
    format!(
        "{}/{} tasks completed",
        completed_count(mistakes),
        mistakes.len()
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
