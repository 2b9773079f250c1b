use crate::content::{LessonContent, Material, TrainingContent};
use crate::error::{Result, TrailheadError};
use crate::profile::UserRecord;
use crate::store::UserStore;
use crate::types::Section;
use serde::Serialize;

// ---------------------------------------------------------------------------
// TrainingStep
// ---------------------------------------------------------------------------

/// What the trainee should see next. The delivery layer renders a lesson,
/// starts a quiz session, or congratulates on completion.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TrainingStep {
    Lesson {
        section: Section,
        title: String,
        material: Material,
    },
    Quiz {
        section: Section,
        lesson: String,
        questions: usize,
    },
    Complete,
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Find the first open lesson, scanning sections in plan order and lessons
/// in stored order. A lesson whose content is a quiz definition is handed to
/// the quiz engine instead of being displayed.
pub fn next_step(record: &UserRecord, content: &TrainingContent) -> Result<TrainingStep> {
    let training = record.training()?;

    let Some((section, lesson)) = training.plan.next_incomplete() else {
        tracing::info!(user_id = record.user_id, "training complete");
        return Ok(TrainingStep::Complete);
    };

    let section_content = content
        .section(section)
        .ok_or(TrailheadError::ContentNotFound(section))?;

    match section_content.get(&lesson.title) {
        Some(LessonContent::Quiz(quiz)) => Ok(TrainingStep::Quiz {
            section,
            lesson: lesson.title.clone(),
            questions: quiz.questions.len(),
        }),
        Some(LessonContent::Material(material)) => Ok(TrainingStep::Lesson {
            section,
            title: lesson.title.clone(),
            material: material.clone(),
        }),
        None => Err(TrailheadError::LessonNotFound {
            section,
            title: lesson.title.clone(),
        }),
    }
}

/// The externally-triggered "next" on a material lesson: mark it completed,
/// persist, and return the following step. Re-advancing an already-completed
/// lesson changes nothing.
pub fn advance(
    store: &UserStore,
    content: &TrainingContent,
    user_id: u64,
    section: Section,
    title: &str,
) -> Result<TrainingStep> {
    let record = store.update(user_id, |r| {
        let flipped = r.training_mut()?.plan.complete_lesson(section, title)?;
        if flipped {
            tracing::info!(user_id, %section, title, "lesson completed");
        }
        Ok(())
    })?;
    next_step(&record, content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
