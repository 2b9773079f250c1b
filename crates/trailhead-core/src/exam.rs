use crate::error::{Result, TrailheadError};
use crate::mistake::Mistake;
use crate::notify::Notifier;
use crate::profile::UserRecord;
use crate::store::UserStore;
use serde::Serialize;

// ---------------------------------------------------------------------------
// ExamQuestion / ExamReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ExamQuestion {
    /// 1-based position in the exam.
    pub number: usize,
    pub total: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamReport {
    pub total: usize,
    pub errors: usize,
    /// Tasks behind the questions answered wrong, for review. Unlike the
    /// lesson quizzes these are not written back to the record.
    pub missed: Vec<Mistake>,
}

impl ExamReport {
    pub fn score(&self) -> usize {
        self.total - self.errors
    }
}

// ---------------------------------------------------------------------------
// ExamSession
// ---------------------------------------------------------------------------

/// The final certification exam: one pass over the trainee's accumulated
/// remedial tasks, snapshotted at start. Entirely in memory until the
/// closing write that clears the exam flag.
pub struct ExamSession {
    user_id: u64,
    questions: Vec<Mistake>,
    current: usize,
    errors: Vec<Mistake>,
}

impl ExamSession {
    /// Open a session. Requires the mentor to have unlocked the exam and at
    /// least one recorded mistake to ask about; neither failure leaves any
    /// session state behind.
    pub fn start(record: &UserRecord) -> Result<Self> {
        let training = record.training()?;
        if !training.final_test_ready {
            return Err(TrailheadError::ExamNotReady);
        }
        if training.mistakes.is_empty() {
            return Err(TrailheadError::NoExamQuestions);
        }
        tracing::info!(
            user_id = record.user_id,
            questions = training.mistakes.len(),
            "final exam started"
        );
        Ok(Self {
            user_id: record.user_id,
            questions: training.mistakes.clone(),
            current: 0,
            errors: Vec::new(),
        })
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn question(&self) -> Option<ExamQuestion> {
        self.questions.get(self.current).map(|m| ExamQuestion {
            number: self.current + 1,
            total: self.questions.len(),
            text: m.question_text.clone(),
        })
    }

    /// Score one answer and advance. Returns the next question, or `None`
    /// when the exam is over and `finish` should be called. Wrong answers
    /// are only collected — never persisted.
    pub fn answer(&mut self, answer: u8) -> Option<ExamQuestion> {
        if let Some(question) = self.questions.get(self.current) {
            if answer != question.correct_answer {
                self.errors.push(question.clone());
            }
            self.current += 1;
        }
        self.question()
    }

    /// Close the exam: report to the trainee, forward the same report to the
    /// mentor, and clear the exam flag — this flow cannot be rerun.
    pub fn finish(self, store: &UserStore, notifier: &dyn Notifier) -> Result<ExamReport> {
        let updated = store.update(self.user_id, |r| {
            r.training_mut()?.final_test_ready = false;
            Ok(())
        })?;

        let report = ExamReport {
            total: self.questions.len(),
            errors: self.errors.len(),
            missed: self.errors,
        };
        tracing::info!(
            user_id = self.user_id,
            score = report.score(),
            total = report.total,
            "final exam finished"
        );

        if let Some(mentor_id) = updated.training()?.mentor {
            let mut message = format!(
                "{} passed the certification exam with {}/{}.",
                updated.full_name(),
                report.score(),
                report.total
            );
            if !report.missed.is_empty() {
                message.push_str("\nTasks worth revisiting:");
                for task in &report.missed {
                    message.push_str(&format!("\n- {}", task.quest));
                }
            }
            notifier.notify(mentor_id, &message);
        }

        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
