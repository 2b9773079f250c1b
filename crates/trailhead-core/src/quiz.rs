use crate::content::{Question, Quiz, TrainingContent};
use crate::error::{Result, TrailheadError};
use crate::mistake::Mistake;
use crate::profile::UserRecord;
use crate::store::UserStore;
use crate::types::{LessonStatus, Section};
use serde::Serialize;

// ---------------------------------------------------------------------------
// QuizStep / QuizReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum QuizStep {
    /// Next question to present.
    Question(Question),
    /// The quiz just finished and the record was updated.
    Finished(QuizReport),
    /// The owning lesson was already completed; nothing was written.
    AlreadyCompleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    pub section: Section,
    pub lesson: String,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Remedial tasks created during this run, already persisted.
    pub new_tasks: Vec<Mistake>,
    pub warcoin_balance: u64,
    /// True when this quiz closed out its whole section.
    pub section_complete: bool,
}

// ---------------------------------------------------------------------------
// QuizSession
// ---------------------------------------------------------------------------

/// One in-flight quiz for one user. The question list is snapshotted at
/// start; the running score and wrong-answer list are ephemeral, but every
/// wrong answer is written to the record's mistakes the moment it happens,
/// so an abandoned session leaves its remedial tasks behind.
pub struct QuizSession {
    user_id: u64,
    section: Section,
    lesson: String,
    quiz: Quiz,
    current: usize,
    correct: u32,
    wrong: Vec<Mistake>,
}

impl QuizSession {
    pub fn new(user_id: u64, section: Section, lesson: impl Into<String>, quiz: Quiz) -> Self {
        Self {
            user_id,
            section,
            lesson: lesson.into(),
            quiz,
            current: 0,
            correct: 0,
            wrong: Vec::new(),
        }
    }

    /// Open a session for the quiz lesson the cursor surfaced.
    pub fn start(
        record: &UserRecord,
        content: &TrainingContent,
        section: Section,
        lesson: &str,
    ) -> Result<Self> {
        record.training()?;
        let quiz = content.quiz(section, lesson)?.clone();
        tracing::info!(user_id = record.user_id, %section, lesson, "quiz started");
        Ok(Self::new(record.user_id, section, lesson, quiz))
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn lesson(&self) -> &str {
        &self.lesson
    }

    /// 1-based number of the question currently awaiting an answer.
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    /// The question awaiting an answer, or `None` when the quiz is past its
    /// last question (including a quiz defined with no questions at all).
    pub fn question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    /// Score one answer and advance. Wrong answers become remedial tasks and
    /// are persisted immediately, not batched at the end.
    pub fn answer(&mut self, store: &UserStore, answer: u8) -> Result<QuizStep> {
        let Some(question) = self.question().cloned() else {
            return self.finish_step(store);
        };

        if answer == question.correct_answer {
            self.correct += 1;
            tracing::info!(
                user_id = self.user_id,
                question = self.question_number(),
                "correct answer"
            );
        } else {
            let mistake = Mistake::from_question(self.section, &self.lesson, &question);
            self.wrong.push(mistake.clone());
            store.update(self.user_id, move |r| {
                r.training_mut()?.mistakes.push(mistake);
                Ok(())
            })?;
            tracing::info!(
                user_id = self.user_id,
                question = self.question_number(),
                "wrong answer recorded as task"
            );
        }

        self.current += 1;
        match self.question() {
            Some(next) => Ok(QuizStep::Question(next.clone())),
            None => self.finish_step(store),
        }
    }

    fn finish_step(&self, store: &UserStore) -> Result<QuizStep> {
        Ok(match self.finish(store)? {
            Some(report) => QuizStep::Finished(report),
            None => QuizStep::AlreadyCompleted,
        })
    }

    /// Close out the quiz: mark the lesson completed, record the score, add
    /// the correct count to warcoin, persist once. Returns `None` without
    /// writing when the lesson is already completed, so finishing twice (or
    /// racing an external completion) cannot double-award.
    pub fn finish(&self, store: &UserStore) -> Result<Option<QuizReport>> {
        let existing = store.load(self.user_id)?;
        let lesson = existing
            .training()?
            .plan
            .lesson(self.section, &self.lesson)
            .ok_or_else(|| TrailheadError::LessonNotFound {
                section: self.section,
                title: self.lesson.clone(),
            })?;
        if lesson.status.is_completed() {
            tracing::info!(
                user_id = self.user_id,
                lesson = %self.lesson,
                "quiz already completed, skipping"
            );
            return Ok(None);
        }

        let total = self.quiz.questions.len() as u32;
        let updated = store.update(self.user_id, |r| {
            {
                let training = r.training_mut()?;
                let lesson = training.plan.lesson_mut(self.section, &self.lesson)?;
                lesson.status = LessonStatus::Completed;
                lesson.total_questions = Some(total);
                lesson.correct_answers = Some(self.correct);
            }
            r.award_warcoin(u64::from(self.correct));
            Ok(())
        })?;

        let section_complete = updated.training()?.plan.section_complete(self.section);
        tracing::info!(
            user_id = self.user_id,
            lesson = %self.lesson,
            correct = self.correct,
            total,
            section_complete,
            "quiz finished"
        );

        Ok(Some(QuizReport {
            section: self.section,
            lesson: self.lesson.clone(),
            total_questions: total,
            correct_answers: self.correct,
            new_tasks: self.wrong.clone(),
            warcoin_balance: updated.warcoin,
            section_complete,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::plan;
    use crate::registration::{register, Registration};
    use crate::types::{Position, Venue};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn question(n: u8) -> String {
        format!(
            r#"{{ "text": "Q{n}?", "correct_answer": 1, "quest": "review topic {n}" }}"#
        )
    }

    fn content() -> TrainingContent {
        let questions: Vec<String> = (1..=5).map(question).collect();
        let json = format!(
            r#"{{
                "Excursion": {{
                    "Тест": {{ "questions": [{}] }}
                }}
            }}"#,
            questions.join(",")
        );
        serde_json::from_str(&json).unwrap()
    }

    fn setup() -> (TempDir, UserStore, TrainingContent) {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        let registration = Registration {
            user_id: 1,
            position: Position::Operator,
            first_name: "Oleg".to_string(),
            last_name: "Frolov".to_string(),
            city: "Kazan".to_string(),
            venue: Venue::Arena,
            email: "oleg@example.com".to_string(),
            phone_number: "+7".to_string(),
            vr_room: false,
            vr_extreme: false,
            attractions: Vec::new(),
        };
        register(
            &store,
            registration,
            &Config::default(),
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        )
        .unwrap();
        (dir, store, content())
    }

    fn start(store: &UserStore, content: &TrainingContent) -> QuizSession {
        let record = store.load(1).unwrap();
        QuizSession::start(&record, content, Section::Excursion, plan::TEST).unwrap()
    }

    #[test]
    fn three_wrong_out_of_five() {
        let (_dir, store, content) = setup();
        let mut session = start(&store, &content);

        // Two right, then three wrong.
        assert!(matches!(
            session.answer(&store, 1).unwrap(),
            QuizStep::Question(_)
        ));
        session.answer(&store, 1).unwrap();
        session.answer(&store, 3).unwrap();
        session.answer(&store, 3).unwrap();
        let report = match session.answer(&store, 4).unwrap() {
            QuizStep::Finished(report) => report,
            other => panic!("expected finish, got {other:?}"),
        };

        assert_eq!(report.total_questions, 5);
        assert_eq!(report.correct_answers, 2);
        assert_eq!(report.new_tasks.len(), 3);
        assert_eq!(report.warcoin_balance, 2);
        assert!(!report.section_complete);

        let record = store.load(1).unwrap();
        let training = record.training().unwrap();
        assert_eq!(training.mistakes.len(), 3);
        assert_eq!(training.mistakes[0].quest, "review topic 3");
        let lesson = training.plan.lesson(Section::Excursion, plan::TEST).unwrap();
        assert!(lesson.status.is_completed());
        assert_eq!(lesson.total_questions, Some(5));
        assert_eq!(lesson.correct_answers, Some(2));
        assert_eq!(record.warcoin, 2);
    }

    #[test]
    fn finish_twice_is_a_no_op() {
        let (_dir, store, content) = setup();
        let mut session = start(&store, &content);
        for _ in 0..5 {
            session.answer(&store, 1).unwrap();
        }
        assert_eq!(store.load(1).unwrap().warcoin, 5);

        // Second finish: silent, no score change, no warcoin change.
        assert!(session.finish(&store).unwrap().is_none());
        let record = store.load(1).unwrap();
        assert_eq!(record.warcoin, 5);
        let lesson = record
            .training()
            .unwrap()
            .plan
            .lesson(Section::Excursion, plan::TEST)
            .unwrap();
        assert_eq!(lesson.correct_answers, Some(5));
    }

    #[test]
    fn wrong_answers_are_durable_before_finish() {
        let (_dir, store, content) = setup();
        let mut session = start(&store, &content);
        session.answer(&store, 2).unwrap();
        session.answer(&store, 2).unwrap();
        // Session abandoned here; the two tasks are already on the record.
        drop(session);
        let record = store.load(1).unwrap();
        assert_eq!(record.training().unwrap().mistakes.len(), 2);
        // And the lesson is still open.
        let lesson = record
            .training()
            .unwrap()
            .plan
            .lesson(Section::Excursion, plan::TEST)
            .unwrap();
        assert!(!lesson.status.is_completed());
    }

    #[test]
    fn externally_completed_lesson_finishes_silently() {
        let (_dir, store, content) = setup();
        let mut session = start(&store, &content);
        for _ in 0..4 {
            session.answer(&store, 1).unwrap();
        }
        // The lesson gets completed out from under the session.
        store
            .update(1, |r| {
                r.training_mut()?
                    .plan
                    .complete_lesson(Section::Excursion, plan::TEST)?;
                Ok(())
            })
            .unwrap();
        assert!(matches!(
            session.answer(&store, 1).unwrap(),
            QuizStep::AlreadyCompleted
        ));
        assert_eq!(store.load(1).unwrap().warcoin, 0);
    }

    #[test]
    fn empty_quiz_finishes_immediately() {
        let (_dir, store, _) = setup();
        let empty: TrainingContent = serde_json::from_str(
            r#"{ "Excursion": { "Тест": { "questions": [] } } }"#,
        )
        .unwrap();
        let record = store.load(1).unwrap();
        let mut session =
            QuizSession::start(&record, &empty, Section::Excursion, plan::TEST).unwrap();
        assert!(session.question().is_none());
        let report = match session.answer(&store, 1).unwrap() {
            QuizStep::Finished(report) => report,
            other => panic!("expected finish, got {other:?}"),
        };
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.correct_answers, 0);
    }

    #[test]
    fn section_complete_flag_fires() {
        let (_dir, store, content) = setup();
        // Complete every other Excursion lesson first.
        for title in [plan::INFO, plan::MATERIAL, plan::SUMMARY, plan::SUMMARY_TEST] {
            store
                .update(1, |r| {
                    r.training_mut()?
                        .plan
                        .complete_lesson(Section::Excursion, title)?;
                    Ok(())
                })
                .unwrap();
        }
        let mut session = start(&store, &content);
        let mut last = None;
        for _ in 0..5 {
            last = Some(session.answer(&store, 1).unwrap());
        }
        match last.unwrap() {
            QuizStep::Finished(report) => assert!(report.section_complete),
            other => panic!("expected finish, got {other:?}"),
        }
    }

    #[test]
    fn start_requires_a_quiz_lesson() {
        let (_dir, store, _) = setup();
        let record = store.load(1).unwrap();
        let material: TrainingContent = serde_json::from_str(
            r#"{ "Excursion": { "Инфо": { "text": "intro" } } }"#,
        )
        .unwrap();
        assert!(QuizSession::start(&record, &material, Section::Excursion, plan::INFO).is_err());
    }
}
