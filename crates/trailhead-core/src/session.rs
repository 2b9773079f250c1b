use crate::exam::ExamSession;
use crate::quiz::QuizSession;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// In-memory store for in-flight quiz and exam sessions, keyed by user.
/// Sessions are ephemeral by design: they do not survive a restart, and a
/// session abandoned mid-quiz simply stays here until replaced or removed.
/// Durable side effects (mistakes written per wrong answer) are not owned by
/// the session and persist regardless.
#[derive(Default)]
pub struct SessionStore {
    quizzes: HashMap<u64, QuizSession>,
    exams: HashMap<u64, ExamSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quiz session, replacing (abandoning) any previous one for
    /// the same user.
    pub fn begin_quiz(&mut self, session: QuizSession) -> &mut QuizSession {
        match self.quizzes.entry(session.user_id()) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    pub fn quiz_mut(&mut self, user_id: u64) -> Option<&mut QuizSession> {
        self.quizzes.get_mut(&user_id)
    }

    pub fn take_quiz(&mut self, user_id: u64) -> Option<QuizSession> {
        self.quizzes.remove(&user_id)
    }

    pub fn begin_exam(&mut self, session: ExamSession) -> &mut ExamSession {
        match self.exams.entry(session.user_id()) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    pub fn exam_mut(&mut self, user_id: u64) -> Option<&mut ExamSession> {
        self.exams.get_mut(&user_id)
    }

    pub fn take_exam(&mut self, user_id: u64) -> Option<ExamSession> {
        self.exams.remove(&user_id)
    }

    /// Drop everything in flight for a user.
    pub fn abandon(&mut self, user_id: u64) {
        self.quizzes.remove(&user_id);
        self.exams.remove(&user_id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
