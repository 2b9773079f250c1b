use crate::error::Result;
use crate::gate;
use crate::mistake::{self, Mistake};
use crate::notify::Notifier;
use crate::profile::{ProfileSummary, UserRecord};
use crate::store::UserStore;
use crate::types::{Role, Section};
use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Progress view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LessonProgress {
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionProgress {
    pub section: Section,
    pub lessons: Vec<LessonProgress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub user_id: u64,
    pub sections: Vec<SectionProgress>,
    pub lessons_completed: usize,
    pub lessons_total: usize,
}

// ---------------------------------------------------------------------------
// Relationship management
// ---------------------------------------------------------------------------

/// Link a trainee to a mentor. Both record sides are written here and only
/// here (besides `promote`, which unlinks), so the relationship cannot drift
/// through ad hoc edits.
pub fn assign_mentor(store: &UserStore, trainee_id: u64, mentor_id: u64) -> Result<()> {
    store.load(mentor_id)?.require_role(Role::Mentor)?;
    store.update(trainee_id, |r| {
        r.training_mut()?.mentor = Some(mentor_id);
        Ok(())
    })?;
    store.update(mentor_id, |m| {
        if !m.trainees.contains(&trainee_id) {
            m.trainees.push(trainee_id);
        }
        Ok(())
    })?;
    tracing::info!(trainee_id, mentor_id, "mentor assigned");
    Ok(())
}

/// The mentor's current trainees as renderable summaries. Ids whose records
/// have gone missing are skipped rather than failing the whole roster.
pub fn roster(store: &UserStore, mentor_id: u64) -> Result<Vec<ProfileSummary>> {
    let mentor = store.load(mentor_id)?;
    mentor.require_role(Role::Mentor)?;

    let mut summaries = Vec::new();
    for &trainee_id in &mentor.trainees {
        match store.try_load(trainee_id)? {
            Some(record) => summaries.push(record.summary()),
            None => tracing::warn!(trainee_id, mentor_id, "roster entry has no record"),
        }
    }
    Ok(summaries)
}

// ---------------------------------------------------------------------------
// Review operations
// ---------------------------------------------------------------------------

/// Per-section lesson status with quiz scores, the mentor's progress view.
pub fn progress(store: &UserStore, trainee_id: u64) -> Result<ProgressReport> {
    let record = store.load(trainee_id)?;
    let training = record.training()?;
    let sections = training
        .plan
        .sections
        .iter()
        .map(|s| SectionProgress {
            section: s.section,
            lessons: s
                .lessons
                .iter()
                .map(|l| LessonProgress {
                    title: l.title.clone(),
                    completed: l.status.is_completed(),
                    correct_answers: l.correct_answers,
                    total_questions: l.total_questions,
                })
                .collect(),
        })
        .collect();
    Ok(ProgressReport {
        user_id: trainee_id,
        sections,
        lessons_completed: training.plan.completed_count(),
        lessons_total: training.plan.lesson_count(),
    })
}

/// Mentor sign-off on one remedial task, by position in the task list.
pub fn complete_task(
    store: &UserStore,
    mentor_id: u64,
    trainee_id: u64,
    index: usize,
) -> Result<Mistake> {
    store.load(mentor_id)?.require_role(Role::Mentor)?;
    let updated = store.update(trainee_id, |r| {
        mistake::complete(&mut r.training_mut()?.mistakes, index)?;
        Ok(())
    })?;
    tracing::info!(trainee_id, index, "task completed");
    Ok(updated.training()?.mistakes[index].clone())
}

// ---------------------------------------------------------------------------
// Gate call sites
// ---------------------------------------------------------------------------

/// Unlock the final certification exam. All three gate conditions must hold;
/// on failure nothing is written and the unmet conditions are reported.
pub fn open_final_exam(
    store: &UserStore,
    notifier: &dyn Notifier,
    mentor_id: u64,
    trainee_id: u64,
    today: NaiveDate,
    tenure_days: i64,
) -> Result<()> {
    store.load(mentor_id)?.require_role(Role::Mentor)?;
    let trainee = store.load(trainee_id)?;
    gate::evaluate(&trainee, today, tenure_days)?.require_met()?;

    store.update(trainee_id, |r| {
        r.training_mut()?.final_test_ready = true;
        Ok(())
    })?;
    tracing::info!(trainee_id, "final exam opened");
    notifier.notify(
        trainee_id,
        "The final certification exam is open for you. Run it when you are ready.",
    );
    Ok(())
}

/// Promote a trainee to employee under the same three gates. The trainee
/// record narrows to the employee schema and the mentor link is removed on
/// both sides.
pub fn promote(
    store: &UserStore,
    mentor_id: u64,
    trainee_id: u64,
    today: NaiveDate,
    tenure_days: i64,
) -> Result<UserRecord> {
    store.load(mentor_id)?.require_role(Role::Mentor)?;
    let trainee = store.load(trainee_id)?;
    gate::evaluate(&trainee, today, tenure_days)?.require_met()?;

    let assigned_mentor = trainee.training()?.mentor;
    let updated = store.update(trainee_id, |r| {
        r.promote_to_employee();
        Ok(())
    })?;
    if let Some(mid) = assigned_mentor {
        store.update(mid, |m| {
            m.trainees.retain(|&t| t != trainee_id);
            Ok(())
        })?;
    }
    tracing::info!(trainee_id, "promoted to employee");
    Ok(updated)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Question;
    use crate::error::TrailheadError;
    use crate::gate::GateCondition;
    use crate::notify::MemoryNotifier;
    use crate::plan::{self, CoursePlan};
    use crate::profile::Training;
    use crate::types::Course;
    use tempfile::TempDir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn blank(id: u64, role: Role) -> UserRecord {
        UserRecord {
            user_id: id,
            role,
            first_name: format!("User{id}"),
            last_name: "Test".to_string(),
            position: None,
            city: None,
            venue: None,
            email: None,
            phone_number: None,
            registration_date: day(2026, 1, 1),
            warcoin: 0,
            vr_room: false,
            vr_extreme: false,
            attractions: Vec::new(),
            training: None,
            trainees: Vec::new(),
        }
    }

    fn trainee(id: u64) -> UserRecord {
        let mut record = blank(id, Role::Trainee);
        record.training = Some(Training::new(
            Course::Base,
            CoursePlan::build(Course::Base, &[]),
        ));
        record
    }

    fn complete_plan(store: &UserStore, id: u64) {
        store
            .update(id, |r| {
                let plan = &mut r.training_mut()?.plan;
                let all: Vec<(Section, String)> = plan
                    .sections
                    .iter()
                    .flat_map(|s| s.lessons.iter().map(move |l| (s.section, l.title.clone())))
                    .collect();
                for (section, title) in all {
                    plan.complete_lesson(section, &title)?;
                }
                Ok(())
            })
            .unwrap();
    }

    fn setup() -> (TempDir, UserStore) {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        store.save(&blank(900, Role::Mentor)).unwrap();
        store.save(&trainee(1)).unwrap();
        (dir, store)
    }

    #[test]
    fn assign_links_both_sides() {
        let (_dir, store) = setup();
        assign_mentor(&store, 1, 900).unwrap();
        assert_eq!(store.load(1).unwrap().training().unwrap().mentor, Some(900));
        assert_eq!(store.load(900).unwrap().trainees, [1]);

        // Assigning twice does not duplicate the roster entry.
        assign_mentor(&store, 1, 900).unwrap();
        assert_eq!(store.load(900).unwrap().trainees, [1]);
    }

    #[test]
    fn assign_requires_mentor_role() {
        let (_dir, store) = setup();
        store.save(&blank(2, Role::Employee)).unwrap();
        assert!(matches!(
            assign_mentor(&store, 1, 2),
            Err(TrailheadError::RoleRequired(Role::Mentor))
        ));
    }

    #[test]
    fn roster_summaries() {
        let (_dir, store) = setup();
        assign_mentor(&store, 1, 900).unwrap();
        let roster = roster(&store, 900).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user_id, 1);
        assert_eq!(roster[0].course, Some(4));
    }

    #[test]
    fn roster_skips_missing_records() {
        let (_dir, store) = setup();
        store
            .update(900, |m| {
                m.trainees = vec![1, 404];
                Ok(())
            })
            .unwrap();
        let roster = roster(&store, 900).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn progress_carries_scores() {
        let (_dir, store) = setup();
        store
            .update(1, |r| {
                let training = r.training_mut()?;
                let lesson = training.plan.lesson_mut(Section::Excursion, plan::TEST)?;
                lesson.status = crate::types::LessonStatus::Completed;
                lesson.total_questions = Some(10);
                lesson.correct_answers = Some(7);
                Ok(())
            })
            .unwrap();
        let report = progress(&store, 1).unwrap();
        assert_eq!(report.lessons_total, 10);
        assert_eq!(report.lessons_completed, 1);
        let excursion = &report.sections[0];
        assert_eq!(excursion.section, Section::Excursion);
        let test = excursion
            .lessons
            .iter()
            .find(|l| l.title == plan::TEST)
            .unwrap();
        assert!(test.completed);
        assert_eq!(test.correct_answers, Some(7));
        assert_eq!(test.total_questions, Some(10));
    }

    #[test]
    fn complete_task_flips_exactly_one() {
        let (_dir, store) = setup();
        store
            .update(1, |r| {
                let mistakes = &mut r.training_mut()?.mistakes;
                for n in 1..=2 {
                    mistakes.push(Mistake::from_question(
                        Section::Events,
                        plan::TEST,
                        &Question {
                            text: format!("Q{n}?"),
                            image: None,
                            correct_answer: 1,
                            quest: format!("task {n}"),
                        },
                    ));
                }
                Ok(())
            })
            .unwrap();

        let task = complete_task(&store, 900, 1, 1).unwrap();
        assert!(task.quest_status.is_completed());
        let mistakes = store.load(1).unwrap().training().unwrap().mistakes.clone();
        assert!(!mistakes[0].quest_status.is_completed());
        assert!(mistakes[1].quest_status.is_completed());

        assert!(matches!(
            complete_task(&store, 900, 1, 9),
            Err(TrailheadError::TaskNotFound(9))
        ));
    }

    #[test]
    fn open_exam_reports_unmet_gates() {
        let (_dir, store) = setup();
        let notifier = MemoryNotifier::new();
        let err = open_final_exam(&store, &notifier, 900, 1, day(2026, 1, 5), 30).unwrap_err();
        match err {
            TrailheadError::GatesNotMet(unmet) => {
                assert_eq!(
                    unmet,
                    [GateCondition::CourseComplete, GateCondition::TenureServed]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        // No mutation, no notification.
        assert!(!store.load(1).unwrap().training().unwrap().final_test_ready);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn open_exam_sets_flag_and_notifies() {
        let (_dir, store) = setup();
        complete_plan(&store, 1);
        let notifier = MemoryNotifier::new();
        open_final_exam(&store, &notifier, 900, 1, day(2026, 3, 1), 30).unwrap();
        assert!(store.load(1).unwrap().training().unwrap().final_test_ready);
        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, 1);
    }

    #[test]
    fn promote_purges_and_unlinks() {
        let (_dir, store) = setup();
        assign_mentor(&store, 1, 900).unwrap();
        complete_plan(&store, 1);
        store
            .update(1, |r| {
                r.award_warcoin(12);
                Ok(())
            })
            .unwrap();

        let promoted = promote(&store, 900, 1, day(2026, 3, 1), 30).unwrap();
        assert_eq!(promoted.role, Role::Employee);
        assert!(promoted.training.is_none());
        assert_eq!(promoted.warcoin, 12);
        assert_eq!(promoted.first_name, "User1");
        assert!(store.load(900).unwrap().trainees.is_empty());
    }

    #[test]
    fn promote_refuses_unmet_gates() {
        let (_dir, store) = setup();
        assign_mentor(&store, 1, 900).unwrap();
        let err = promote(&store, 900, 1, day(2026, 3, 1), 30).unwrap_err();
        assert!(matches!(err, TrailheadError::GatesNotMet(_)));
        let record = store.load(1).unwrap();
        assert_eq!(record.role, Role::Trainee);
        assert!(record.training.is_some());
        assert_eq!(store.load(900).unwrap().trainees, [1]);
    }
}
