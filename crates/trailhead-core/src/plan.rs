use crate::error::{Result, TrailheadError};
use crate::types::{Course, LessonStatus, Section};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lesson titles
// ---------------------------------------------------------------------------

// Titles are data, not UI strings: they must line up with the lesson keys in
// the shipped training-content documents.
pub const INFO: &str = "Инфо";
pub const MATERIAL: &str = "Материал";
pub const MATERIAL_1: &str = "Материал 1";
pub const MATERIAL_2: &str = "Материал 2";
pub const TEST: &str = "Тест";
pub const SUMMARY: &str = "Итог";
pub const SUMMARY_TEST: &str = "Тест итог";

pub fn attraction_test_title(attraction: &str) -> String {
    format!("Тест {attraction}")
}

// ---------------------------------------------------------------------------
// Lesson
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub status: LessonStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
}

impl Lesson {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: LessonStatus::NotCompleted,
            total_questions: None,
            correct_answers: None,
        }
    }
}

// ---------------------------------------------------------------------------
// SectionPlan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionPlan {
    pub section: Section,
    pub lessons: Vec<Lesson>,
}

impl SectionPlan {
    pub fn is_complete(&self) -> bool {
        self.lessons.iter().all(|l| l.status.is_completed())
    }
}

// ---------------------------------------------------------------------------
// CoursePlan
// ---------------------------------------------------------------------------

/// The materialized curriculum for one trainee. Section order and lesson
/// order within a section define progression order; both are fixed at build
/// time and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursePlan {
    pub sections: Vec<SectionPlan>,
}

impl CoursePlan {
    /// Expand a course variant into its full lesson plan. Pure: the same
    /// course and attraction selection always produce the same plan.
    /// `attractions` is the selected attraction names in selection order;
    /// it only contributes to courses 1 and 2.
    pub fn build(course: Course, attractions: &[String]) -> Self {
        let sections = match course {
            Course::AttractionsAndVr => vec![
                attractions_section(attractions),
                long_section(Section::Arena),
                long_section(Section::VrRoom),
                short_section(Section::Excursion),
                short_section(Section::Events),
            ],
            Course::AttractionsOnly => vec![
                attractions_section(attractions),
                long_section(Section::Arena),
                short_section(Section::Excursion),
                short_section(Section::Events),
            ],
            Course::VrOnly => vec![
                long_section(Section::VrRoom),
                long_section(Section::Arena),
                short_section(Section::Excursion),
                short_section(Section::Events),
            ],
            Course::Base => vec![
                short_section(Section::Excursion),
                short_section(Section::Events),
            ],
        };
        tracing::info!(course = course.number(), "course plan built");
        Self { sections }
    }

    pub fn section(&self, section: Section) -> Option<&SectionPlan> {
        self.sections.iter().find(|s| s.section == section)
    }

    pub fn lesson(&self, section: Section, title: &str) -> Option<&Lesson> {
        self.section(section)?.lessons.iter().find(|l| l.title == title)
    }

    pub fn lesson_mut(&mut self, section: Section, title: &str) -> Result<&mut Lesson> {
        self.sections
            .iter_mut()
            .find(|s| s.section == section)
            .and_then(|s| s.lessons.iter_mut().find(|l| l.title == title))
            .ok_or_else(|| TrailheadError::LessonNotFound {
                section,
                title: title.to_string(),
            })
    }

    /// First lesson, in plan order, that is still open. `None` means the
    /// whole course is complete.
    pub fn next_incomplete(&self) -> Option<(Section, &Lesson)> {
        self.sections.iter().find_map(|s| {
            s.lessons
                .iter()
                .find(|l| !l.status.is_completed())
                .map(|l| (s.section, l))
        })
    }

    /// Flip a lesson to completed. Returns `true` if the status changed,
    /// `false` if the lesson was already completed (idempotent).
    pub fn complete_lesson(&mut self, section: Section, title: &str) -> Result<bool> {
        let lesson = self.lesson_mut(section, title)?;
        if lesson.status.is_completed() {
            return Ok(false);
        }
        lesson.status = LessonStatus::Completed;
        Ok(true)
    }

    pub fn section_complete(&self, section: Section) -> bool {
        self.section(section).is_some_and(|s| s.is_complete())
    }

    pub fn is_complete(&self) -> bool {
        self.sections.iter().all(|s| s.is_complete())
    }

    pub fn incomplete_sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| !s.is_complete())
            .map(|s| s.section)
            .collect()
    }

    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(|s| s.lessons.len()).sum()
    }

    pub fn completed_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.lessons)
            .filter(|l| l.status.is_completed())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Section templates
// ---------------------------------------------------------------------------

/// Arena and VR-Room: two material lessons and a mid-section quiz.
fn long_section(section: Section) -> SectionPlan {
    SectionPlan {
        section,
        lessons: vec![
            Lesson::new(INFO),
            Lesson::new(MATERIAL_1),
            Lesson::new(MATERIAL_2),
            Lesson::new(TEST),
            Lesson::new(SUMMARY),
            Lesson::new(SUMMARY_TEST),
        ],
    }
}

/// Excursion and Events: one material lesson and a mid-section quiz.
fn short_section(section: Section) -> SectionPlan {
    SectionPlan {
        section,
        lessons: vec![
            Lesson::new(INFO),
            Lesson::new(MATERIAL),
            Lesson::new(TEST),
            Lesson::new(SUMMARY),
            Lesson::new(SUMMARY_TEST),
        ],
    }
}

/// Attractions: a lesson and quiz pair is spliced in for every selected
/// attraction, between the shared intro and the closing summary block.
fn attractions_section(attractions: &[String]) -> SectionPlan {
    let mut lessons = vec![Lesson::new(INFO), Lesson::new(MATERIAL)];
    for attraction in attractions {
        lessons.push(Lesson::new(attraction.clone()));
        lessons.push(Lesson::new(attraction_test_title(attraction)));
    }
    lessons.push(Lesson::new(SUMMARY));
    lessons.push(Lesson::new(SUMMARY_TEST));
    SectionPlan {
        section: Section::Attractions,
        lessons,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(plan: &CoursePlan, section: Section) -> Vec<&str> {
        plan.section(section)
            .unwrap()
            .lessons
            .iter()
            .map(|l| l.title.as_str())
            .collect()
    }

    #[test]
    fn course_one_splices_selected_attractions() {
        let plan = CoursePlan::build(Course::AttractionsAndVr, &["Twister".to_string()]);
        assert_eq!(
            titles(&plan, Section::Attractions),
            ["Инфо", "Материал", "Twister", "Тест Twister", "Итог", "Тест итог"]
        );
        assert!(plan
            .sections
            .iter()
            .flat_map(|s| &s.lessons)
            .all(|l| !l.status.is_completed()));
    }

    #[test]
    fn course_sections_per_variant() {
        let order = |c| {
            CoursePlan::build(c, &[])
                .sections
                .iter()
                .map(|s| s.section)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            order(Course::AttractionsAndVr),
            [
                Section::Attractions,
                Section::Arena,
                Section::VrRoom,
                Section::Excursion,
                Section::Events
            ]
        );
        assert_eq!(
            order(Course::AttractionsOnly),
            [
                Section::Attractions,
                Section::Arena,
                Section::Excursion,
                Section::Events
            ]
        );
        assert_eq!(
            order(Course::VrOnly),
            [
                Section::VrRoom,
                Section::Arena,
                Section::Excursion,
                Section::Events
            ]
        );
        assert_eq!(order(Course::Base), [Section::Excursion, Section::Events]);
    }

    #[test]
    fn build_is_deterministic() {
        let selected = vec!["Twister".to_string(), "Emotion".to_string()];
        let a = CoursePlan::build(Course::AttractionsOnly, &selected);
        let b = CoursePlan::build(Course::AttractionsOnly, &selected);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn attraction_order_follows_selection_order() {
        let selected = vec!["Emotion".to_string(), "Twister".to_string()];
        let plan = CoursePlan::build(Course::AttractionsAndVr, &selected);
        assert_eq!(
            titles(&plan, Section::Attractions),
            [
                "Инфо",
                "Материал",
                "Emotion",
                "Тест Emotion",
                "Twister",
                "Тест Twister",
                "Итог",
                "Тест итог"
            ]
        );
    }

    #[test]
    fn cursor_scans_in_plan_order() {
        let mut plan = CoursePlan::build(Course::VrOnly, &[]);
        // Complete the whole first section
        let first: Vec<String> = plan.sections[0]
            .lessons
            .iter()
            .map(|l| l.title.clone())
            .collect();
        for title in first {
            plan.complete_lesson(Section::VrRoom, &title).unwrap();
        }
        let (section, lesson) = plan.next_incomplete().unwrap();
        assert_eq!(section, Section::Arena);
        assert_eq!(lesson.title, INFO);
    }

    #[test]
    fn earlier_incomplete_section_wins() {
        let mut plan = CoursePlan::build(Course::Base, &[]);
        // Leave one lesson open in Excursion, complete Events fully
        plan.complete_lesson(Section::Excursion, INFO).unwrap();
        let events: Vec<String> = plan
            .section(Section::Events)
            .unwrap()
            .lessons
            .iter()
            .map(|l| l.title.clone())
            .collect();
        for title in events {
            plan.complete_lesson(Section::Events, &title).unwrap();
        }
        let (section, lesson) = plan.next_incomplete().unwrap();
        assert_eq!(section, Section::Excursion);
        assert_eq!(lesson.title, MATERIAL);
    }

    #[test]
    fn complete_lesson_is_idempotent() {
        let mut plan = CoursePlan::build(Course::Base, &[]);
        assert!(plan.complete_lesson(Section::Events, INFO).unwrap());
        assert!(!plan.complete_lesson(Section::Events, INFO).unwrap());
    }

    #[test]
    fn complete_unknown_lesson_fails() {
        let mut plan = CoursePlan::build(Course::Base, &[]);
        assert!(plan.complete_lesson(Section::Events, "Twister").is_err());
        assert!(plan.complete_lesson(Section::Arena, INFO).is_err());
    }

    #[test]
    fn full_completion_is_terminal() {
        let mut plan = CoursePlan::build(Course::Base, &[]);
        let all: Vec<(Section, String)> = plan
            .sections
            .iter()
            .flat_map(|s| s.lessons.iter().map(move |l| (s.section, l.title.clone())))
            .collect();
        for (section, title) in all {
            plan.complete_lesson(section, &title).unwrap();
        }
        assert!(plan.is_complete());
        assert!(plan.next_incomplete().is_none());
        assert!(plan.incomplete_sections().is_empty());
    }

    #[test]
    fn counts() {
        let mut plan = CoursePlan::build(Course::Base, &[]);
        assert_eq!(plan.lesson_count(), 10);
        assert_eq!(plan.completed_count(), 0);
        plan.complete_lesson(Section::Excursion, INFO).unwrap();
        assert_eq!(plan.completed_count(), 1);
    }
}
