use crate::gate::GateCondition;
use crate::types::{Role, Section};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrailheadError {
    #[error("not initialized: run 'trailhead init'")]
    NotInitialized,

    #[error("profile not found: {0}")]
    ProfileNotFound(u64),

    #[error("profile already exists: {0}")]
    ProfileExists(u64),

    #[error("user {0} is not a trainee")]
    NotATrainee(u64),

    #[error("requires the {0} role")]
    RoleRequired(Role),

    #[error("no city set on the profile")]
    CityMissing,

    #[error("no training content for section '{0}'")]
    ContentNotFound(Section),

    #[error("lesson '{title}' not found in section '{section}'")]
    LessonNotFound { section: Section, title: String },

    #[error("task {0} not found")]
    TaskNotFound(usize),

    #[error("conditions not met: {}", join_conditions(.0))]
    GatesNotMet(Vec<GateCondition>),

    #[error("the final exam is not open")]
    ExamNotReady,

    #[error("no questions available for the final exam")]
    NoExamQuestions,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("city '{0}' does not match any configured venue")]
    UnknownCity(String),

    #[error("invalid course number: {0}")]
    InvalidCourse(u8),

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid venue: {0}")]
    InvalidVenue(String),

    #[error("invalid section: {0}")]
    InvalidSection(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrailheadError>;

fn join_conditions(unmet: &[GateCondition]) -> String {
    unmet
        .iter()
        .map(|c| c.describe())
        .collect::<Vec<_>>()
        .join(", ")
}
