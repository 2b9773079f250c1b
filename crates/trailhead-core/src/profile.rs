use crate::error::{Result, TrailheadError};
use crate::mistake::Mistake;
use crate::plan::CoursePlan;
use crate::types::{Course, Position, Role, Venue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AttractionPick
// ---------------------------------------------------------------------------

/// One catalog attraction and whether the hire's site runs it. Pick order is
/// catalog order and drives the plan splice order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractionPick {
    pub name: String,
    pub selected: bool,
}

// ---------------------------------------------------------------------------
// Training
// ---------------------------------------------------------------------------

/// The trainee-only part of a record. Promotion drops this whole sub-record,
/// which is exactly the trainee-to-employee schema narrowing: course, plan,
/// mistakes, exam flag, and mentor link all go at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Training {
    pub course: Course,
    pub plan: CoursePlan,
    #[serde(default)]
    pub mistakes: Vec<Mistake>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub final_test_ready: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor: Option<u64>,
}

impl Training {
    pub fn new(course: Course, plan: CoursePlan) -> Self {
        Self {
            course,
            plan,
            mistakes: Vec::new(),
            final_test_ready: false,
            mentor: None,
        }
    }
}

// ---------------------------------------------------------------------------
// UserRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: u64,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub registration_date: NaiveDate,
    #[serde(default)]
    pub warcoin: u64,
    #[serde(default)]
    pub vr_room: bool,
    #[serde(default)]
    pub vr_extreme: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attractions: Vec<AttractionPick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<Training>,
    /// Roster of trainee ids; populated only on mentor records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trainees: Vec<u64>,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(TrailheadError::RoleRequired(role))
        }
    }

    pub fn training(&self) -> Result<&Training> {
        self.training
            .as_ref()
            .ok_or(TrailheadError::NotATrainee(self.user_id))
    }

    pub fn training_mut(&mut self) -> Result<&mut Training> {
        self.training
            .as_mut()
            .ok_or(TrailheadError::NotATrainee(self.user_id))
    }

    /// Warcoin only ever goes up.
    pub fn award_warcoin(&mut self, amount: u64) {
        self.warcoin += amount;
    }

    pub fn selected_attractions(&self) -> Vec<String> {
        self.attractions
            .iter()
            .filter(|p| p.selected)
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn tenure_days(&self, today: NaiveDate) -> i64 {
        (today - self.registration_date).num_days()
    }

    /// Apply the promotion: role becomes Employee and the whole trainee
    /// sub-record is dropped. Identity fields and warcoin stay.
    pub fn promote_to_employee(&mut self) {
        self.role = Role::Employee;
        self.training = None;
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            user_id: self.user_id,
            name: self.full_name(),
            role: self.role,
            position: self.position,
            city: self.city.clone(),
            venue: self.venue,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            registration_date: self.registration_date,
            warcoin: self.warcoin,
            course: self.training.as_ref().map(|t| t.course.number()),
            mentor: self.training.as_ref().and_then(|t| t.mentor),
            task_count: self.training.as_ref().map_or(0, |t| t.mistakes.len()),
            tasks_completed: self
                .training
                .as_ref()
                .map_or(0, |t| crate::mistake::completed_count(&t.mistakes)),
        }
    }
}

// ---------------------------------------------------------------------------
// ProfileSummary
// ---------------------------------------------------------------------------

/// Flattened view of a record for the delivery layer to render.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub user_id: u64,
    pub name: String,
    pub role: Role,
    pub position: Option<Position>,
    pub city: Option<String>,
    pub venue: Option<Venue>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub registration_date: NaiveDate,
    pub warcoin: u64,
    pub course: Option<u8>,
    pub mentor: Option<u64>,
    pub task_count: usize,
    pub tasks_completed: usize,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
