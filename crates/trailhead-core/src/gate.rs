use crate::error::{Result, TrailheadError};
use crate::mistake;
use crate::profile::UserRecord;
use crate::types::Section;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// GateCondition
// ---------------------------------------------------------------------------

/// The three prerequisites shared by exam-unlock and promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCondition {
    CourseComplete,
    TasksComplete,
    TenureServed,
}

impl GateCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            GateCondition::CourseComplete => "course_complete",
            GateCondition::TasksComplete => "tasks_complete",
            GateCondition::TenureServed => "tenure_served",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            GateCondition::CourseComplete => "complete the full training course",
            GateCondition::TasksComplete => "complete all assigned tasks",
            GateCondition::TenureServed => "serve the minimum tenure",
        }
    }
}

impl fmt::Display for GateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GateReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GateCheck {
    pub condition: GateCondition,
    pub met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    pub checks: Vec<GateCheck>,
    /// Sections still holding open lessons, named so a failed
    /// course-completion check can be rendered precisely.
    pub incomplete_sections: Vec<Section>,
    pub tenure_days: i64,
}

impl GateReport {
    pub fn all_met(&self) -> bool {
        self.checks.iter().all(|c| c.met)
    }

    pub fn unmet(&self) -> Vec<GateCondition> {
        self.checks
            .iter()
            .filter(|c| !c.met)
            .map(|c| c.condition)
            .collect()
    }

    /// Error out with the specific unmet conditions; callers mutate nothing
    /// past this point.
    pub fn require_met(&self) -> Result<()> {
        if self.all_met() {
            Ok(())
        } else {
            Err(TrailheadError::GatesNotMet(self.unmet()))
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Pure check of a trainee record against the three gate conditions.
pub fn evaluate(record: &UserRecord, today: NaiveDate, tenure_days: i64) -> Result<GateReport> {
    let training = record.training()?;

    let course_complete = training.plan.is_complete();
    let tasks_complete = mistake::all_completed(&training.mistakes);
    let served = record.tenure_days(today);
    let tenure_served = served >= tenure_days;

    Ok(GateReport {
        checks: vec![
            GateCheck {
                condition: GateCondition::CourseComplete,
                met: course_complete,
            },
            GateCheck {
                condition: GateCondition::TasksComplete,
                met: tasks_complete,
            },
            GateCheck {
                condition: GateCondition::TenureServed,
                met: tenure_served,
            },
        ],
        incomplete_sections: training.plan.incomplete_sections(),
        tenure_days: served,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
