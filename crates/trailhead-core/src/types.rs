use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Trainee,
    Employee,
    Manager,
    Mentor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Trainee => "trainee",
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Mentor => "mentor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainee" => Ok(Role::Trainee),
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "mentor" => Ok(Role::Mentor),
            _ => Err(crate::error::TrailheadError::InvalidRole(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Operator,
    Administrator,
    Hostess,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Operator => "operator",
            Position::Administrator => "administrator",
            Position::Hostess => "hostess",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = crate::error::TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Position::Operator),
            "administrator" => Ok(Position::Administrator),
            "hostess" => Ok(Position::Hostess),
            _ => Err(crate::error::TrailheadError::InvalidPosition(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

/// Which kind of site the employee works at. An arena has no VR room and no
/// standalone attractions, so registration short-circuits those questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    Park,
    Arena,
}

impl Venue {
    pub fn as_str(self) -> &'static str {
        match self {
            Venue::Park => "park",
            Venue::Arena => "arena",
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Venue {
    type Err = crate::error::TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "park" => Ok(Venue::Park),
            "arena" => Ok(Venue::Arena),
            _ => Err(crate::error::TrailheadError::InvalidVenue(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// Curriculum sections. Serialized names match the section keys of the
/// training-content documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Attractions,
    Arena,
    #[serde(rename = "VR-Room")]
    VrRoom,
    Excursion,
    Events,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Attractions,
            Section::Arena,
            Section::VrRoom,
            Section::Excursion,
            Section::Events,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Attractions => "Attractions",
            Section::Arena => "Arena",
            Section::VrRoom => "VR-Room",
            Section::Excursion => "Excursion",
            Section::Events => "Events",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = crate::error::TrailheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Attractions" => Ok(Section::Attractions),
            "Arena" => Ok(Section::Arena),
            "VR-Room" => Ok(Section::VrRoom),
            "Excursion" => Ok(Section::Excursion),
            "Events" => Ok(Section::Events),
            _ => Err(crate::error::TrailheadError::InvalidSection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// LessonStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    NotCompleted,
    Completed,
}

impl LessonStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, LessonStatus::Completed)
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LessonStatus::NotCompleted => "not_completed",
            LessonStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// QuestStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    NotCompleted,
    Completed,
}

impl QuestStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, QuestStatus::Completed)
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestStatus::NotCompleted => "not_completed",
            QuestStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Course
// ---------------------------------------------------------------------------

/// The four curriculum variants. Persisted as the course number 1-4, the
/// same representation the onboarding records have always carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Course {
    /// Attractions selected and a VR room on site.
    AttractionsAndVr,
    /// Attractions selected, no VR room.
    AttractionsOnly,
    /// VR room only, no attractions.
    VrOnly,
    /// Neither: excursion and events curriculum only.
    Base,
}

impl Course {
    pub fn number(self) -> u8 {
        match self {
            Course::AttractionsAndVr => 1,
            Course::AttractionsOnly => 2,
            Course::VrOnly => 3,
            Course::Base => 4,
        }
    }
}

impl From<Course> for u8 {
    fn from(course: Course) -> u8 {
        course.number()
    }
}

impl TryFrom<u8> for Course {
    type Error = crate::error::TrailheadError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Course::AttractionsAndVr),
            2 => Ok(Course::AttractionsOnly),
            3 => Ok(Course::VrOnly),
            4 => Ok(Course::Base),
            _ => Err(crate::error::TrailheadError::InvalidCourse(n)),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
