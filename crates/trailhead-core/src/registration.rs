use crate::classifier;
use crate::config::Config;
use crate::error::{Result, TrailheadError};
use crate::plan::CoursePlan;
use crate::profile::{AttractionPick, Training, UserRecord};
use crate::store::UserStore;
use crate::types::{Position, Role, Venue};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").unwrap()
    })
}

pub fn validate_email(email: &str) -> Result<()> {
    if !email_re().is_match(email) {
        return Err(TrailheadError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// The completed onboarding questionnaire. The delivery layer collects these
/// fields step by step; the core only sees the finished form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: u64,
    pub position: Position,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub venue: Venue,
    pub email: String,
    pub phone_number: String,
    pub vr_room: bool,
    pub vr_extreme: bool,
    /// Attraction picks in catalog order. Ignored unless the venue is a
    /// park with VR-Extreme.
    pub attractions: Vec<AttractionPick>,
}

impl Registration {
    /// Validate the form and materialize the initial trainee record: course
    /// classified and plan built, exactly once. The plan is never rebuilt
    /// for this record afterwards.
    pub fn complete(mut self, config: &Config, today: NaiveDate) -> Result<UserRecord> {
        validate_email(&self.email)?;
        if !config.knows_city(&self.city) {
            return Err(TrailheadError::UnknownCity(self.city));
        }

        // An arena site has neither a VR room nor standalone attractions;
        // without VR-Extreme there is nothing to pick either.
        if self.venue == Venue::Arena {
            self.vr_room = false;
            self.vr_extreme = false;
            self.attractions.clear();
        }
        if !self.vr_extreme {
            for pick in &mut self.attractions {
                pick.selected = false;
            }
        }
        if self.attractions.is_empty() {
            self.attractions = config
                .attractions
                .iter()
                .map(|name| AttractionPick {
                    name: name.clone(),
                    selected: false,
                })
                .collect();
        }

        let has_attractions = classifier::has_selected(&self.attractions);
        let course = classifier::classify(has_attractions, self.vr_room);
        let selected: Vec<String> = self
            .attractions
            .iter()
            .filter(|p| p.selected)
            .map(|p| p.name.clone())
            .collect();
        let plan = CoursePlan::build(course, &selected);
        tracing::info!(
            user_id = self.user_id,
            course = course.number(),
            "registration completed"
        );

        Ok(UserRecord {
            user_id: self.user_id,
            role: Role::Trainee,
            first_name: self.first_name,
            last_name: self.last_name,
            position: Some(self.position),
            city: Some(self.city),
            venue: Some(self.venue),
            email: Some(self.email),
            phone_number: Some(self.phone_number),
            registration_date: today,
            warcoin: 0,
            vr_room: self.vr_room,
            vr_extreme: self.vr_extreme,
            attractions: self.attractions,
            training: Some(Training::new(course, plan)),
            trainees: Vec::new(),
        })
    }
}

/// Register a new hire. Refuses to overwrite an existing record.
pub fn register(
    store: &UserStore,
    registration: Registration,
    config: &Config,
    today: NaiveDate,
) -> Result<UserRecord> {
    if store.exists(registration.user_id) {
        return Err(TrailheadError::ProfileExists(registration.user_id));
    }
    let record = registration.complete(config, today)?;
    store.save(&record)?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
