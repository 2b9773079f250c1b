use crate::output::print_json;
use anyhow::Context;
use clap::Args;
use std::path::Path;
use trailhead_core::config::Config;
use trailhead_core::mentor::assign_mentor;
use trailhead_core::profile::AttractionPick;
use trailhead_core::registration::{register, Registration};
use trailhead_core::store::UserStore;
use trailhead_core::types::{Position, Venue};

#[derive(Args)]
pub struct RegisterArgs {
    /// Numeric user id (chat identifier)
    #[arg(long)]
    pub id: u64,

    #[arg(long)]
    pub position: Position,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub venue: Venue,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// The site has a VR room
    #[arg(long)]
    pub vr_room: bool,

    /// The site has the VR-Extreme zone (unlocks attraction picks)
    #[arg(long)]
    pub vr_extreme: bool,

    /// Attraction running at the site; repeat per attraction
    #[arg(long = "attraction")]
    pub attractions: Vec<String>,

    /// Assign this mentor after registration
    #[arg(long)]
    pub mentor: Option<u64>,
}

pub fn run(root: &Path, args: RegisterArgs, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let config = Config::load(root).context("load config")?;

    let picks = config
        .attractions
        .iter()
        .map(|name| AttractionPick {
            name: name.clone(),
            selected: args.attractions.iter().any(|a| a == name),
        })
        .collect();

    let registration = Registration {
        user_id: args.id,
        position: args.position,
        first_name: args.first_name,
        last_name: args.last_name,
        city: args.city,
        venue: args.venue,
        email: args.email,
        phone_number: args.phone,
        vr_room: args.vr_room,
        vr_extreme: args.vr_extreme,
        attractions: picks,
    };
    let record = register(&store, registration, &config, super::today())
        .context("registration failed")?;

    if let Some(mentor_id) = args.mentor {
        assign_mentor(&store, record.user_id, mentor_id).context("assign mentor")?;
    }

    if json {
        print_json(&record.summary())?;
    } else {
        let course = record.training().map(|t| t.course.number()).unwrap_or(0);
        println!(
            "Registered {} (id {}) on course {}",
            record.full_name(),
            record.user_id,
            course
        );
    }
    Ok(())
}
