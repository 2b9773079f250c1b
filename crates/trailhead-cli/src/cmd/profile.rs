use crate::output::print_json;
use std::path::Path;
use trailhead_core::store::UserStore;

pub fn run(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let record = store.load(id)?;
    let summary = record.summary();

    if json {
        print_json(&summary)?;
        return Ok(());
    }

    println!("Profile: {} (id {})", summary.name, summary.user_id);
    println!("Role:        {}", summary.role);
    if let Some(position) = summary.position {
        println!("Position:    {position}");
    }
    println!(
        "Location:    {}{}",
        summary.city.as_deref().unwrap_or("-"),
        summary
            .venue
            .map(|v| format!(" ({v})"))
            .unwrap_or_default()
    );
    println!("Registered:  {}", summary.registration_date);
    println!("Email:       {}", summary.email.as_deref().unwrap_or("-"));
    println!("Phone:       {}", summary.phone_number.as_deref().unwrap_or("-"));
    println!("Warcoin:     {}", summary.warcoin);
    if let Some(course) = summary.course {
        println!("Course:      {course}");
        println!(
            "Tasks:       {}/{} completed",
            summary.tasks_completed, summary.task_count
        );
        if let Some(mentor) = summary.mentor {
            println!("Mentor:      {mentor}");
        }
    }
    Ok(())
}
