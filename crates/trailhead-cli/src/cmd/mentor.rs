use crate::output::{print_json, print_table};
use std::path::Path;
use trailhead_core::mentor;
use trailhead_core::store::UserStore;

pub fn trainees(root: &Path, mentor_id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let roster = mentor::roster(&store, mentor_id)?;

    if json {
        print_json(&roster)?;
        return Ok(());
    }
    if roster.is_empty() {
        println!("No trainees yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = roster
        .iter()
        .map(|t| {
            vec![
                t.user_id.to_string(),
                t.name.clone(),
                t.registration_date.to_string(),
                format!("{}/{}", t.tasks_completed, t.task_count),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "REGISTERED", "TASKS"], &rows);
    Ok(())
}

pub fn progress(root: &Path, trainee: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let report = mentor::progress(&store, trainee)?;

    if json {
        print_json(&report)?;
        return Ok(());
    }

    println!(
        "Progress: {}/{} lessons",
        report.lessons_completed, report.lessons_total
    );
    for section in &report.sections {
        println!();
        println!("{}:", section.section);
        for lesson in &section.lessons {
            let mark = if lesson.completed { "x" } else { " " };
            let score = match (lesson.correct_answers, lesson.total_questions) {
                (Some(correct), Some(total)) => format!(" ({correct}/{total})"),
                _ => String::new(),
            };
            println!("  [{mark}] {}{score}", lesson.title);
        }
    }
    Ok(())
}
