use crate::output::{print_json, print_table};
use clap::Subcommand;
use std::path::Path;
use trailhead_core::mentor;
use trailhead_core::mistake;
use trailhead_core::store::UserStore;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// List a trainee's remedial tasks
    List { id: u64 },
    /// Mentor sign-off on one task (1-based position)
    Complete {
        /// Acting mentor id
        #[arg(long)]
        mentor: u64,
        trainee: u64,
        number: usize,
    },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::List { id } => list(root, id, json),
        TaskSubcommand::Complete {
            mentor,
            trainee,
            number,
        } => complete(root, mentor, trainee, number, json),
    }
}

fn list(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let record = store.load(id)?;
    let mistakes = &record.training()?.mistakes;

    if json {
        print_json(mistakes)?;
        return Ok(());
    }
    if mistakes.is_empty() {
        println!("No tasks — no quiz mistakes on record.");
        return Ok(());
    }

    println!("{}", mistake::summarize(mistakes));
    println!();
    let rows: Vec<Vec<String>> = mistakes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            vec![
                (i + 1).to_string(),
                m.quest_status.to_string(),
                m.section.to_string(),
                m.quest.clone(),
            ]
        })
        .collect();
    print_table(&["#", "STATUS", "SECTION", "TASK"], &rows);
    Ok(())
}

fn complete(
    root: &Path,
    mentor_id: u64,
    trainee: u64,
    number: usize,
    json: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(number > 0, "task numbers start at 1");
    let store = UserStore::new(root);
    let task = mentor::complete_task(&store, mentor_id, trainee, number - 1)?;

    if json {
        print_json(&task)?;
    } else {
        println!("Completed task {number}: {}", task.quest);
    }
    Ok(())
}
