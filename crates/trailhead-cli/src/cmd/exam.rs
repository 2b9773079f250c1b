use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use trailhead_core::config::Config;
use trailhead_core::exam::ExamSession;
use trailhead_core::mentor;
use trailhead_core::notify::LogNotifier;
use trailhead_core::session::SessionStore;
use trailhead_core::store::UserStore;

#[derive(Subcommand)]
pub enum ExamSubcommand {
    /// Unlock the final exam for a trainee (requires all gates)
    Open {
        /// Acting mentor id
        #[arg(long)]
        mentor: u64,
        trainee: u64,
    },
    /// Run the final exam interactively
    Run { id: u64 },
}

pub fn run(root: &Path, subcmd: ExamSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ExamSubcommand::Open { mentor, trainee } => open(root, mentor, trainee),
        ExamSubcommand::Run { id } => exam(root, id, json),
    }
}

fn open(root: &Path, mentor_id: u64, trainee: u64) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let config = Config::load(root).context("load config")?;
    mentor::open_final_exam(
        &store,
        &LogNotifier,
        mentor_id,
        trainee,
        super::today(),
        config.tenure_days,
    )?;
    println!("Final exam opened for trainee {trainee}.");
    Ok(())
}

fn exam(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let record = store.load(id)?;

    let mut sessions = SessionStore::new();
    let session = sessions.begin_exam(ExamSession::start(&record)?);

    println!("Final certification exam — one pass, no retakes.");
    let mut next = session.question();
    while let Some(question) = next {
        println!();
        println!(
            "Question {}/{}: {}",
            question.number, question.total, question.text
        );
        let answer = super::read_answer()?;
        next = session.answer(answer);
    }

    let session = sessions
        .take_exam(id)
        .context("exam session vanished mid-run")?;
    let report = session.finish(&store, &LogNotifier)?;

    if json {
        print_json(&report)?;
        return Ok(());
    }
    println!();
    println!("Exam finished: {}/{}", report.score(), report.total);
    if !report.missed.is_empty() {
        println!("Worth revisiting:");
        for task in &report.missed {
            println!("- {}", task.quest);
        }
    }
    Ok(())
}
