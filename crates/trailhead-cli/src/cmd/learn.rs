use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use trailhead_core::content::TrainingContent;
use trailhead_core::quiz::{QuizSession, QuizStep};
use trailhead_core::session::SessionStore;
use trailhead_core::store::UserStore;
use trailhead_core::training::{self, TrainingStep};

#[derive(Subcommand)]
pub enum LearnSubcommand {
    /// Show the next open lesson or quiz
    Next { id: u64 },
    /// Complete the current material lesson and show what follows
    Advance { id: u64 },
    /// Run the quiz the plan is currently on, interactively
    Quiz { id: u64 },
}

pub fn run(root: &Path, subcmd: LearnSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        LearnSubcommand::Next { id } => next(root, id, json),
        LearnSubcommand::Advance { id } => advance(root, id, json),
        LearnSubcommand::Quiz { id } => quiz(root, id, json),
    }
}

fn next(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let content = TrainingContent::load(root)?;
    let record = store.load(id)?;
    let step = training::next_step(&record, &content)?;
    print_step(&step, json)
}

fn advance(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let content = TrainingContent::load(root)?;
    let record = store.load(id)?;

    match training::next_step(&record, &content)? {
        TrainingStep::Lesson { section, title, .. } => {
            let step = training::advance(&store, &content, id, section, &title)?;
            if !json {
                println!("Completed '{title}'.");
            }
            print_step(&step, json)
        }
        TrainingStep::Quiz { lesson, .. } => {
            anyhow::bail!("next up is the quiz '{lesson}' — run 'trailhead learn quiz {id}'")
        }
        TrainingStep::Complete => {
            print_step(&TrainingStep::Complete, json)
        }
    }
}

fn quiz(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let content = TrainingContent::load(root)?;
    let record = store.load(id)?;

    let (section, lesson) = match training::next_step(&record, &content)? {
        TrainingStep::Quiz { section, lesson, .. } => (section, lesson),
        TrainingStep::Lesson { title, .. } => {
            anyhow::bail!("next up is the lesson '{title}' — run 'trailhead learn advance {id}'")
        }
        TrainingStep::Complete => {
            println!("Training already complete.");
            return Ok(());
        }
    };

    // The session lives exactly as long as this invocation; quitting
    // mid-quiz abandons it, keeping any tasks already written.
    let mut sessions = SessionStore::new();
    let session = sessions.begin_quiz(
        QuizSession::start(&record, &content, section, &lesson).context("start quiz")?,
    );

    println!("Quiz '{lesson}' ({section})");
    let report = loop {
        let Some(question) = session.question().cloned() else {
            // Quiz defined with no questions: close it out directly.
            match session.answer(&store, 1)? {
                QuizStep::Finished(report) => break Some(report),
                _ => break None,
            }
        };
        println!();
        println!("Question {}: {}", session.question_number(), question.text);
        let answer = super::read_answer()?;
        match session.answer(&store, answer)? {
            QuizStep::Question(_) => {}
            QuizStep::Finished(report) => break Some(report),
            QuizStep::AlreadyCompleted => break None,
        }
    };
    sessions.take_quiz(id);

    let Some(report) = report else {
        println!("This quiz was already completed; nothing recorded.");
        return Ok(());
    };

    if json {
        print_json(&report)?;
        return Ok(());
    }
    println!();
    println!(
        "Quiz '{}' finished: {}/{} correct, warcoin balance {}",
        report.lesson, report.correct_answers, report.total_questions, report.warcoin_balance
    );
    if !report.new_tasks.is_empty() {
        println!("New tasks to review with your mentor:");
        for task in &report.new_tasks {
            println!("- {}", task.quest);
        }
    }
    if report.section_complete {
        println!("Section '{}' is now complete.", report.section);
    }
    Ok(())
}

fn print_step(step: &TrainingStep, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(step);
    }
    match step {
        TrainingStep::Lesson {
            section,
            title,
            material,
        } => {
            println!("[{section}] {title}");
            println!();
            println!("{}", material.text);
            if let Some(image) = &material.image {
                println!("(image: {image})");
            }
        }
        TrainingStep::Quiz {
            section,
            lesson,
            questions,
        } => {
            println!("[{section}] quiz '{lesson}' — {questions} questions");
        }
        TrainingStep::Complete => println!("Training complete. Congratulations!"),
    }
    Ok(())
}
