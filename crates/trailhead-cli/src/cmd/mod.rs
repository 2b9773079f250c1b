pub mod check;
pub mod employees;
pub mod exam;
pub mod feedback;
pub mod gates;
pub mod init;
pub mod learn;
pub mod mentor;
pub mod profile;
pub mod promote;
pub mod register;
pub mod tasks;

use chrono::NaiveDate;

/// The calendar date the gate evaluator sees.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Read one answer (1-4) from stdin, reprompting on garbage.
pub fn read_answer() -> anyhow::Result<u8> {
    use std::io::{BufRead, Write};
    let stdin = std::io::stdin();
    loop {
        print!("answer [1-4]: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed mid-quiz");
        }
        match line.trim().parse::<u8>() {
            Ok(n @ 1..=4) => return Ok(n),
            _ => println!("please enter a number from 1 to 4"),
        }
    }
}
