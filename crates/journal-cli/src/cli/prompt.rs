//! Interactive prompts for building an entry on the terminal.

use anyhow::Result;
use chrono::NaiveDate;
use journal::services::{parse_journal_date, word_count, MIN_DESCRIPTION_WORDS};
use std::io::{BufRead, Write};

/// Technologies offered by number when prompting
pub const TECHNOLOGY_OPTIONS: [&str; 8] = [
    "HTML",
    "CSS",
    "JavaScript",
    "PWA",
    "Manifest",
    "Responsive Design",
    "Python",
    "JSON",
];

/// Split a comma separated selection into technologies.
///
/// Numbers pick from [`TECHNOLOGY_OPTIONS`] (1-based); anything else is taken
/// as a technology name. Returns the chosen technologies and the numbers that
/// were out of range.
pub fn parse_technologies(input: &str) -> (Vec<String>, Vec<String>) {
    let mut chosen = Vec::new();
    let mut rejected = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part.chars().all(|c| c.is_ascii_digit()) {
            match part
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| TECHNOLOGY_OPTIONS.get(i))
            {
                Some(tech) => chosen.push(tech.to_string()),
                None => rejected.push(part.to_string()),
            }
        } else {
            chosen.push(part.to_string());
        }
    }

    (chosen, rejected)
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow::anyhow!("Input ended before the entry was complete"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask until a non-blank answer is given
    pub fn required(&mut self, prompt: &str) -> Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("This field cannot be empty. Please try again.")?;
        }
    }

    pub fn week(&mut self) -> Result<u32> {
        loop {
            let answer = self.required("Week of Journal (e.g., 15): ")?;
            match answer.parse::<u32>() {
                Ok(0) => self.say("Week must be positive.")?,
                Ok(week) => return Ok(week),
                Err(_) => self.say("Invalid input. Please enter a valid number.")?,
            }
        }
    }

    /// Ask for a `YYYY-MM-DD` date; blank or invalid answers give `today`
    pub fn date(&mut self, today: NaiveDate) -> Result<String> {
        let answer = self.ask("Journal Date (YYYY-MM-DD) [default: today]: ")?;
        if answer.is_empty() {
            return Ok(today.format("%Y-%m-%d").to_string());
        }

        match parse_journal_date(&answer) {
            Ok(date) => Ok(date.format("%Y-%m-%d").to_string()),
            Err(_) => {
                self.say("Invalid date format. Using today's date.")?;
                Ok(today.format("%Y-%m-%d").to_string())
            },
        }
    }

    pub fn description(&mut self) -> Result<String> {
        loop {
            let answer = self.required("Task Description (min 10 words): ")?;
            let count = word_count(&answer);
            if count >= MIN_DESCRIPTION_WORDS {
                return Ok(answer);
            }
            self.say(&format!(
                "Description has only {} words. Please write at least {} words.",
                count, MIN_DESCRIPTION_WORDS
            ))?;
        }
    }

    pub fn technologies(&mut self) -> Result<Vec<String>> {
        self.say("")?;
        self.say("Available technologies:")?;
        for (i, tech) in TECHNOLOGY_OPTIONS.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, tech))?;
        }
        self.say("")?;
        self.say("Enter technology numbers separated by commas (e.g., 1,3,5)")?;
        self.say("Or type custom technology names separated by commas:")?;

        loop {
            let answer = self.ask("Technologies: ")?;
            let (chosen, rejected) = parse_technologies(&answer);
            for number in rejected {
                self.say(&format!("Invalid number: {}", number))?;
            }
            if !chosen.is_empty() {
                return Ok(chosen);
            }
            self.say("Please select at least one technology.")?;
        }
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}
