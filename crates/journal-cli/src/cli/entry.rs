use super::open_service;
use super::prompt::Prompter;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use journal::services::{parse_journal_date, Entry, EntryPatch, NewEntry, ServiceError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Args, Default)]
pub struct AddArgs {
    /// Week of the journal (1 or more)
    #[arg(long)]
    week: Option<u32>,

    /// Journal name
    #[arg(long)]
    name: Option<String>,

    /// Journal date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Task name
    #[arg(long)]
    task: Option<String>,

    /// Task description (at least 10 words)
    #[arg(long)]
    description: Option<String>,

    /// Technologies used, repeated or comma separated
    #[arg(long = "tech", value_delimiter = ',')]
    technologies: Vec<String>,

    /// Save without asking for confirmation
    #[arg(short, long)]
    yes: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Entry ID
    id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Entry ID
    id: String,

    /// New week of the journal
    #[arg(long)]
    week: Option<u32>,

    /// New journal name
    #[arg(long)]
    name: Option<String>,

    /// New journal date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// New task name
    #[arg(long)]
    task: Option<String>,

    /// New task description (at least 10 words)
    #[arg(long)]
    description: Option<String>,

    /// Replacement technologies, repeated or comma separated
    #[arg(long = "tech", value_delimiter = ',')]
    technologies: Vec<String>,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Entry ID
    id: String,
}

fn normalize_date(raw: &str) -> Result<String> {
    let date = parse_journal_date(raw)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn not_found(e: ServiceError) -> anyhow::Error {
    match e {
        ServiceError::NotFound(id) => anyhow::anyhow!("Entry not found: {}", id),
        other => other.into(),
    }
}

/// Fill in every field not given on the command line by prompting
fn collect_new_entry<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    args: AddArgs,
    today: NaiveDate,
) -> Result<NewEntry> {
    let week_of_journal = match args.week {
        Some(week) => week,
        None => prompter.week()?,
    };
    let journal_name = match args.name {
        Some(name) => name,
        None => prompter.required("Journal Name (e.g., Learning Web APIs): ")?,
    };
    let journal_date = match args.date {
        Some(date) => normalize_date(&date)?,
        None => prompter.date(today)?,
    };
    let task_name = match args.task {
        Some(task) => task,
        None => prompter.required("Task Name (e.g., Built a fetch wrapper): ")?,
    };
    let task_description = match args.description {
        Some(description) => description,
        None => prompter.description()?,
    };
    let technologies = if args.technologies.is_empty() {
        prompter.technologies()?
    } else {
        args.technologies
    };

    let entry = NewEntry {
        week_of_journal,
        journal_name,
        journal_date,
        task_name,
        task_description,
        technologies,
    };
    entry.validate()?;
    Ok(entry)
}

fn preview<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, entry: &NewEntry) -> Result<()> {
    let rule = "=".repeat(60);
    prompter.say("")?;
    prompter.say(&rule)?;
    prompter.say("  ENTRY PREVIEW")?;
    prompter.say(&rule)?;
    prompter.say(&format!("Week: {}", entry.week_of_journal))?;
    prompter.say(&format!("Name: {}", entry.journal_name))?;
    prompter.say(&format!("Date: {}", entry.journal_date))?;
    prompter.say(&format!("Task: {}", entry.task_name))?;
    prompter.say(&format!("Description: {}", entry.task_description))?;
    prompter.say(&format!("Technologies: {}", entry.technologies.join(", ")))?;
    prompter.say(&rule)
}

pub async fn execute_add(args: AddArgs, store: Option<PathBuf>) -> Result<()> {
    let service = open_service(store)?;
    let confirm = !args.yes;

    let fields = {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

        let today = Local::now().date_naive();
        let fields = collect_new_entry(&mut prompter, args, today)?;

        if confirm {
            preview(&mut prompter, &fields)?;
            if !prompter.confirm("\nSave this entry? (y/n): ")? {
                println!("Entry discarded.");
                return Ok(());
            }
        }
        fields
    };

    let created = service.create(fields).await?;
    println!();
    println!("Entry saved successfully!");
    println!("  ID: {}", created.entry.id);
    println!("  Total entries: {}", created.total);
    println!("  File: {}", service.location());

    Ok(())
}

fn summary(entry: &Entry) -> String {
    format!(
        "  {}  week {:<3} {}  {} [{}]",
        entry.id,
        entry.week_of_journal,
        entry.journal_date,
        entry.task_name,
        entry.technologies.join(", ")
    )
}

pub async fn execute_list(args: ListArgs, store: Option<PathBuf>) -> Result<()> {
    let service = open_service(store)?;
    let entries = service.list().await?;

    if args.json {
        let output = serde_json::json!({
            "entries": entries,
            "count": entries.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Found {} entries:", entries.len());
        for entry in &entries {
            println!("{}", summary(entry));
        }
    }

    Ok(())
}

pub async fn execute_show(args: ShowArgs, store: Option<PathBuf>) -> Result<()> {
    let service = open_service(store)?;
    match service.get(&args.id).await? {
        Some(entry) => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
            Ok(())
        },
        None => Err(anyhow::anyhow!("Entry not found: {}", args.id)),
    }
}

pub async fn execute_update(args: UpdateArgs, store: Option<PathBuf>) -> Result<()> {
    let patch = EntryPatch {
        week_of_journal: args.week,
        journal_name: args.name,
        journal_date: args.date.as_deref().map(normalize_date).transpose()?,
        task_name: args.task,
        task_description: args.description,
        technologies: if args.technologies.is_empty() {
            None
        } else {
            Some(args.technologies)
        },
    };

    if patch.is_empty() {
        return Err(anyhow::anyhow!(
            "Nothing to update. Pass at least one of --week, --name, --date, --task, --description, --tech."
        ));
    }

    let service = open_service(store)?;
    let entry = service.update(&args.id, patch).await.map_err(not_found)?;

    println!("Updated entry: {}", entry.id);
    println!("{}", serde_json::to_string_pretty(&entry)?);

    Ok(())
}

pub async fn execute_remove(args: RemoveArgs, store: Option<PathBuf>) -> Result<()> {
    let service = open_service(store)?;
    let remaining = service.delete(&args.id).await.map_err(not_found)?;

    println!("Removed entry: {}", args.id);
    println!("  Total entries: {}", remaining);

    Ok(())
}
