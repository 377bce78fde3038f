//! Validation of raw journal payloads.
//!
//! Payloads arrive as untyped JSON and leave as [`NewEntry`] or [`EntryPatch`].
//! The first failure is reported, always in the same order: required fields,
//! then types, then the description word count.

use super::types::{EntryPatch, NewEntry};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Minimum number of words in a task description
pub const MIN_DESCRIPTION_WORDS: usize = 10;

/// Fields a new entry must carry, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 6] = [
    "weekOfJournal",
    "journalName",
    "journalDate",
    "taskName",
    "taskDescription",
    "technologies",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Description must have at least 10 words (has {0})")]
    TooShort(usize),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

const POSITIVE_INTEGER: &str = "a positive integer";
const NON_EMPTY_ARRAY: &str = "a non-empty array";
const STRING_ARRAY: &str = "an array of strings";
const STRING: &str = "a string";
const NON_EMPTY_STRING: &str = "a non-empty string";

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Parse a strict `YYYY-MM-DD` journal date
pub fn parse_journal_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn check_week(week: u32) -> Result<u32, ValidationError> {
    if week < 1 {
        return Err(ValidationError::InvalidType {
            field: "weekOfJournal",
            expected: POSITIVE_INTEGER,
        });
    }
    Ok(week)
}

fn check_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::InvalidType {
            field,
            expected: NON_EMPTY_STRING,
        });
    }
    Ok(())
}

fn check_technologies(technologies: &[String]) -> Result<(), ValidationError> {
    if technologies.is_empty() {
        return Err(ValidationError::InvalidType {
            field: "technologies",
            expected: NON_EMPTY_ARRAY,
        });
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), ValidationError> {
    let count = word_count(description);
    if count < MIN_DESCRIPTION_WORDS {
        return Err(ValidationError::TooShort(count));
    }
    Ok(())
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

fn week_from(value: &Value) -> Result<u32, ValidationError> {
    let week = value
        .as_u64()
        .and_then(|w| u32::try_from(w).ok())
        .ok_or(ValidationError::InvalidType {
            field: "weekOfJournal",
            expected: POSITIVE_INTEGER,
        })?;
    check_week(week)
}

fn string_from(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ValidationError::InvalidType {
            field,
            expected: STRING,
        })
}

fn technologies_from(value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = value.as_array().ok_or(ValidationError::InvalidType {
        field: "technologies",
        expected: NON_EMPTY_ARRAY,
    })?;
    let technologies = items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(ValidationError::InvalidType {
                    field: "technologies",
                    expected: STRING_ARRAY,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_technologies(&technologies)?;
    Ok(technologies)
}

impl NewEntry {
    /// Build a new entry from a raw JSON payload
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(payload)?;

        for field in REQUIRED_FIELDS {
            if !fields.contains_key(field) {
                return Err(ValidationError::MissingField(field));
            }
        }

        let entry = Self {
            week_of_journal: week_from(&fields["weekOfJournal"])?,
            technologies: technologies_from(&fields["technologies"])?,
            journal_name: string_from("journalName", &fields["journalName"])?,
            journal_date: string_from("journalDate", &fields["journalDate"])?,
            task_name: string_from("taskName", &fields["taskName"])?,
            task_description: string_from("taskDescription", &fields["taskDescription"])?,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check value constraints on an already typed entry
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_week(self.week_of_journal)?;
        check_technologies(&self.technologies)?;
        check_not_blank("journalName", &self.journal_name)?;
        check_not_blank("taskName", &self.task_name)?;
        check_description(&self.task_description)
    }
}

impl EntryPatch {
    /// Build a partial update from a raw JSON payload.
    ///
    /// Only the fields present are checked. Unknown fields, `id` and the
    /// timestamps are ignored.
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let fields = as_object(payload)?;

        let patch = Self {
            week_of_journal: fields.get("weekOfJournal").map(week_from).transpose()?,
            technologies: fields
                .get("technologies")
                .map(technologies_from)
                .transpose()?,
            journal_name: fields
                .get("journalName")
                .map(|v| string_from("journalName", v))
                .transpose()?,
            journal_date: fields
                .get("journalDate")
                .map(|v| string_from("journalDate", v))
                .transpose()?,
            task_name: fields
                .get("taskName")
                .map(|v| string_from("taskName", v))
                .transpose()?,
            task_description: fields
                .get("taskDescription")
                .map(|v| string_from("taskDescription", v))
                .transpose()?,
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Check value constraints on the supplied fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(week) = self.week_of_journal {
            check_week(week)?;
        }
        if let Some(technologies) = &self.technologies {
            check_technologies(technologies)?;
        }
        if let Some(name) = &self.journal_name {
            check_not_blank("journalName", name)?;
        }
        if let Some(task) = &self.task_name {
            check_not_blank("taskName", task)?;
        }
        if let Some(description) = &self.task_description {
            check_description(description)?;
        }
        Ok(())
    }
}
