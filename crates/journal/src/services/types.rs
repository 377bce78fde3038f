use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Default location of the journal file, relative to the project root
pub const DEFAULT_STORAGE_PATH: &str = "backend/reflections.json";

/// Default server bind address
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// One journal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub week_of_journal: u32,
    pub journal_name: String,
    pub journal_date: String,
    pub task_name: String,
    pub task_description: String,
    pub technologies: Vec<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::optional"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// Generate a new 21-character ID
    pub fn generate_id() -> String {
        nanoid::nanoid!()
    }

    /// Create a new entry from a validated payload
    pub fn new(id: String, fields: NewEntry) -> Self {
        Self {
            id,
            week_of_journal: fields.week_of_journal,
            journal_name: fields.journal_name,
            journal_date: fields.journal_date,
            task_name: fields.task_name,
            task_description: fields.task_description,
            technologies: fields.technologies,
            timestamp: now(),
            updated_at: None,
        }
    }

    /// Merge the supplied fields and stamp the update time.
    ///
    /// `id` and `timestamp` never change.
    pub fn apply(&mut self, patch: EntryPatch) {
        if let Some(week) = patch.week_of_journal {
            self.week_of_journal = week;
        }
        if let Some(name) = patch.journal_name {
            self.journal_name = name;
        }
        if let Some(date) = patch.journal_date {
            self.journal_date = date;
        }
        if let Some(task) = patch.task_name {
            self.task_name = task;
        }
        if let Some(description) = patch.task_description {
            self.task_description = description;
        }
        if let Some(technologies) = patch.technologies {
            self.technologies = technologies;
        }
        self.updated_at = Some(now());
    }
}

/// Fields supplied when creating an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub week_of_journal: u32,
    pub journal_name: String,
    pub journal_date: String,
    pub task_name: String,
    pub task_description: String,
    pub technologies: Vec<String>,
}

/// Partial payload for an update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub week_of_journal: Option<u32>,
    pub journal_name: Option<String>,
    pub journal_date: Option<String>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub technologies: Option<Vec<String>>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.week_of_journal.is_none()
            && self.journal_name.is_none()
            && self.journal_date.is_none()
            && self.task_name.is_none()
            && self.task_description.is_none()
            && self.technologies.is_none()
    }
}

/// Current time at the precision timestamps are stored with
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 as well as offset-less ISO datetimes, which are read in
/// the local time zone.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = raw
        .parse::<NaiveDateTime>()
        .map_err(|e| format!("Invalid timestamp '{}': {}", raw, e))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("Timestamp '{}' does not exist in the local time zone", raw))
}

mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub mod optional {
        use super::*;

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Configuration for the journal file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the journal file, relative to the project root unless absolute.
    /// Default: "backend/reflections.json"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    /// Directory holding the PWA front-end, served when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            static_dir: None,
        }
    }
}

/// Project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewEntry {
        NewEntry {
            week_of_journal: 3,
            journal_name: "Learning Rust".to_string(),
            journal_date: "2024-01-01".to_string(),
            task_name: "Borrow checker".to_string(),
            task_description: "one two three four five six seven eight nine ten".to_string(),
            technologies: vec!["Rust".to_string()],
        }
    }

    #[test]
    fn entry_serializes_camel_case_fields() {
        let entry = Entry::new("abc".to_string(), sample());
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["weekOfJournal"], 3);
        assert_eq!(json["journalName"], "Learning Rust");
        assert_eq!(json["taskDescription"], "one two three four five six seven eight nine ten");
        assert!(json["timestamp"].is_string());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn entry_reads_back_what_it_writes() {
        let mut entry = Entry::new("abc".to_string(), sample());
        entry.apply(EntryPatch {
            task_name: Some("Lifetimes".to_string()),
            ..Default::default()
        });

        let raw = serde_json::to_string(&entry).unwrap();
        let parsed: Entry = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn apply_keeps_identity_and_creation_time() {
        let mut entry = Entry::new("abc".to_string(), sample());
        let created = entry.timestamp;

        entry.apply(EntryPatch {
            week_of_journal: Some(7),
            ..Default::default()
        });

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.timestamp, created);
        assert_eq!(entry.week_of_journal, 7);
        assert_eq!(entry.journal_name, "Learning Rust");
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339() {
        let dt = parse_timestamp("2024-01-01T10:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_accepts_offsetless_iso() {
        assert!(parse_timestamp("2024-01-01T10:00:00.123456").is_ok());
        assert!(parse_timestamp("2024-01-01T10:00:00").is_ok());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn legacy_entry_without_offset_deserializes() {
        let raw = r#"{
            "id": "6f1c",
            "weekOfJournal": 5,
            "journalName": "X",
            "journalDate": "2024-01-01",
            "taskName": "Y",
            "taskDescription": "one two three four five six seven eight nine ten",
            "technologies": ["HTML"],
            "timestamp": "2024-01-01T09:30:00.000001",
            "updatedAt": "2024-01-02T09:30:00.000001"
        }"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, "6f1c");
        assert!(entry.updated_at.is_some());
    }

    #[test]
    fn patch_is_empty_by_default() {
        assert!(EntryPatch::default().is_empty());
        let patch = EntryPatch {
            journal_date: Some("2024-02-02".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn server_config_defaults() {
        let config = JournalConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert!(config.server.static_dir.is_none());
        assert!(config.storage.path.is_none());
    }
}
