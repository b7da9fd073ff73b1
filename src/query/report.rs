use crate::errors::DbError;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::Write;
use std::str::FromStr;

use super::types::Outcome;

/// Target for per-step result lines; the logger can route it to its own file.
pub const RESULTS_TARGET: &str = "bookstore::results";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Label line followed by pretty JSON.
    #[default]
    Human,
    /// One `label: compact-json` line per step.
    Plain,
    /// One NDJSON object per step.
    Json,
}

impl FromStr for OutputMode {
    type Err = DbError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "plain" => Ok(Self::Plain),
            "json" | "ndjson" => Ok(Self::Json),
            other => Err(DbError::Config(format!("unknown output mode: {other}"))),
        }
    }
}

fn doc_json(d: &Document) -> Value {
    Bson::Document(d.clone()).into_relaxed_extjson()
}

fn docs_json(docs: &[Document]) -> Value {
    Value::Array(docs.iter().map(doc_json).collect())
}

/// JSON form of an outcome. Counts are bare numbers; index creation yields the index name.
#[must_use]
pub fn outcome_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Documents(docs) | Outcome::Rows(docs) => docs_json(docs),
        Outcome::Updated(r) => json!({ "matched": r.matched, "modified": r.modified }),
        Outcome::Deleted(r) => json!({ "deleted": r.deleted }),
        Outcome::IndexCreated { name } => json!({ "index": name }),
        Outcome::Plan(plan) => doc_json(plan),
    }
}

/// Renders one step as text in the given mode, without a trailing newline.
///
/// # Errors
/// Fails only if JSON serialization fails.
pub fn render(mode: OutputMode, label: &str, outcome: &Outcome) -> Result<String, DbError> {
    Ok(match mode {
        OutputMode::Json => serde_json::to_string(&json!({ "step": label, "result": outcome_json(outcome) }))?,
        OutputMode::Plain => match outcome {
            Outcome::Updated(r) => format!("{label}: {}", r.modified),
            Outcome::Deleted(r) => format!("{label}: {}", r.deleted),
            Outcome::IndexCreated { name } => format!("{label}: {name}"),
            other => format!("{label}: {}", serde_json::to_string(&outcome_json(other))?),
        },
        OutputMode::Human => match outcome {
            Outcome::Updated(r) => format!("{label}: {}", r.modified),
            Outcome::Deleted(r) => format!("{label}: {}", r.deleted),
            Outcome::IndexCreated { name } => format!("{label}: {name}"),
            other => format!("{label}:\n{}", serde_json::to_string_pretty(&outcome_json(other))?),
        },
    })
}

/// Writes step results to `out` and mirrors a compact line to the results log target.
pub struct Reporter<W: Write> {
    out: W,
    mode: OutputMode,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn report(&mut self, label: &str, outcome: &Outcome) -> Result<(), DbError> {
        let text = render(self.mode, label, outcome)?;
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        log::info!(target: RESULTS_TARGET, "{}", render(OutputMode::Plain, label, outcome)?);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
