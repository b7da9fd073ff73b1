use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

/// Read options for a find request. `None` leaves the store's default in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindSpec {
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// A request payload handed to the store as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Find { filter: Document, spec: FindSpec },
    UpdateOne { filter: Document, update: Document },
    DeleteOne { filter: Document },
    Aggregate { pipeline: Vec<Document> },
    CreateIndex { keys: Document },
    Explain { filter: Document, verbosity: String },
}

impl Request {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Find { .. } => "find",
            Self::UpdateOne { .. } => "update_one",
            Self::DeleteOne { .. } => "delete_one",
            Self::Aggregate { .. } => "aggregate",
            Self::CreateIndex { .. } => "create_index",
            Self::Explain { .. } => "explain",
        }
    }
}

/// One labelled demonstration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: &'static str,
    pub request: Request,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReport {
    pub deleted: u64,
}

/// What a step produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Documents(Vec<Document>),
    Updated(UpdateReport),
    Deleted(DeleteReport),
    Rows(Vec<Document>),
    IndexCreated { name: String },
    Plan(Document),
}
