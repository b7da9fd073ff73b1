use crate::errors::DbError;
use crate::store::DocumentStore;

use super::types::{Outcome, Request};

/// Issues one request and wraps the store's answer. No semantics are added here.
///
/// # Errors
/// Propagates whatever the store returns.
pub async fn execute<S: DocumentStore>(store: &S, request: &Request) -> Result<Outcome, DbError> {
    Ok(match request {
        Request::Find { filter, spec } => Outcome::Documents(store.find(filter.clone(), spec).await?),
        Request::UpdateOne { filter, update } => {
            Outcome::Updated(store.update_one(filter.clone(), update.clone()).await?)
        }
        Request::DeleteOne { filter } => Outcome::Deleted(store.delete_one(filter.clone()).await?),
        Request::Aggregate { pipeline } => Outcome::Rows(store.aggregate(pipeline.clone()).await?),
        Request::CreateIndex { keys } => {
            Outcome::IndexCreated { name: store.create_index(keys.clone()).await? }
        }
        Request::Explain { filter, verbosity } => {
            Outcome::Plan(store.explain_find(filter.clone(), verbosity).await?)
        }
    })
}
