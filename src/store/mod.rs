//! The seam to the external document store.
mod mongo;

pub use mongo::MongoStore;

use crate::errors::DbError;
use crate::query::{DeleteReport, FindSpec, UpdateReport};
use mongodb::bson::Document;

/// Operations the runner issues against one collection.
///
/// Every method is a pass-through: filters, updates, pipelines and index keys are handed to the
/// store unchanged. `close` consumes the store, so a connection is released at most once.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Name of the collection requests are issued against.
    fn collection_name(&self) -> &str;

    async fn find(&self, filter: Document, spec: &FindSpec) -> Result<Vec<Document>, DbError>;

    async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateReport, DbError>;

    async fn delete_one(&self, filter: Document) -> Result<DeleteReport, DbError>;

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError>;

    /// Returns the index name reported by the store.
    async fn create_index(&self, keys: Document) -> Result<String, DbError>;

    /// Query plan for a find with `filter` at the given verbosity.
    async fn explain_find(&self, filter: Document, verbosity: &str) -> Result<Document, DbError>;

    async fn insert_many(&self, docs: Vec<Document>) -> Result<usize, DbError>;

    async fn drop_collection(&self) -> Result<(), DbError>;

    /// Releases the connection.
    async fn close(self)
    where
        Self: Sized;
}
