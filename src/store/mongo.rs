use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Client, Collection, Database, IndexModel};

use super::DocumentStore;
use crate::config::QueryConfig;
use crate::errors::DbError;
use crate::query::{DeleteReport, FindSpec, UpdateReport};

/// A live connection to MongoDB bound to one database and collection.
pub struct MongoStore {
    client: Client,
    db: Database,
    books: Collection<Document>,
}

impl MongoStore {
    /// Builds the client and pings the server so an unreachable store fails here rather than on the
    /// first step.
    ///
    /// # Errors
    /// Returns `DbError::Connection` if the URI is rejected or the ping fails.
    pub async fn connect(cfg: &QueryConfig) -> Result<Self, DbError> {
        let uri = cfg.redacted_uri();
        log::info!("connecting to {uri}");
        let client = Client::with_uri_str(&cfg.uri)
            .await
            .map_err(|e| DbError::Connection { uri: uri.clone(), reason: e.to_string() })?;
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(DbError::Connection { uri, reason: e.to_string() });
        }
        log::info!("connected to {uri}");
        let db = client.database(&cfg.database);
        let books = db.collection::<Document>(&cfg.collection);
        Ok(Self { client, db, books })
    }
}

impl DocumentStore for MongoStore {
    fn collection_name(&self) -> &str {
        self.books.name()
    }

    async fn find(&self, filter: Document, spec: &FindSpec) -> Result<Vec<Document>, DbError> {
        let mut find = self.books.find(filter);
        if let Some(p) = &spec.projection { find = find.projection(p.clone()); }
        if let Some(s) = &spec.sort { find = find.sort(s.clone()); }
        if let Some(n) = spec.skip { find = find.skip(n); }
        if let Some(n) = spec.limit { find = find.limit(n); }
        let docs: Vec<Document> = find.await?.try_collect().await?;
        Ok(docs)
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateReport, DbError> {
        let r = self.books.update_one(filter, update).await?;
        Ok(UpdateReport { matched: r.matched_count, modified: r.modified_count })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteReport, DbError> {
        let r = self.books.delete_one(filter).await?;
        Ok(DeleteReport { deleted: r.deleted_count })
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError> {
        let rows: Vec<Document> = self.books.aggregate(pipeline).await?.try_collect().await?;
        Ok(rows)
    }

    async fn create_index(&self, keys: Document) -> Result<String, DbError> {
        let index = IndexModel::builder().keys(keys).build();
        let r = self.books.create_index(index).await?;
        Ok(r.index_name)
    }

    async fn explain_find(&self, filter: Document, verbosity: &str) -> Result<Document, DbError> {
        // The driver has no explain helper; issue the command directly.
        let cmd = doc! {
            "explain": { "find": self.books.name(), "filter": filter },
            "verbosity": verbosity,
        };
        Ok(self.db.run_command(cmd).await?)
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<usize, DbError> {
        let r = self.books.insert_many(docs).await?;
        Ok(r.inserted_ids.len())
    }

    async fn drop_collection(&self) -> Result<(), DbError> {
        Ok(self.books.drop().await?)
    }

    async fn close(self) {
        log::info!("closing connection");
        self.client.shutdown().await;
    }
}
