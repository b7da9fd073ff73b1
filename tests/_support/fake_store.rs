use bookstore_queries::bson::{Bson, Document, doc};
use bookstore_queries::query::{DeleteReport, FindSpec, UpdateReport};
use bookstore_queries::{DbError, DocumentStore};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared view of what a `RecordingStore` saw, readable after the store is closed.
#[derive(Clone, Default)]
pub struct Probe {
    pub calls: Rc<RefCell<Vec<String>>>,
    pub closes: Rc<Cell<usize>>,
}

impl Probe {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn closes(&self) -> usize {
        self.closes.get()
    }
}

/// Records each request as `"<kind> <payload-json>"` and answers with canned results.
pub struct RecordingStore {
    probe: Probe,
    fail_at: Option<usize>,
}

impl RecordingStore {
    pub fn new(probe: Probe) -> Self {
        Self { probe, fail_at: None }
    }

    /// Fails the `n`th request (0-based).
    pub fn failing_at(probe: Probe, n: usize) -> Self {
        Self { probe, fail_at: Some(n) }
    }

    fn record(&self, kind: &str, payload: Bson) -> Result<(), DbError> {
        let mut calls = self.probe.calls.borrow_mut();
        let idx = calls.len();
        calls.push(format!("{kind} {}", payload.into_relaxed_extjson()));
        if self.fail_at == Some(idx) {
            return Err(DbError::Io("injected failure".into()));
        }
        Ok(())
    }
}

fn index_name(keys: &Document) -> String {
    keys.iter().map(|(k, v)| format!("{k}_{v}")).collect::<Vec<_>>().join("_")
}

impl DocumentStore for RecordingStore {
    fn collection_name(&self) -> &str {
        "books"
    }

    async fn find(&self, filter: Document, spec: &FindSpec) -> Result<Vec<Document>, DbError> {
        let mut payload = doc! { "filter": filter };
        if let Some(p) = &spec.projection { payload.insert("projection", p.clone()); }
        if let Some(s) = &spec.sort { payload.insert("sort", s.clone()); }
        if let Some(n) = spec.skip { payload.insert("skip", n as i64); }
        if let Some(n) = spec.limit { payload.insert("limit", n); }
        self.record("find", payload.into())?;
        Ok(vec![doc! { "title": "stub" }])
    }

    async fn update_one(&self, filter: Document, update: Document) -> Result<UpdateReport, DbError> {
        self.record("update_one", doc! { "filter": filter, "update": update }.into())?;
        Ok(UpdateReport { matched: 1, modified: 1 })
    }

    async fn delete_one(&self, filter: Document) -> Result<DeleteReport, DbError> {
        self.record("delete_one", doc! { "filter": filter }.into())?;
        Ok(DeleteReport { deleted: 1 })
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, DbError> {
        self.record("aggregate", Bson::Array(pipeline.into_iter().map(Bson::Document).collect()))?;
        Ok(vec![doc! { "_id": "1980s", "count": 1 }])
    }

    async fn create_index(&self, keys: Document) -> Result<String, DbError> {
        let name = index_name(&keys);
        self.record("create_index", keys.into())?;
        Ok(name)
    }

    async fn explain_find(&self, filter: Document, verbosity: &str) -> Result<Document, DbError> {
        self.record("explain", doc! { "filter": filter, "verbosity": verbosity }.into())?;
        Ok(doc! { "queryPlanner": { "winningPlan": { "stage": "FETCH" } } })
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<usize, DbError> {
        let n = docs.len();
        self.record("insert_many", Bson::Int64(n as i64))?;
        Ok(n)
    }

    async fn drop_collection(&self) -> Result<(), DbError> {
        self.record("drop", Bson::Null)
    }

    async fn close(self) {
        log::info!(target: "fake_store", "connection closed");
        self.probe.closes.set(self.probe.closes.get() + 1);
    }
}
