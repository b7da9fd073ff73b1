#[path = "_support/fake_store.rs"]
mod fake_store;

use bookstore_queries::query::{OutputMode, demonstration_steps};
use bookstore_queries::{DbError, QueryConfig, QueryRunner};
use fake_store::{Probe, RecordingStore};

fn runner(output: OutputMode) -> QueryRunner {
    QueryRunner::new(QueryConfig { output, ..Default::default() })
}

#[tokio::test]
async fn runs_every_step_in_order_and_closes_once() {
    let probe = Probe::default();
    let mut out = Vec::new();
    let n = runner(OutputMode::Plain).run_on(RecordingStore::new(probe.clone()), &mut out).await.unwrap();
    assert_eq!(n, demonstration_steps().len());
    assert_eq!(probe.closes(), 1);

    let calls = probe.calls();
    assert_eq!(calls.len(), 16);
    assert_eq!(calls[0], r#"find {"filter":{"genre":"Dystopian"}}"#);
    assert_eq!(calls[1], r#"find {"filter":{"published_year":{"$gt":2000}}}"#);
    assert_eq!(calls[3], r#"update_one {"filter":{"title":"The Hobbit"},"update":{"$set":{"price":16.99}}}"#);
    assert_eq!(calls[4], r#"delete_one {"filter":{"title":"The Catcher in the Rye"}}"#);
    assert_eq!(calls[5], r#"find {"filter":{"in_stock":true,"published_year":{"$gt":2010}}}"#);
    assert_eq!(calls[6], r#"find {"filter":{},"projection":{"title":1,"author":1,"price":1,"_id":0}}"#);
    assert_eq!(calls[8], r#"find {"filter":{},"sort":{"price":-1}}"#);
    assert_eq!(calls[9], r#"find {"filter":{},"skip":5,"limit":5}"#);
    assert!(calls[12].starts_with("aggregate [{\"$group\":{\"_id\":{\"$concat\""));
    assert_eq!(calls[13], r#"create_index {"title":1}"#);
    assert_eq!(calls[14], r#"create_index {"author":1,"published_year":1}"#);
    assert_eq!(calls[15], r#"explain {"filter":{"title":"1984"},"verbosity":"executionStats"}"#);
}

#[tokio::test]
async fn prints_one_line_per_step_in_plain_mode() {
    let probe = Probe::default();
    let mut out = Vec::new();
    runner(OutputMode::Plain).run_on(RecordingStore::new(probe), &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], r#"Dystopian Books: [{"title":"stub"}]"#);
    assert_eq!(lines[3], "Updated price of The Hobbit: 1");
    assert_eq!(lines[4], "Deleted The Catcher in the Rye: 1");
    assert_eq!(lines[13], "Created index on title: title_1");
    assert_eq!(lines[14], "Created compound index on author and published_year: author_1_published_year_1");
    assert!(lines[15].starts_with("Explain for find by title: {\"queryPlanner\""));
}

#[tokio::test]
async fn failure_aborts_remaining_steps_but_still_closes() {
    let probe = Probe::default();
    let mut out = Vec::new();
    let err = runner(OutputMode::Json)
        .run_on(RecordingStore::failing_at(probe.clone(), 3), &mut out)
        .await
        .unwrap_err();
    match err {
        DbError::Step { label, source } => {
            assert_eq!(label, "Updated price of The Hobbit");
            assert!(matches!(*source, DbError::Io(_)));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(probe.closes(), 1);
    assert_eq!(probe.calls().len(), 4);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
}

#[tokio::test]
async fn custom_step_list_runs_only_those_steps() {
    let steps: Vec<_> = demonstration_steps().into_iter().filter(|s| s.request.kind() == "create_index").collect();
    let r = QueryRunner::with_steps(QueryConfig::default(), steps);
    let probe = Probe::default();
    let n = r.run_on(RecordingStore::new(probe.clone()), std::io::sink()).await.unwrap();
    assert_eq!(n, 2);
    assert!(probe.calls().iter().all(|c| c.starts_with("create_index")));
    assert_eq!(probe.closes(), 1);
}

#[tokio::test]
async fn seeding_drops_then_inserts_sample() {
    let probe = Probe::default();
    let store = RecordingStore::new(probe.clone());
    let n = bookstore_queries::seed::seed_collection(&store).await.unwrap();
    assert_eq!(n, bookstore_queries::seed::sample_books().len());
    assert_eq!(probe.calls(), vec!["drop null".to_string(), format!("insert_many {n}")]);
}

#[tokio::test]
async fn unreachable_store_is_a_connection_error() {
    let cfg = QueryConfig {
        uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200&connectTimeoutMS=200".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = QueryRunner::new(cfg).run_to(&mut out).await.unwrap_err();
    assert!(matches!(err, DbError::Connection { .. }), "got {err:?}");
    assert!(out.is_empty());
}
