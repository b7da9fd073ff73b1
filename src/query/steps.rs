//! The fixed demonstration catalog, in execution order.
use mongodb::bson::doc;

use super::types::{FindSpec, Request, Step};

pub const PAGE_SIZE: u64 = 5;
pub const PAGE_NUMBER: u64 = 2;
pub const EXPLAIN_VERBOSITY: &str = "executionStats";

fn find(label: &'static str, filter: mongodb::bson::Document, spec: FindSpec) -> Step {
    Step { label, request: Request::Find { filter, spec } }
}

/// Every demonstration step. Steps are independent; none reads another's result.
#[must_use]
pub fn demonstration_steps() -> Vec<Step> {
    let mut steps = Vec::with_capacity(16);

    // Basic CRUD
    steps.push(find("Dystopian Books", doc! { "genre": "Dystopian" }, FindSpec::default()));
    steps.push(find(
        "Books published after 2000",
        doc! { "published_year": { "$gt": 2000 } },
        FindSpec::default(),
    ));
    steps.push(find("Books by J.K. Rowling", doc! { "author": "J.K. Rowling" }, FindSpec::default()));
    steps.push(Step {
        label: "Updated price of The Hobbit",
        request: Request::UpdateOne {
            filter: doc! { "title": "The Hobbit" },
            update: doc! { "$set": { "price": 16.99 } },
        },
    });
    steps.push(Step {
        label: "Deleted The Catcher in the Rye",
        request: Request::DeleteOne { filter: doc! { "title": "The Catcher in the Rye" } },
    });

    // Advanced reads
    steps.push(find(
        "Books in stock and published after 2010",
        doc! { "in_stock": true, "published_year": { "$gt": 2010 } },
        FindSpec::default(),
    ));
    steps.push(find(
        "Projection (title, author, price)",
        doc! {},
        FindSpec {
            projection: Some(doc! { "title": 1, "author": 1, "price": 1, "_id": 0 }),
            ..Default::default()
        },
    ));
    steps.push(find(
        "Books sorted by price ascending",
        doc! {},
        FindSpec { sort: Some(doc! { "price": 1 }), ..Default::default() },
    ));
    steps.push(find(
        "Books sorted by price descending",
        doc! {},
        FindSpec { sort: Some(doc! { "price": -1 }), ..Default::default() },
    ));
    steps.push(find(
        "Page 2 (5 books per page)",
        doc! {},
        FindSpec {
            skip: Some((PAGE_NUMBER - 1) * PAGE_SIZE),
            limit: Some(PAGE_SIZE as i64),
            ..Default::default()
        },
    ));

    // Aggregation
    steps.push(Step {
        label: "Average price by genre",
        request: Request::Aggregate {
            pipeline: vec![doc! { "$group": { "_id": "$genre", "averagePrice": { "$avg": "$price" } } }],
        },
    });
    steps.push(Step {
        label: "Author with most books",
        request: Request::Aggregate {
            pipeline: vec![
                doc! { "$group": { "_id": "$author", "bookCount": { "$sum": 1 } } },
                doc! { "$sort": { "bookCount": -1 } },
                doc! { "$limit": 1 },
            ],
        },
    });
    steps.push(Step {
        label: "Books grouped by decade",
        request: Request::Aggregate { pipeline: decade_pipeline() },
    });

    // Indexing
    steps.push(Step {
        label: "Created index on title",
        request: Request::CreateIndex { keys: doc! { "title": 1 } },
    });
    steps.push(Step {
        label: "Created compound index on author and published_year",
        request: Request::CreateIndex { keys: doc! { "author": 1, "published_year": 1 } },
    });
    steps.push(Step {
        label: "Explain for find by title",
        request: Request::Explain {
            filter: doc! { "title": "1984" },
            verbosity: EXPLAIN_VERBOSITY.into(),
        },
    });

    steps
}

/// Groups by `"<floor(year / 10) * 10>s"` and sorts by that label.
#[must_use]
pub fn decade_pipeline() -> Vec<mongodb::bson::Document> {
    vec![
        doc! {
            "$group": {
                "_id": {
                    "$concat": [
                        { "$toString": { "$multiply": [ { "$floor": { "$divide": ["$published_year", 10] } }, 10 ] } },
                        "s"
                    ]
                },
                "count": { "$sum": 1 }
            }
        },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// Step labels in execution order.
#[must_use]
pub fn step_labels() -> Vec<&'static str> {
    demonstration_steps().iter().map(|s| s.label).collect()
}
