//! Runs a fixed batch of demonstration queries against a MongoDB bookstore collection and
//! reports each result.
pub mod cli;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;
pub mod runner;
pub mod seed;
pub mod store;

pub use mongodb::bson;

pub use crate::config::QueryConfig;
pub use crate::errors::DbError;
pub use crate::runner::QueryRunner;
pub use crate::store::{DocumentStore, MongoStore};
