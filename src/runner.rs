//! `QueryRunner`: connect, run every demonstration step in order, release the connection.
use crate::config::QueryConfig;
use crate::errors::DbError;
use crate::query::{Reporter, Step, demonstration_steps, execute};
use crate::store::{DocumentStore, MongoStore};
use std::io::Write;

pub struct QueryRunner {
    config: QueryConfig,
    steps: Vec<Step>,
}

impl QueryRunner {
    #[must_use]
    pub fn new(config: QueryConfig) -> Self {
        Self { config, steps: demonstration_steps() }
    }

    /// A runner over a custom step list.
    #[must_use]
    pub fn with_steps(config: QueryConfig, steps: Vec<Step>) -> Self {
        Self { config, steps }
    }

    /// The steps this runner issues, in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Runs against the configured store, printing results to stdout.
    ///
    /// # Errors
    /// Returns the connection error, or the first failing step's error after the connection is closed.
    pub async fn run(&self) -> Result<usize, DbError> {
        self.run_to(std::io::stdout()).await
    }

    /// Like `run`, writing results to `out`.
    ///
    /// # Errors
    /// See `run`.
    pub async fn run_to<W: Write>(&self, out: W) -> Result<usize, DbError> {
        let store = MongoStore::connect(&self.config).await?;
        self.run_on(store, out).await
    }

    /// Runs every step against an already acquired `store` and then closes it, on success and on
    /// failure alike. Returns the number of steps completed.
    ///
    /// # Errors
    /// Returns the first failing step's error; later steps are not issued.
    pub async fn run_on<S: DocumentStore, W: Write>(&self, store: S, out: W) -> Result<usize, DbError> {
        let mut reporter = Reporter::new(out, self.config.output);
        let result = self.run_steps(&store, &mut reporter).await;
        if let Err(e) = &result {
            log::error!("Error running queries: {e}");
        }
        store.close().await;
        result
    }

    async fn run_steps<S: DocumentStore, W: Write>(
        &self,
        store: &S,
        reporter: &mut Reporter<W>,
    ) -> Result<usize, DbError> {
        let total = self.steps.len();
        log::info!(
            "running {total} steps against {}.{}",
            self.config.database,
            store.collection_name()
        );
        for (i, step) in self.steps.iter().enumerate() {
            log::debug!("step {}/{total}: {} [{}]", i + 1, step.label, step.request.kind());
            let outcome = execute(store, &step.request)
                .await
                .map_err(|e| DbError::in_step(step.label, e))?;
            reporter.report(step.label, &outcome).map_err(|e| DbError::in_step(step.label, e))?;
        }
        log::info!("all {total} steps completed");
        Ok(total)
    }
}
