use crate::config::QueryConfig;
use crate::errors::DbError;
use crate::query::OutputMode;
use crate::runner::QueryRunner;
use crate::seed;
use crate::store::{DocumentStore, MongoStore};
use std::io::Write;

use super::command::Command;

/// Executes `cmd`, writing output to stdout.
///
/// # Errors
/// Propagates connection, step and output errors.
pub async fn run(cfg: &QueryConfig, cmd: Command) -> Result<(), DbError> {
    run_to(cfg, cmd, std::io::stdout()).await
}

/// Executes `cmd`, writing output to `out`.
///
/// # Errors
/// Propagates connection, step and output errors.
pub async fn run_to<W: Write>(cfg: &QueryConfig, cmd: Command, mut out: W) -> Result<(), DbError> {
    match cmd {
        Command::Run => {
            QueryRunner::new(cfg.clone()).run_to(out).await?;
            Ok(())
        }
        Command::Seed => {
            let store = MongoStore::connect(cfg).await?;
            let seeded = seed::seed_collection(&store).await;
            store.close().await;
            let n = seeded?;
            match cfg.output {
                OutputMode::Json => {
                    let json = serde_json::json!({"action": "seeded", "database": cfg.database, "collection": cfg.collection, "inserted": n});
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain => writeln!(out, "seeded {n}")?,
                OutputMode::Human => writeln!(out, "seeded {}.{} inserted={n}", cfg.database, cfg.collection)?,
            }
            Ok(())
        }
        Command::Steps => {
            let runner = QueryRunner::new(cfg.clone());
            for (i, step) in runner.steps().iter().enumerate() {
                match cfg.output {
                    OutputMode::Json => {
                        let json = serde_json::json!({"index": i + 1, "step": step.label, "kind": step.request.kind()});
                        writeln!(out, "{json}")?;
                    }
                    OutputMode::Plain => writeln!(out, "{}", step.label)?,
                    OutputMode::Human => writeln!(out, "{:>2}. {} [{}]", i + 1, step.label, step.request.kind())?,
                }
            }
            Ok(())
        }
        Command::ShowConfig => {
            let shown = cfg.redacted();
            match cfg.output {
                OutputMode::Json => writeln!(out, "{}", serde_json::to_string(&shown)?)?,
                OutputMode::Human => writeln!(out, "{}", serde_json::to_string_pretty(&shown)?)?,
                OutputMode::Plain => {
                    writeln!(out, "uri={}", shown.uri)?;
                    writeln!(out, "database={}", shown.database)?;
                    writeln!(out, "collection={}", shown.collection)?;
                    writeln!(out, "log_level={}", shown.log_level)?;
                    if let Some(d) = &shown.log_dir {
                        writeln!(out, "log_dir={}", d.display())?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// Reports a failed command and returns the process exit status.
///
/// Failures exit 0 unless `fail_on_error` is set. Step failures were already logged by the runner,
/// so they are only repeated on stderr when no logger is installed.
pub fn finish(result: Result<(), DbError>, logging: bool, fail_on_error: bool) -> u8 {
    let Err(e) = result else { return 0 };
    if !logging {
        eprintln!("error: {e}");
    } else if !matches!(e, DbError::Step { .. }) {
        log::error!("{e}");
    }
    u8::from(fail_on_error)
}
