// Submodules for separation of concerns
mod exec;
mod report;
mod steps;
mod types;

pub use exec::execute;
pub use report::{OutputMode, RESULTS_TARGET, Reporter, outcome_json, render};
pub use steps::{EXPLAIN_VERBOSITY, PAGE_NUMBER, PAGE_SIZE, decade_pipeline, demonstration_steps, step_labels};
pub use types::{DeleteReport, FindSpec, Outcome, Request, Step, UpdateReport};
