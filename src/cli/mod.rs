mod command;
mod runner;

pub use command::Command;
pub use runner::{finish, run, run_to};
