mod csv;
mod matrix;

pub use csv::{read_preferences, read_workloads, write_preferences, write_workloads};
pub use matrix::{MAX_RANK, Preferences, Workloads};
