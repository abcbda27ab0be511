#![doc = "Pairalloc public API"]

mod allocation;
mod inputs;
mod objective;
mod report;
mod rng;
mod solver;

#[doc(inline)]
pub use allocation::{Allocation, Schedule};

#[doc(inline)]
pub use inputs::{
    Preferences, Workloads, read_preferences, read_workloads, write_preferences, write_workloads,
};

#[doc(inline)]
pub use objective::Weights;

#[doc(inline)]
pub use rng::{RngSnapshot, ShiftRegisterRng};

#[doc(inline)]
pub use solver::Solver;
