mod anneal;
mod seed;

pub use anneal::Schedule;
