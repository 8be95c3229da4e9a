pub mod outcome;
pub mod payloads;

pub use outcome::{ProbeOutcome, TestRun};
