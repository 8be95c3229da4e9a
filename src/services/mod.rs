pub mod check;
pub mod orchestrator;
pub mod prober;
pub mod reporter;

pub use check::run_check;
pub use orchestrator::Orchestrator;
pub use prober::Prober;
