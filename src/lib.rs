// cpfr — parallel CPF validation over batches of text files

pub mod cli;
pub mod config;
pub mod cpf;
pub mod batch;
pub mod processor;
pub mod threadpool;
pub mod timefn;
pub mod results;
pub mod coordinator;
pub mod shell;
pub mod util;

pub const CPFR_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use coordinator::{run, RunOptions, RunSummary};
pub use cpf::validate;
pub use processor::Tally;
