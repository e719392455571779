pub mod autocorrelation;
pub mod results;
mod stats;

pub use autocorrelation::{autocorrelation, integrated_time, sokal_tau};
pub use results::{ReplicaResults, RunResult, Summary};
pub use stats::Statistics;
