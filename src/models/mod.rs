pub mod config;
pub mod difficulty;
pub mod problem;

// config is accessed as crate::models::config::{load_config, save_config, ...}
pub use config::UserConfig;
pub use difficulty::Difficulty;
pub use problem::{CorpusStats, Problem, ScoredProblem};
