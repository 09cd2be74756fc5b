pub mod dtos;
pub mod handlers;
pub mod heuristic;
pub mod orchestrator;

pub use dtos::{AnalysisResponse, AnalyzeRequest};
pub use orchestrator::AnalyzeError;
