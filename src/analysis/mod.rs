pub mod error;
pub mod stats;
pub mod derivative;
pub mod threshold;
pub mod window;
pub mod roi;
pub mod region;
pub mod peaks;
pub mod score;
pub mod pipeline;

pub use error::AnalysisError;
pub use pipeline::{run_pipeline, PipelineConfig, PipelineOutput};
pub use score::ScoreCoefficients;
