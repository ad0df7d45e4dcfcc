pub mod sample;
pub mod events;
pub mod reports;

pub use sample::{Axis, Recording, Sample};
pub use events::{ExtractedRegion, Roi, SampleRange, SkippedRange};
pub use reports::{
    CalibrationReport, DetectionReport, ExtractionReport, RecoveryOutcome, RecoveryReport,
    ScoringReport,
};
