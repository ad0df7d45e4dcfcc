use std::fmt;

use serde::Serialize;

use super::{Roi, SampleRange, SkippedRange};
use crate::utils::format_offset;

/// Result of threshold calibration on the derivative series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub mean_derivative: f64,
    pub std_derivative: f64,
    pub percentile_value: f64,
    pub threshold: f64,
}

/// Result of the window scan and ROI detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub window_count: usize,
    pub rois: Vec<Roi>,
    /// None when no ROI was found
    pub failed_attempts: Option<usize>,
    pub ranges: Vec<SampleRange>,
}

impl DetectionReport {
    pub fn roi_count(&self) -> usize {
        self.rois.len()
    }
}

/// Result of region extraction on the unfiltered signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub requested: usize,
    pub extracted: usize,
    pub skipped: Vec<SkippedRange>,
}

impl ExtractionReport {
    pub fn has_data_loss(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Magnitudes and recovery scores of one recording
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringReport {
    pub sa_3axes: f64,
    pub sa_2axes: f64,
    pub sum_ua: f64,
    pub recovery_score_sa: f64,
    pub recovery_score_ua: f64,
}

/// Terminal state of the pipeline for one recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecoveryOutcome {
    /// 没有任何窗口超过阈值
    NoDetection,
    /// 检测到 ROI，但所有区间都无法截取
    ExtractionFailed { skipped: usize },
    Scored,
}

impl RecoveryOutcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, RecoveryOutcome::Scored)
    }
}

impl fmt::Display for RecoveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryOutcome::NoDetection => write!(f, "no attempt detected"),
            RecoveryOutcome::ExtractionFailed { skipped } => {
                write!(f, "extraction failed ({} ranges out of bounds)", skipped)
            }
            RecoveryOutcome::Scored => write!(f, "scores computed"),
        }
    }
}

/// Full report of one analyzed case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecoveryReport {
    pub case: String,
    pub samples: usize,
    pub duration_seconds: f64,
    pub calibration: CalibrationReport,
    pub detection: DetectionReport,
    /// Ranges actually extracted when coalescing is enabled
    pub coalesced_ranges: Option<Vec<SampleRange>>,
    /// Failed attempts among the scored attempts (merged ranges when coalescing)
    pub failed_attempts: Option<usize>,
    pub extraction: Option<ExtractionReport>,
    pub scoring: Option<ScoringReport>,
    pub outcome: RecoveryOutcome,
}

impl RecoveryReport {
    pub fn failed_attempt_count(&self) -> usize {
        self.failed_attempts.unwrap_or(0)
    }
}

impl fmt::Display for RecoveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "results are:")?;
        writeln!(f, "file name: {}", self.case)?;
        writeln!(
            f,
            "samples: {} ({})",
            self.samples,
            format_offset(self.duration_seconds)
        )?;
        writeln!(f, "mean_jerk: {}", self.calibration.mean_derivative)?;
        writeln!(f, "std_jerk: {}", self.calibration.std_derivative)?;
        writeln!(f, "jerk_threshold_cal: {}", self.calibration.threshold)?;
        writeln!(f, "windows scanned: {}", self.detection.window_count)?;
        writeln!(f, "len(roi): {}", self.detection.roi_count())?;
        if let Some(merged) = &self.coalesced_ranges {
            writeln!(f, "coalesced ranges: {}", merged.len())?;
        }
        writeln!(f, "Number of failed attempts: {}", self.failed_attempt_count())?;
        if let Some(extraction) = &self.extraction {
            writeln!(
                f,
                "regions extracted: {} / {}",
                extraction.extracted, extraction.requested
            )?;
        }
        if let Some(scoring) = &self.scoring {
            writeln!(f, "sa_3axes= {}", scoring.sa_3axes)?;
            writeln!(f, "sa_2axes= {}", scoring.sa_2axes)?;
            writeln!(f, "sumua= {}", scoring.sum_ua)?;
            writeln!(f, "rs_sa= {}", scoring.recovery_score_sa)?;
            writeln!(f, "rs_ua= {}", scoring.recovery_score_ua)?;
        }
        write!(f, "outcome: {}", self.outcome)
    }
}
