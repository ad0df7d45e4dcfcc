use log::{debug, info, warn};

use super::derivative::calculate_derivative;
use super::peaks::PeakAccelerations;
use super::region::extract_regions;
use super::roi::{coalesce_ranges, detect_rois, failed_attempts, map_to_ranges};
use super::score::{score_peaks, ScoreCoefficients};
use super::threshold::calibrate_threshold;
use super::window::scan_windows;
use super::AnalysisError;
use crate::types::{
    CalibrationReport, DetectionReport, ExtractionReport, RecoveryOutcome, RecoveryReport, Sample,
    SampleRange, ScoringReport,
};

/// 单次分析所需的全部参数，由配置层生成后传入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub window_size: usize,
    pub step_size: usize,
    pub factor: f64,
    pub percentile: f64,
    pub coefficients: ScoreCoefficients,
    /// 提取前合并重叠的 ROI 区间
    pub coalesce_ranges: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: 2000,
            step_size: 500,
            factor: 5.0,
            percentile: 95.0,
            coefficients: ScoreCoefficients::default(),
            coalesce_ranges: false,
        }
    }
}

/// 提取与评分阶段的结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringStage {
    pub extraction: ExtractionReport,
    pub peaks: PeakAccelerations,
    pub scoring: Option<ScoringReport>,
    pub outcome: RecoveryOutcome,
}

/// 一条记录的完整分析结果
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub derivative: Vec<f64>,
    pub dispersions: Vec<f64>,
    pub calibration: CalibrationReport,
    pub detection: DetectionReport,
    /// 实际用于截取的区间（合并后或与 detection.ranges 相同）
    pub extraction_ranges: Vec<SampleRange>,
    /// extraction_ranges 是否经过合并
    pub coalesced: bool,
    pub stage: Option<ScoringStage>,
    pub outcome: RecoveryOutcome,
}

impl PipelineOutput {
    pub fn scoring(&self) -> Option<&ScoringReport> {
        self.stage.as_ref().and_then(|s| s.scoring.as_ref())
    }

    pub fn peaks(&self) -> Option<&PeakAccelerations> {
        self.stage.as_ref().map(|s| &s.peaks)
    }

    /// 实际评分的尝试中失败的次数，合并后按合并区间计
    pub fn scored_failed_attempts(&self) -> Option<usize> {
        if self.coalesced {
            self.extraction_ranges.len().checked_sub(1)
        } else {
            self.detection.failed_attempts
        }
    }

    pub fn to_report(&self, case: &str, samples: usize, duration_seconds: f64) -> RecoveryReport {
        RecoveryReport {
            case: case.to_string(),
            samples,
            duration_seconds,
            calibration: self.calibration,
            detection: self.detection.clone(),
            coalesced_ranges: self.coalesced.then(|| self.extraction_ranges.clone()),
            failed_attempts: self.scored_failed_attempts(),
            extraction: self.stage.as_ref().map(|s| s.extraction.clone()),
            scoring: self.scoring().copied(),
            outcome: self.outcome,
        }
    }
}

/// 运行完整的检测与评分流程
///
/// `cleaned` 为滤波后的单轴 (timestamp, value) 序列，用于求导和检测；
/// `unfiltered` 为同一下标空间的原始三轴信号，用于提取峰值。
pub fn run_pipeline(
    cleaned: &[(f64, f64)],
    unfiltered: &[Sample],
    config: &PipelineConfig,
) -> Result<PipelineOutput, AnalysisError> {
    if cleaned.len() != unfiltered.len() {
        return Err(AnalysisError::SignalLengthMismatch {
            cleaned: cleaned.len(),
            unfiltered: unfiltered.len(),
        });
    }

    let derivative = calculate_derivative(cleaned)?;
    info!("First derivative calculated ({} values)", derivative.len());

    let calibration = calibrate_threshold(&derivative, config.factor, config.percentile)?;
    info!(
        "Jerk mean {:.6e}, SD {:.6e}, threshold {:.6e}",
        calibration.mean_derivative, calibration.std_derivative, calibration.threshold
    );

    let dispersions = scan_windows(&derivative, config.window_size, config.step_size)?;
    debug!(
        "{} windows scanned (window {}, step {})",
        dispersions.len(),
        config.window_size,
        config.step_size
    );

    let rois = detect_rois(&dispersions, calibration.threshold);
    let ranges = map_to_ranges(&rois, config.window_size, config.step_size);
    let detection = DetectionReport {
        window_count: dispersions.len(),
        failed_attempts: failed_attempts(&rois),
        rois,
        ranges,
    };
    info!("Regions of interest detected: {}", detection.roi_count());

    let Some(failed) = detection.failed_attempts else {
        warn!("No window exceeded the threshold, no attempt detected");
        return Ok(PipelineOutput {
            derivative,
            dispersions,
            calibration,
            extraction_ranges: Vec::new(),
            coalesced: false,
            detection,
            stage: None,
            outcome: RecoveryOutcome::NoDetection,
        });
    };
    info!("Number of failed attempts = {}", failed);

    let extraction_ranges = if config.coalesce_ranges {
        let merged = coalesce_ranges(&detection.ranges);
        debug!("{} ranges coalesced into {}", detection.ranges.len(), merged.len());
        merged
    } else {
        detection.ranges.clone()
    };

    let stage = score_ranges(unfiltered, &extraction_ranges, &config.coefficients)?;
    let outcome = stage.outcome;

    Ok(PipelineOutput {
        derivative,
        dispersions,
        calibration,
        detection,
        extraction_ranges,
        coalesced: config.coalesce_ranges,
        stage: Some(stage),
        outcome,
    })
}

/// 从未滤波信号截取区间、提取峰值并计算评分
pub fn score_ranges(
    unfiltered: &[Sample],
    ranges: &[SampleRange],
    coefficients: &ScoreCoefficients,
) -> Result<ScoringStage, AnalysisError> {
    let extracted = extract_regions(unfiltered, ranges);
    let extraction = ExtractionReport {
        requested: ranges.len(),
        extracted: extracted.regions.len(),
        skipped: extracted.skipped,
    };
    if extraction.has_data_loss() {
        warn!(
            "{} of {} ranges could not be extracted",
            extraction.skipped.len(),
            extraction.requested
        );
    }

    let peaks = PeakAccelerations::from_regions(&extracted.regions)?;
    if peaks.is_empty() {
        warn!("No region could be extracted, scores are not computed");
        return Ok(ScoringStage {
            outcome: RecoveryOutcome::ExtractionFailed {
                skipped: extraction.skipped.len(),
            },
            extraction,
            peaks,
            scoring: None,
        });
    }

    let scoring = score_peaks(&peaks, coefficients);
    if let Some(scores) = &scoring {
        info!(
            "SA_2axes {:.4}, SumUA {:.4}, RS_SA {:.4}, RS_UA {:.4}",
            scores.sa_2axes, scores.sum_ua, scores.recovery_score_sa, scores.recovery_score_ua
        );
    }

    Ok(ScoringStage {
        extraction,
        peaks,
        scoring,
        outcome: RecoveryOutcome::Scored,
    })
}
