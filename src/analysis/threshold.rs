use super::stats::{mean, percentile, population_std};
use super::AnalysisError;
use crate::types::CalibrationReport;

/// 根据导数序列的统计量标定阈值
///
/// threshold = max(mean + factor * std, percentile 值)，
/// 前者覆盖对称噪声，后者覆盖偏态/长尾分布。
pub fn calibrate_threshold(
    derivative: &[f64],
    factor: f64,
    percentile_rank: f64,
) -> Result<CalibrationReport, AnalysisError> {
    if !factor.is_finite() {
        return Err(AnalysisError::InvalidParameter(format!(
            "factor must be finite, got {}",
            factor
        )));
    }

    let mean_derivative = mean(derivative)?;
    let std_derivative = population_std(derivative)?;
    let percentile_value = percentile(derivative, percentile_rank)?;
    let threshold = (mean_derivative + factor * std_derivative).max(percentile_value);

    Ok(CalibrationReport {
        mean_derivative,
        std_derivative,
        percentile_value,
        threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_threshold_on_unit_noise() {
        let mut rng = StdRng::seed_from_u64(7);
        // 均值约 1、标准差约 1 的均匀噪声
        let half_width = 3.0_f64.sqrt();
        let derivative: Vec<f64> = (0..10_000)
            .map(|_| 1.0 + rng.random_range(-half_width..half_width))
            .collect();

        let report = calibrate_threshold(&derivative, 5.0, 95.0).unwrap();
        let m = mean(&derivative).unwrap();
        let s = population_std(&derivative).unwrap();
        let p95 = percentile(&derivative, 95.0).unwrap();

        assert!((report.mean_derivative - m).abs() < 1e-12);
        assert!((report.std_derivative - s).abs() < 1e-12);
        assert!((report.threshold - (m + 5.0 * s).max(p95)).abs() < 1e-9);
        assert!((m - 1.0).abs() < 0.05);
        assert!((s - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_percentile_wins_on_heavy_tail() {
        // 大部分为 0，少量极值：factor 为 0 时百分位更大
        let mut derivative = vec![0.0; 90];
        derivative.extend(std::iter::repeat(100.0).take(10));
        let report = calibrate_threshold(&derivative, 0.0, 95.0).unwrap();
        assert_eq!(report.threshold, 100.0);
        assert_eq!(report.percentile_value, 100.0);
    }

    #[test]
    fn test_empty_derivative() {
        assert!(matches!(
            calibrate_threshold(&[], 5.0, 95.0),
            Err(AnalysisError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_non_finite_factor() {
        assert!(matches!(
            calibrate_threshold(&[1.0, 2.0], f64::NAN, 95.0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }
}
