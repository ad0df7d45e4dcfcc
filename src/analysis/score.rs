//! 峰值合成与恢复评分
//!
//! 约定峰值序列的最后一个元素为成功的一次尝试，其余为失败尝试。

use super::peaks::PeakAccelerations;
use crate::types::ScoringReport;

/// 回归公式系数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCoefficients {
    /// RS_SA = exp(sa_coefficient * SA_2axes)
    pub sa_coefficient: f64,
    /// RS_UA = ua_coefficient * SumUA ^ ua_exponent
    pub ua_coefficient: f64,
    pub ua_exponent: f64,
}

impl Default for ScoreCoefficients {
    fn default() -> Self {
        Self {
            sa_coefficient: 0.080714,
            ua_coefficient: 7.0312,
            ua_exponent: 0.278,
        }
    }
}

/// 成功尝试的三轴合成峰值
pub fn sa_3axes(peaks: &PeakAccelerations) -> Option<f64> {
    peaks.last().map(|p| p.magnitude_3axes())
}

/// 成功尝试的 X/Y 两轴合成峰值
pub fn sa_2axes(peaks: &PeakAccelerations) -> Option<f64> {
    peaks.last().map(|p| p.magnitude_2axes())
}

/// 所有失败尝试的三轴合成峰值之和
pub fn sum_ua(peaks: &PeakAccelerations) -> f64 {
    peaks.failed().map(|p| p.magnitude_3axes()).sum()
}

pub fn recovery_score_sa(sa_2axes: f64, coefficients: &ScoreCoefficients) -> f64 {
    (coefficients.sa_coefficient * sa_2axes).exp()
}

pub fn recovery_score_ua(sum_ua: f64, coefficients: &ScoreCoefficients) -> f64 {
    coefficients.ua_coefficient * sum_ua.powf(coefficients.ua_exponent)
}

/// 计算全部评分，峰值为空时返回 None
pub fn score_peaks(peaks: &PeakAccelerations, coefficients: &ScoreCoefficients) -> Option<ScoringReport> {
    let sa_3axes = sa_3axes(peaks)?;
    let sa_2axes = sa_2axes(peaks)?;
    let sum_ua = sum_ua(peaks);

    Some(ScoringReport {
        sa_3axes,
        sa_2axes,
        sum_ua,
        recovery_score_sa: recovery_score_sa(sa_2axes, coefficients),
        recovery_score_ua: recovery_score_ua(sum_ua, coefficients),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_attempts() -> PeakAccelerations {
        PeakAccelerations::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 4.0], vec![1.0, 2.0, 0.0])
            .unwrap()
    }

    #[test]
    fn test_end_to_end_scores() {
        let peaks = three_attempts();
        let coefficients = ScoreCoefficients::default();
        let report = score_peaks(&peaks, &coefficients).unwrap();

        assert!((report.sa_2axes - 5.0).abs() < 1e-12);
        assert!((report.sa_3axes - 5.0).abs() < 1e-12);

        let expected_sum = 3.0_f64.sqrt() + 12.0_f64.sqrt();
        assert!((report.sum_ua - expected_sum).abs() < 1e-12);
        assert!((report.sum_ua - 5.196).abs() < 1e-3);

        assert!((report.recovery_score_sa - (0.080714_f64 * 5.0).exp()).abs() < 1e-12);
        assert!((report.recovery_score_sa - 1.497).abs() < 1e-3);

        let expected_ua = 7.0312 * expected_sum.powf(0.278);
        assert!((report.recovery_score_ua - expected_ua).abs() < 1e-12);
        assert!((report.recovery_score_ua - 11.117).abs() < 1e-2);
    }

    #[test]
    fn test_single_attempt_has_no_failed_magnitude() {
        let peaks = PeakAccelerations::new(vec![3.0], vec![4.0], vec![12.0]).unwrap();
        let report = score_peaks(&peaks, &ScoreCoefficients::default()).unwrap();
        assert_eq!(report.sa_3axes, 13.0);
        assert_eq!(report.sa_2axes, 5.0);
        assert_eq!(report.sum_ua, 0.0);
        assert_eq!(report.recovery_score_ua, 0.0);
    }

    #[test]
    fn test_empty_peaks_cannot_be_scored() {
        let peaks = PeakAccelerations::new(vec![], vec![], vec![]).unwrap();
        assert_eq!(sa_2axes(&peaks), None);
        assert_eq!(sum_ua(&peaks), 0.0);
        assert!(score_peaks(&peaks, &ScoreCoefficients::default()).is_none());
    }

    #[test]
    fn test_custom_coefficients() {
        let coefficients = ScoreCoefficients {
            sa_coefficient: 0.0,
            ua_coefficient: 2.0,
            ua_exponent: 1.0,
        };
        assert_eq!(recovery_score_sa(10.0, &coefficients), 1.0);
        assert_eq!(recovery_score_ua(3.0, &coefficients), 6.0);
    }
}
