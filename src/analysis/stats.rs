//! 基础统计量：均值、总体标准差、百分位数

use super::AnalysisError;

pub fn mean(values: &[f64]) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput("mean of an empty series"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// 总体标准差（除以 n）
pub fn population_std(values: &[f64]) -> Result<f64, AnalysisError> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// 线性插值百分位数，rank = p / 100 * (n - 1)
pub fn percentile(values: &[f64], p: f64) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput("percentile of an empty series"));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(AnalysisError::InvalidParameter(format!(
            "percentile must be within 0..=100, got {}",
            p
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values).unwrap() - 5.0).abs() < 1e-12);
        assert!((population_std(&values).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        // rank = 0.5 * 3 = 1.5
        assert!((percentile(&values, 50.0).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 100.0).unwrap(), 4.0);
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let values = [10.0, -3.0, 7.0, 0.0, 5.0];
        // sorted: -3, 0, 5, 7, 10 ; rank = 0.95 * 4 = 3.8
        let expected = 7.0 + (10.0 - 7.0) * 0.8;
        assert!((percentile(&values, 95.0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(matches!(mean(&[]), Err(AnalysisError::EmptyInput(_))));
        assert!(matches!(population_std(&[]), Err(AnalysisError::EmptyInput(_))));
        assert!(matches!(percentile(&[], 50.0), Err(AnalysisError::EmptyInput(_))));
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(matches!(
            percentile(&[1.0], 101.0),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }
}
