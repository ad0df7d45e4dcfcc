use super::AnalysisError;

/// 计算一阶导数（jerk）：相邻样本差值除以时间差
///
/// 输入为 (timestamp, value) 序列，输出长度为 n - 1。
/// 时间戳必须严格递增，否则返回 `NonIncreasingTimestamp`。
/// 空输入或单个样本返回空序列。
pub fn calculate_derivative(series: &[(f64, f64)]) -> Result<Vec<f64>, AnalysisError> {
    let mut derivative = Vec::with_capacity(series.len().saturating_sub(1));

    for (index, pair) in series.windows(2).enumerate() {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        let dt = t1 - t0;

        // NaN 时间差同样视为非法
        if !(dt > 0.0) {
            return Err(AnalysisError::NonIncreasingTimestamp {
                index: index + 1,
                previous: t0,
                current: t1,
            });
        }

        derivative.push((v1 - v0) / dt);
    }

    Ok(derivative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_n_minus_one() {
        let series: Vec<(f64, f64)> = (0..50).map(|i| (i as f64 * 0.005, (i as f64).sin())).collect();
        let derivative = calculate_derivative(&series).unwrap();
        assert_eq!(derivative.len(), series.len() - 1);
    }

    #[test]
    fn test_rate_of_change() {
        let series = [(0.0, 1.0), (0.5, 2.0), (1.5, 0.0)];
        let derivative = calculate_derivative(&series).unwrap();
        assert_eq!(derivative, vec![2.0, -2.0]);
    }

    #[test]
    fn test_equal_timestamps_rejected() {
        let series = [(0.0, 1.0), (1.0, 2.0), (1.0, 3.0)];
        let err = calculate_derivative(&series).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NonIncreasingTimestamp {
                index: 2,
                previous: 1.0,
                current: 1.0
            }
        );
    }

    #[test]
    fn test_decreasing_timestamps_rejected() {
        let series = [(2.0, 1.0), (1.0, 2.0)];
        assert!(matches!(
            calculate_derivative(&series),
            Err(AnalysisError::NonIncreasingTimestamp { .. })
        ));
    }

    #[test]
    fn test_empty_and_single_sample() {
        assert!(calculate_derivative(&[]).unwrap().is_empty());
        assert!(calculate_derivative(&[(0.0, 9.8)]).unwrap().is_empty());
    }
}
