use super::stats::population_std;
use super::AnalysisError;

/// 滑动窗口标准差扫描
///
/// 窗口起点依次为 0, step, 2*step, ...，直到剩余样本不足一个完整窗口为止。
/// 尾部不完整的窗口直接丢弃。返回值的第 k 个元素对应起点 k * step_size。
pub fn scan_windows(
    derivative: &[f64],
    window_size: usize,
    step_size: usize,
) -> Result<Vec<f64>, AnalysisError> {
    if window_size == 0 {
        return Err(AnalysisError::InvalidParameter(
            "window_size must be positive".to_string(),
        ));
    }
    if step_size == 0 {
        return Err(AnalysisError::InvalidParameter(
            "step_size must be positive".to_string(),
        ));
    }

    let mut dispersions = Vec::with_capacity(window_count(derivative.len(), window_size, step_size));
    let mut start = 0;
    while start + window_size <= derivative.len() {
        dispersions.push(population_std(&derivative[start..start + window_size])?);
        start += step_size;
    }

    Ok(dispersions)
}

/// 完整窗口的数量：floor((n - W) / S) + 1，n < W 时为 0
pub fn window_count(len: usize, window_size: usize, step_size: usize) -> usize {
    if window_size == 0 || step_size == 0 || len < window_size {
        return 0;
    }
    (len - window_size) / step_size + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count_matches_formula() {
        let derivative: Vec<f64> = (0..10_000).map(|i| (i % 7) as f64).collect();
        let dispersions = scan_windows(&derivative, 2000, 500).unwrap();
        assert_eq!(dispersions.len(), 17);
        assert_eq!(window_count(10_000, 2000, 500), 17);
    }

    #[test]
    fn test_trailing_partial_window_dropped() {
        // 长度 10，窗口 4，步长 3：起点 0, 3, 6；起点 9 不完整
        let derivative: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let dispersions = scan_windows(&derivative, 4, 3).unwrap();
        assert_eq!(dispersions.len(), 3);
        // 任意 4 个连续整数的总体标准差都是 sqrt(1.25)
        for sd in dispersions {
            assert!((sd - 1.25_f64.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_window_index_maps_to_start() {
        let mut derivative = vec![0.0; 20];
        derivative[12] = 5.0;
        let dispersions = scan_windows(&derivative, 4, 2).unwrap();
        // 包含下标 12 的窗口起点为 10 和 12，即 k = 5, 6
        let flagged: Vec<usize> = dispersions
            .iter()
            .enumerate()
            .filter(|(_, &sd)| sd > 0.0)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(flagged, vec![5, 6]);
    }

    #[test]
    fn test_short_series_yields_no_windows() {
        assert!(scan_windows(&[1.0, 2.0], 4, 1).unwrap().is_empty());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(scan_windows(&[1.0; 8], 0, 1).is_err());
        assert!(scan_windows(&[1.0; 8], 4, 0).is_err());
    }
}
