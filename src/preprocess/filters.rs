//! 初始截断与滑动平均

use log::{info, warn};

use crate::types::Sample;

/// 丢弃 Z 轴首次超过 target_value 之前的样本（马匹首次达到胸卧位）
///
/// 找不到超过阈值的样本时原样返回。
pub fn initial_filter(samples: &[Sample], target_value: f64) -> Vec<Sample> {
    match samples.iter().position(|s| s.z > target_value) {
        Some(start) => {
            info!("Initial filter: sternal recumbency at sample {}", start);
            samples[start..].to_vec()
        }
        None => {
            warn!(
                "No values in Acc_Z greater than {} could be found, keeping the full recording",
                target_value
            );
            samples.to_vec()
        }
    }
}

/// 尾随滑动平均，窗口不足时使用已有样本（min_periods = 1）
pub fn moving_average(samples: &[Sample], window: usize) -> Vec<Sample> {
    let window = window.max(1);
    let mut sums = [0.0_f64; 3];
    let mut averaged = Vec::with_capacity(samples.len());

    for (i, sample) in samples.iter().enumerate() {
        sums[0] += sample.x;
        sums[1] += sample.y;
        sums[2] += sample.z;
        if i >= window {
            let leaving = &samples[i - window];
            sums[0] -= leaving.x;
            sums[1] -= leaving.y;
            sums[2] -= leaving.z;
        }

        let count = (i + 1).min(window) as f64;
        averaged.push(Sample::new(
            sample.timestamp,
            sums[0] / count,
            sums[1] / count,
            sums[2] / count,
        ));
    }

    averaged
}
