use log::warn;

use crate::types::{ExtractedRegion, Sample, SampleRange, SkippedRange};

/// 截取结果：成功的片段和被跳过的区间
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOutcome {
    pub regions: Vec<ExtractedRegion>,
    pub skipped: Vec<SkippedRange>,
}

/// 按样本区间从未滤波信号中截取三轴片段
///
/// 区间的 start 和 end 都必须是有效下标，截取范围包含 end。
/// 越界的区间会被跳过并记录警告，不影响其他区间。
pub fn extract_regions(signal: &[Sample], ranges: &[SampleRange]) -> ExtractionOutcome {
    let mut outcome = ExtractionOutcome::default();

    for (position, range) in ranges.iter().enumerate() {
        if range.start >= signal.len() || range.end >= signal.len() || range.start > range.end {
            warn!(
                "Range [{}, {}] not found in signal of {} samples and will be skipped",
                range.start,
                range.end,
                signal.len()
            );
            outcome.skipped.push(SkippedRange {
                position,
                range: *range,
                signal_len: signal.len(),
            });
            continue;
        }

        let slice = &signal[range.start..=range.end];
        outcome.regions.push(ExtractedRegion {
            position,
            range: *range,
            x: slice.iter().map(|s| s.x).collect(),
            y: slice.iter().map(|s| s.y).collect(),
            z: slice.iter().map(|s| s.z).collect(),
        });
    }

    outcome
}
