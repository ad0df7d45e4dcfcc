//! ROI 检测、失败次数统计与窗口序号到样本区间的映射

use crate::types::{Roi, SampleRange};

/// 标出标准差严格大于阈值的窗口，按扫描顺序返回
///
/// 相邻的超阈值窗口不会合并，每个窗口都是一个独立的 ROI。
pub fn detect_rois(dispersions: &[f64], threshold: f64) -> Vec<Roi> {
    dispersions
        .iter()
        .enumerate()
        .filter(|(_, &sd)| sd > threshold)
        .map(|(k, &sd)| Roi::new(k, sd))
        .collect()
}

/// 失败次数 = ROI 数 - 1（最后一个 ROI 为成功的一次）
///
/// 没有 ROI 时返回 None。
pub fn failed_attempts(rois: &[Roi]) -> Option<usize> {
    rois.len().checked_sub(1)
}

/// 第 k 个窗口 -> [k * step, k * step + window)
pub fn map_to_ranges(rois: &[Roi], window_size: usize, step_size: usize) -> Vec<SampleRange> {
    rois.iter()
        .map(|roi| {
            let start = roi.window_index * step_size;
            SampleRange::new(start, start + window_size)
        })
        .collect()
}

/// 合并重叠或首尾相接的区间（可选的后处理，不影响检测本身）
pub fn coalesce_ranges(ranges: &[SampleRange]) -> Vec<SampleRange> {
    let mut merged: Vec<SampleRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.touches(range) => {
                last.start = last.start.min(range.start);
                last.end = last.end.max(range.end);
            }
            _ => merged.push(*range),
        }
    }
    merged
}
