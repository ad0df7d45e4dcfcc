use serde::Serialize;

/// 超过阈值的扫描窗口
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Roi {
    /// 窗口序号（第 k 个窗口，起点为 k * step_size）
    pub window_index: usize,
    /// 窗口内导数的标准差
    pub dispersion: f64,
}

impl Roi {
    pub fn new(window_index: usize, dispersion: f64) -> Self {
        Self {
            window_index,
            dispersion,
        }
    }
}

/// 原始时间轴上的样本区间
///
/// 由窗口映射得到时为半开区间 `[k * step, k * step + window)`；
/// 截取时按包含 end 的方式切片（见 `extract_regions`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleRange {
    pub start: usize,
    pub end: usize,
}

impl SampleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 两个区间重叠，或一个的 end 等于另一个的 start（连续的窗口）
    pub fn touches(&self, other: &SampleRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// 从未滤波信号中截取的三轴片段
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRegion {
    /// 对应区间在输入列表中的位置
    pub position: usize,
    pub range: SampleRange,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// 超出信号范围而被跳过的区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedRange {
    pub position: usize,
    pub range: SampleRange,
    pub signal_len: usize,
}
