/// 分析流程错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Timestamps must be strictly increasing (sample {index}: {previous} -> {current})")]
    NonIncreasingTimestamp {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Cleaned signal has {cleaned} samples but unfiltered signal has {unfiltered}")]
    SignalLengthMismatch { cleaned: usize, unfiltered: usize },
    #[error("Peak sequences differ in length (x={x}, y={y}, z={z})")]
    PeakLengthMismatch { x: usize, y: usize, z: usize },
}
