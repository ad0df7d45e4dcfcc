pub mod csv_reader;
pub mod filters;
pub mod butterworth;

use log::info;

use crate::config::PreprocessConfig;
use crate::types::{Axis, Recording, Sample};

pub use butterworth::ButterworthLowpass;
pub use csv_reader::{add_csv_extension, read_recording, ReadError};

/// 预处理错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreprocessError {
    #[error("Invalid filter design: {0}")]
    InvalidFilter(String),
    #[error("Signal too short for filtering: {len} samples, at least {required} required")]
    SignalTooShort { len: usize, required: usize },
}

/// 预处理后的各版本信号，全部共享同一下标空间
#[derive(Debug, Clone)]
pub struct PreparedSignals {
    /// 初始截断后、未滤波的信号（峰值提取使用）
    pub unfiltered: Vec<Sample>,
    pub moving_average: Vec<Sample>,
    pub butterworth: Vec<Sample>,
}

impl PreparedSignals {
    /// 检测用的单轴清洗信号
    pub fn cleaned(&self, axis: Axis) -> Vec<(f64, f64)> {
        crate::types::sample::axis_series(&self.butterworth, axis)
    }
}

pub fn prepare(recording: &Recording, config: &PreprocessConfig) -> Result<PreparedSignals, PreprocessError> {
    let unfiltered = filters::initial_filter(&recording.samples, config.target_value);
    info!("Initial filter applied ({} samples kept)", unfiltered.len());

    let moving_average = filters::moving_average(&unfiltered, config.moving_average_window);
    info!("Moving average applied (window {})", config.moving_average_window);

    let filter = ButterworthLowpass::new(
        config.butterworth_order,
        config.butterworth_cutoff_hz,
        config.sampling_rate_hz,
    )?;
    let columns = [Axis::X, Axis::Y, Axis::Z].map(|axis| {
        let values: Vec<f64> = unfiltered.iter().map(|s| s.axis(axis)).collect();
        filter.filtfilt(&values)
    });
    let [x, y, z] = columns;
    let (x, y, z) = (x?, y?, z?);

    let butterworth = unfiltered
        .iter()
        .enumerate()
        .map(|(i, s)| Sample::new(s.timestamp, x[i], y[i], z[i]))
        .collect();
    info!(
        "Butterworth filter applied (order {}, cutoff {} Hz)",
        config.butterworth_order, config.butterworth_cutoff_hz
    );

    Ok(PreparedSignals {
        unfiltered,
        moving_average,
        butterworth,
    })
}
