use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 加速度轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

/// 单个三轴加速度样本，timestamp 为相对记录起点的秒数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(timestamp: f64, x: f64, y: f64, z: f64) -> Self {
        Self { timestamp, x, y, z }
    }

    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// 一次完整的加速度记录
#[derive(Debug, Clone)]
pub struct Recording {
    pub name: String,
    /// 第一个样本的绝对时间（CSV 中为日期时间字符串时才有）
    pub start: Option<NaiveDateTime>,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn new(name: impl Into<String>, start: Option<NaiveDateTime>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            start,
            samples,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }
}

/// 生成单轴 (timestamp, value) 序列，供求导使用
pub fn axis_series(samples: &[Sample], axis: Axis) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| (s.timestamp, s.axis(axis)))
        .collect()
}
