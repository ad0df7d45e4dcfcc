use serde::Serialize;

use super::AnalysisError;
use crate::types::ExtractedRegion;

/// 单次尝试的三轴峰值加速度
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakTriple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PeakTriple {
    pub fn magnitude_3axes(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn magnitude_2axes(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

/// 每个片段、每个轴的最大绝对加速度
///
/// 三个序列长度始终相同，所有构造都经过 `new` 的长度检查。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakAccelerations {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl PeakAccelerations {
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self, AnalysisError> {
        if x.len() != y.len() || y.len() != z.len() {
            return Err(AnalysisError::PeakLengthMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }
        Ok(Self { x, y, z })
    }

    /// 逐片段取各轴最大绝对值，经 `new` 校验长度
    pub fn from_regions(regions: &[ExtractedRegion]) -> Result<Self, AnalysisError> {
        Self::new(
            regions.iter().map(|r| max_abs(&r.x)).collect(),
            regions.iter().map(|r| max_abs(&r.y)).collect(),
            regions.iter().map(|r| max_abs(&r.z)).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PeakTriple> {
        Some(PeakTriple {
            x: *self.x.get(index)?,
            y: *self.y.get(index)?,
            z: *self.z.get(index)?,
        })
    }

    /// 最后一次（成功的）尝试
    pub fn last(&self) -> Option<PeakTriple> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// 除最后一次以外的所有（失败的）尝试
    pub fn failed(&self) -> impl Iterator<Item = PeakTriple> + '_ {
        (0..self.len().saturating_sub(1)).filter_map(move |i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = PeakTriple> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    #[cfg(test)]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[cfg(test)]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[cfg(test)]
    pub fn z(&self) -> &[f64] {
        &self.z
    }
}

/// NaN 会被忽略
fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
