use serde::{Deserialize, Serialize};

use crate::analysis::{PipelineConfig, ScoreCoefficients};
use crate::types::Axis;

/// 应用配置管理模块
/// 集中管理所有可调参数，提供默认值和配置验证

/// 主配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preprocess: PreprocessConfig,
    pub detection: DetectionConfig,
    pub scoring: ScoringConfig,
    pub plot: PlotConfig,
    pub logging: LoggingConfig,
}

/// 预处理配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Z 轴超过该值视为进入胸卧位，之前的数据被丢弃
    pub target_value: f64,
    pub moving_average_window: usize,
    pub butterworth_order: usize,
    pub butterworth_cutoff_hz: f64,
    pub sampling_rate_hz: f64,
}

/// 检测配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// 标准差倍数
    pub factor: f64,
    /// 百分位（0-100）
    pub percentile: f64,
    /// 每个窗口的样本数（200 Hz 下 2000 个样本为 10 秒）
    pub window_size: usize,
    /// 窗口步长，缺省为 window_size / 4
    pub step_size: Option<usize>,
    /// 用于求导的轴
    pub axis: Axis,
    /// 截取前合并重叠的 ROI 区间
    pub coalesce_ranges: bool,
}

/// 恢复评分回归系数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub sa_coefficient: f64,
    pub ua_coefficient: f64,
    pub ua_exponent: f64,
}

/// 绘图配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub enabled: bool,
    pub width: f32,
    pub height: f32,
    pub plot_height: f32,
    /// 每条曲线最多绘制的点数，超出时按桶取极值降采样
    pub max_points: usize,
    pub colors: PlotColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
    pub z_axis: [u8; 3],
    pub jerk: [u8; 3],
    pub roi: [u8; 3],
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// RUST_LOG 未设置时使用的级别
    pub level: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            target_value: 9.0,
            moving_average_window: 10,
            butterworth_order: 4,
            butterworth_cutoff_hz: 2.0,
            sampling_rate_hz: 200.0,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            factor: 5.0,
            percentile: 95.0,
            window_size: 2000,
            step_size: None,
            axis: Axis::Z,
            coalesce_ranges: false,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let coefficients = ScoreCoefficients::default();
        Self {
            sa_coefficient: coefficients.sa_coefficient,
            ua_coefficient: coefficients.ua_coefficient,
            ua_exponent: coefficients.ua_exponent,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1200.0,
            height: 800.0,
            plot_height: 220.0,
            max_points: 20_000,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            x_axis: [0, 0, 255],    // 蓝色
            y_axis: [0, 150, 0],    // 绿色
            z_axis: [255, 0, 0],    // 红色
            jerk: [30, 90, 200],
            roi: [128, 128, 128],   // 灰色
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl DetectionConfig {
    /// 实际使用的步长
    pub fn resolved_step_size(&self) -> usize {
        self.step_size.unwrap_or(self.window_size / 4)
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 文本解析并验证
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, content).map_err(ConfigError::IoError)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let detection = &self.detection;
        if detection.window_size == 0 {
            return Err(ConfigError::ValidationError("window_size must be positive".to_string()));
        }
        if detection.resolved_step_size() == 0 {
            return Err(ConfigError::ValidationError("step_size must be positive".to_string()));
        }
        if !(0.0..=100.0).contains(&detection.percentile) {
            return Err(ConfigError::ValidationError(format!(
                "percentile must be within 0-100, got {}",
                detection.percentile
            )));
        }
        if !detection.factor.is_finite() {
            return Err(ConfigError::ValidationError("factor must be finite".to_string()));
        }

        let preprocess = &self.preprocess;
        if preprocess.moving_average_window == 0 {
            return Err(ConfigError::ValidationError(
                "moving_average_window must be positive".to_string(),
            ));
        }
        if preprocess.butterworth_order == 0 || preprocess.butterworth_order > 10 {
            return Err(ConfigError::ValidationError(format!(
                "butterworth_order must be 1-10, got {}",
                preprocess.butterworth_order
            )));
        }
        if !(preprocess.butterworth_cutoff_hz > 0.0
            && preprocess.butterworth_cutoff_hz < preprocess.sampling_rate_hz / 2.0)
        {
            return Err(ConfigError::ValidationError(format!(
                "butterworth_cutoff_hz must be within (0, {})",
                preprocess.sampling_rate_hz / 2.0
            )));
        }

        Ok(())
    }

    /// 生成分析流程使用的不可变参数
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            window_size: self.detection.window_size,
            step_size: self.detection.resolved_step_size(),
            factor: self.detection.factor,
            percentile: self.detection.percentile,
            coefficients: ScoreCoefficients {
                sa_coefficient: self.scoring.sa_coefficient,
                ua_coefficient: self.scoring.ua_coefficient,
                ua_exponent: self.scoring.ua_exponent,
            },
            coalesce_ranges: self.detection.coalesce_ranges,
        }
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
