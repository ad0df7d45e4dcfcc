//! 零相位 Butterworth 低通滤波
//!
//! 通过预畸变双线性变换设计级联二阶节，再正反两次滤波（filtfilt），
//! 两端使用奇对称延拓，并以稳态初值启动以减少边缘瞬态。

use std::f64::consts::PI;

use super::PreprocessError;

/// 二阶节，Direct Form II Transposed
#[derive(Debug, Clone, Copy, PartialEq)]
struct Biquad {
    b: [f64; 3],
    a: [f64; 2],
}

impl Biquad {
    fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// 对整段信号滤波，初始状态设为输入恒为首样本时的稳态
    fn filter(&self, input: &[f64]) -> Vec<f64> {
        let Some(&first) = input.first() else {
            return Vec::new();
        };
        let gain = self.dc_gain();
        let mut s1 = (gain - self.b[0]) * first;
        let mut s2 = (self.b[2] - self.a[1] * gain) * first;

        input
            .iter()
            .map(|&x| {
                let y = self.b[0] * x + s1;
                s1 = self.b[1] * x - self.a[0] * y + s2;
                s2 = self.b[2] * x - self.a[1] * y;
                y
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthLowpass {
    sections: Vec<Biquad>,
    order: usize,
}

impl ButterworthLowpass {
    pub fn new(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self, PreprocessError> {
        if order == 0 || order > 10 {
            return Err(PreprocessError::InvalidFilter(format!(
                "order must be 1-10, got {}",
                order
            )));
        }
        if !(cutoff_hz > 0.0 && cutoff_hz < sample_rate / 2.0) {
            return Err(PreprocessError::InvalidFilter(format!(
                "cutoff {} Hz must be within (0, {}) Hz",
                cutoff_hz,
                sample_rate / 2.0
            )));
        }

        // 预畸变后的模拟截止角频率
        let wc = 2.0 * sample_rate * (PI * cutoff_hz / sample_rate).tan();
        let k = 2.0 * sample_rate;
        let mut sections = Vec::with_capacity(order.div_ceil(2));

        // 上半平面的共轭极点对，每对一个二阶节
        for i in 0..order / 2 {
            let theta = PI * (2 * i + order + 1) as f64 / (2 * order) as f64;
            let p_re = wc * theta.cos();
            let p_mag_sq = wc * wc;
            let k2 = k * k;
            let d = k2 - 2.0 * k * p_re + p_mag_sq;
            sections.push(Biquad {
                b: [p_mag_sq / d, 2.0 * p_mag_sq / d, p_mag_sq / d],
                a: [2.0 * (p_mag_sq - k2) / d, (k2 + 2.0 * k * p_re + p_mag_sq) / d],
            });
        }

        // 奇数阶剩余一个实极点 -wc
        if order % 2 == 1 {
            let p = -wc;
            let alpha = k - p;
            sections.push(Biquad {
                b: [-p / alpha, -p / alpha, 0.0],
                a: [-(k + p) / alpha, 0.0],
            });
        }

        Ok(Self { sections, order })
    }

    /// 延拓长度，与传递函数形式的 filtfilt 默认值一致
    pub fn pad_len(&self) -> usize {
        3 * (self.order + 1)
    }

    fn filter_once(&self, input: &[f64]) -> Vec<f64> {
        self.sections
            .iter()
            .fold(input.to_vec(), |signal, section| section.filter(&signal))
    }

    /// 正向 + 反向滤波，输出与输入等长且无相位延迟
    pub fn filtfilt(&self, input: &[f64]) -> Result<Vec<f64>, PreprocessError> {
        let pad = self.pad_len();
        if input.len() <= pad {
            return Err(PreprocessError::SignalTooShort {
                len: input.len(),
                required: pad + 1,
            });
        }

        let n = input.len();
        let first = input[0];
        let last = input[n - 1];

        let mut extended = Vec::with_capacity(n + 2 * pad);
        extended.extend((1..=pad).rev().map(|i| 2.0 * first - input[i]));
        extended.extend_from_slice(input);
        extended.extend((1..=pad).map(|i| 2.0 * last - input[n - 1 - i]));

        let mut forward = self.filter_once(&extended);
        forward.reverse();
        let mut backward = self.filter_once(&forward);
        backward.reverse();

        Ok(backward[pad..pad + n].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_dc_gain() {
        let filter = ButterworthLowpass::new(4, 2.0, 200.0).unwrap();
        let product: f64 = filter.sections.iter().map(|s| s.dc_gain()).product();
        assert!((product - 1.0).abs() < 1e-9);
        assert_eq!(filter.sections.len(), 2);
    }

    #[test]
    fn test_constant_signal_is_unchanged() {
        let filter = ButterworthLowpass::new(4, 2.0, 200.0).unwrap();
        let input = vec![9.81; 500];
        let output = filter.filtfilt(&input).unwrap();
        assert_eq!(output.len(), input.len());
        for v in output {
            assert!((v - 9.81).abs() < 1e-6);
        }
    }

    #[test]
    fn test_attenuates_high_frequency() {
        let fs = 200.0;
        let filter = ButterworthLowpass::new(4, 2.0, fs).unwrap();
        // 0.5 Hz 慢变化 + 40 Hz 噪声
        let input: Vec<f64> = (0..2000)
            .map(|i| {
                let t = i as f64 / fs;
                (2.0 * PI * 0.5 * t).sin() + 0.5 * (2.0 * PI * 40.0 * t).sin()
            })
            .collect();
        let output = filter.filtfilt(&input).unwrap();

        // 中段与纯低频分量的误差应远小于噪声幅度
        let max_err = (500..1500)
            .map(|i| {
                let t = i as f64 / fs;
                (output[i] - (2.0 * PI * 0.5 * t).sin()).abs()
            })
            .fold(0.0_f64, f64::max);
        assert!(max_err < 0.02, "max error {}", max_err);
    }

    #[test]
    fn test_pad_len_follows_order() {
        assert_eq!(ButterworthLowpass::new(4, 2.0, 200.0).unwrap().pad_len(), 15);
        assert_eq!(ButterworthLowpass::new(3, 2.0, 200.0).unwrap().pad_len(), 12);
        assert_eq!(ButterworthLowpass::new(1, 2.0, 200.0).unwrap().pad_len(), 6);
    }

    #[test]
    fn test_odd_order_design() {
        let filter = ButterworthLowpass::new(3, 5.0, 100.0).unwrap();
        assert_eq!(filter.sections.len(), 2);
        let product: f64 = filter.sections.iter().map(|s| s.dc_gain()).product();
        assert!((product - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_design_and_short_signal() {
        assert!(ButterworthLowpass::new(0, 2.0, 200.0).is_err());
        assert!(ButterworthLowpass::new(4, 150.0, 200.0).is_err());
        let filter = ButterworthLowpass::new(4, 2.0, 200.0).unwrap();
        assert!(matches!(
            filter.filtfilt(&[1.0; 10]),
            Err(PreprocessError::SignalTooShort { len: 10, required: 16 })
        ));
    }
}
