use egui::Color32;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points, Polygon};

use crate::batch::CaseAnalysis;
use crate::config::{PlotColors, PlotConfig};
use crate::types::{Axis, Sample};

/// 格式化数字为固定宽度的 y 轴标签
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 || (abs_value > 0.0 && abs_value < 0.01) {
        // 极大或极小值：科学计数法
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// 桶内最小/最大值抽稀，保留尖峰形状
///
/// 点数不超过 `max_points` 时原样返回。
pub fn decimate(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if max_points < 2 || points.len() <= max_points {
        return points.to_vec();
    }

    let buckets = max_points / 2;
    let bucket_len = points.len().div_ceil(buckets);
    let mut reduced = Vec::with_capacity(buckets * 2);

    for chunk in points.chunks(bucket_len) {
        let mut lo = 0;
        let mut hi = 0;
        for (i, point) in chunk.iter().enumerate() {
            if point[1] < chunk[lo][1] {
                lo = i;
            }
            if point[1] > chunk[hi][1] {
                hi = i;
            }
        }
        // 按时间先后输出
        let (first, second) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        reduced.push(chunk[first]);
        if second != first {
            reduced.push(chunk[second]);
        }
    }
    reduced
}

/// 三轴曲线
#[derive(Debug, Clone, Default)]
pub struct AxisLines {
    pub x: Vec<[f64; 2]>,
    pub y: Vec<[f64; 2]>,
    pub z: Vec<[f64; 2]>,
}

impl AxisLines {
    fn from_samples(samples: &[Sample], max_points: usize) -> Self {
        let series = |axis: Axis| {
            let points: Vec<[f64; 2]> = samples.iter().map(|s| [s.timestamp, s.axis(axis)]).collect();
            decimate(&points, max_points)
        };
        Self {
            x: series(Axis::X),
            y: series(Axis::Y),
            z: series(Axis::Z),
        }
    }

    fn get(&self, axis: Axis) -> &[[f64; 2]] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// 某个提取区间的峰值标记
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakMarker {
    pub start: f64,
    pub end: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PeakMarker {
    fn value(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// 预先计算好的绘图数据，避免每帧重复计算
#[derive(Debug, Clone, Default)]
pub struct PlotData {
    pub detection_axis: Axis,
    pub unfiltered: AxisLines,
    pub moving_average: AxisLines,
    pub butterworth: AxisLines,
    pub jerk: Vec<[f64; 2]>,
    pub threshold: f64,
    /// 每个 ROI 的 (起始时间, 结束时间)
    pub roi_spans: Vec<(f64, f64)>,
    pub peak_markers: Vec<PeakMarker>,
}

impl PlotData {
    pub fn from_analysis(analysis: &CaseAnalysis, axis: Axis, max_points: usize) -> Self {
        let prepared = &analysis.prepared;
        let output = &analysis.output;
        let samples = &prepared.unfiltered;
        let time_at = |index: usize| samples.get(index.min(samples.len().saturating_sub(1))).map(|s| s.timestamp);

        // 导数对齐到区间左端点
        let jerk: Vec<[f64; 2]> = output
            .derivative
            .iter()
            .zip(samples.iter())
            .map(|(d, s)| [s.timestamp, *d])
            .collect();

        let roi_spans = output
            .detection
            .ranges
            .iter()
            .filter_map(|range| Some((time_at(range.start)?, time_at(range.end)?)))
            .collect();

        let peak_markers = match (&output.stage, output.peaks()) {
            (Some(stage), Some(peaks)) => {
                let requested = &output.extraction_ranges;
                let extracted: Vec<_> = requested
                    .iter()
                    .enumerate()
                    .filter(|(position, _)| !stage.extraction.skipped.iter().any(|s| s.position == *position))
                    .map(|(_, range)| *range)
                    .collect();
                extracted
                    .iter()
                    .zip(peaks.iter())
                    .filter_map(|(range, peak)| {
                        Some(PeakMarker {
                            start: time_at(range.start)?,
                            end: time_at(range.end)?,
                            x: peak.x,
                            y: peak.y,
                            z: peak.z,
                        })
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Self {
            detection_axis: axis,
            unfiltered: AxisLines::from_samples(samples, max_points),
            moving_average: AxisLines::from_samples(&prepared.moving_average, max_points),
            butterworth: AxisLines::from_samples(&prepared.butterworth, max_points),
            jerk: decimate(&jerk, max_points),
            threshold: output.calibration.threshold,
            roi_spans,
            peak_markers,
        }
    }

    fn time_range(&self) -> Option<(f64, f64)> {
        let first = self.unfiltered.z.first()?[0];
        let last = self.unfiltered.z.last()?[0];
        Some((first, last))
    }
}

fn value_range(points: &[[f64; 2]]) -> (f64, f64) {
    let (lo, hi) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), p| (min.min(p[1]), max.max(p[1])),
    );
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

/// 在 [y_min, y_max] 范围内画出 ROI 起止竖线
fn roi_markers(plot_ui: &mut egui_plot::PlotUi, spans: &[(f64, f64)], y_min: f64, y_max: f64, color: Color32) {
    for (i, (start, end)) in spans.iter().enumerate() {
        plot_ui.line(
            Line::new(format!("ROI {} start", i + 1), PlotPoints::from(vec![[*start, y_min], [*start, y_max]]))
                .color(color)
                .style(LineStyle::dashed_loose()),
        );
        plot_ui.line(
            Line::new(format!("ROI {} end", i + 1), PlotPoints::from(vec![[*end, y_min], [*end, y_max]]))
                .color(color)
                .style(LineStyle::dashed_loose()),
        );
    }
}

/// 原始、滑动平均与 Butterworth 信号对比
pub fn plot_filters(ui: &mut egui::Ui, data: &PlotData, config: &PlotConfig) {
    let colors = &config.colors;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (axis, color) in [(Axis::X, colors.x_axis), (Axis::Y, colors.y_axis), (Axis::Z, colors.z_axis)] {
            ui.heading(format!("Acc {:?}", axis));
            Plot::new(format!("filters_{:?}", axis))
                .height(config.plot_height)
                .legend(Legend::default())
                .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
                .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new("Unfiltered", PlotPoints::from(data.unfiltered.get(axis).to_vec()))
                            .color(Color32::GRAY)
                            .width(1.0),
                    );
                    plot_ui.line(
                        Line::new("Moving average", PlotPoints::from(data.moving_average.get(axis).to_vec()))
                            .color(Color32::from_rgb(255, 165, 0))
                            .width(1.0),
                    );
                    plot_ui.line(
                        Line::new("Butterworth", PlotPoints::from(data.butterworth.get(axis).to_vec()))
                            .color(rgb(color))
                            .width(1.5),
                    );
                });
            ui.separator();
        }
    });
}

/// 导数（jerk）曲线及阈值
pub fn plot_jerk(ui: &mut egui::Ui, data: &PlotData, config: &PlotConfig) {
    let colors: &PlotColors = &config.colors;
    let (y_min, y_max) = value_range(&data.jerk);
    let time_range = data.time_range();

    ui.heading(format!("Jerk ({:?} axis)", data.detection_axis));
    Plot::new("jerk")
        .height(config.plot_height * 2.0)
        .legend(Legend::default())
        .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Jerk", PlotPoints::from(data.jerk.clone()))
                    .color(rgb(colors.jerk))
                    .width(1.0),
            );
            if let Some((start, end)) = time_range {
                plot_ui.line(
                    Line::new("Threshold", PlotPoints::from(vec![[start, data.threshold], [end, data.threshold]]))
                        .color(Color32::RED)
                        .style(LineStyle::dashed_loose()),
                );
            }
            roi_markers(plot_ui, &data.roi_spans, y_min, y_max, rgb(colors.roi));
        });
}

/// 检测轴上的 ROI 区间及各轴峰值
pub fn plot_rois(ui: &mut egui::Ui, data: &PlotData, config: &PlotConfig) {
    let colors = &config.colors;
    let axis = data.detection_axis;
    let signal = data.butterworth.get(axis);
    let (y_min, y_max) = value_range(signal);
    let roi_fill = {
        let [r, g, b] = colors.roi;
        Color32::from_rgba_unmultiplied(r, g, b, 40)
    };

    ui.heading(format!("Regions of interest ({:?} axis)", axis));
    Plot::new("rois")
        .height(config.plot_height * 2.0)
        .legend(Legend::default())
        .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Butterworth", PlotPoints::from(signal.to_vec()))
                    .color(rgb(colors.z_axis))
                    .width(1.0),
            );
            for (i, (start, end)) in data.roi_spans.iter().enumerate() {
                plot_ui.polygon(
                    Polygon::new(
                        format!("ROI {}", i + 1),
                        PlotPoints::from(vec![[*start, y_min], [*end, y_min], [*end, y_max], [*start, y_max]]),
                    )
                    .fill_color(roi_fill),
                );
            }
            roi_markers(plot_ui, &data.roi_spans, y_min, y_max, rgb(colors.roi));
        });

    ui.separator();
    ui.heading("Peak accelerations");
    Plot::new("peaks")
        .height(config.plot_height)
        .legend(Legend::default())
        .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .show(ui, |plot_ui| {
            for (peak_axis, color) in [(Axis::X, colors.x_axis), (Axis::Y, colors.y_axis), (Axis::Z, colors.z_axis)] {
                let points: Vec<[f64; 2]> = data
                    .peak_markers
                    .iter()
                    .map(|m| [(m.start + m.end) / 2.0, m.value(peak_axis)])
                    .collect();
                plot_ui.points(
                    Points::new(format!("Peak {:?}", peak_axis), PlotPoints::from(points))
                        .radius(4.0)
                        .color(rgb(color)),
                );
            }
        });
}
