use chrono::NaiveDateTime;

use crate::batch::CaseAnalysis;
use crate::plotter::PlotData;
use crate::types::{Axis, RecoveryReport};

/// 查看器标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerTab {
    #[default]
    Filters,
    Jerk,
    Rois,
}

impl ViewerTab {
    pub const ALL: [ViewerTab; 3] = [ViewerTab::Filters, ViewerTab::Jerk, ViewerTab::Rois];

    pub fn label(&self) -> &'static str {
        match self {
            ViewerTab::Filters => "Filters",
            ViewerTab::Jerk => "Jerk",
            ViewerTab::Rois => "ROIs",
        }
    }
}

/// 查看器状态：一次分析的报告和预先计算好的绘图数据
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub tab: ViewerTab,
    pub report: RecoveryReport,
    pub plot_data: PlotData,
    pub recording_start: Option<NaiveDateTime>,
}

impl ViewerState {
    pub fn new(analysis: &CaseAnalysis, axis: Axis, max_points: usize) -> Self {
        Self {
            tab: ViewerTab::default(),
            report: analysis.report.clone(),
            plot_data: PlotData::from_analysis(analysis, axis, max_points),
            recording_start: analysis.recording.start,
        }
    }

    /// 状态栏摘要
    pub fn status_summary(&self) -> String {
        match self.report.scoring {
            Some(scores) => format!(
                "RS-SA {:.3}  RS-UA {:.3}  failed attempts {}",
                scores.recovery_score_sa,
                scores.recovery_score_ua,
                self.report.failed_attempt_count()
            ),
            None => self.report.outcome.to_string(),
        }
    }
}
