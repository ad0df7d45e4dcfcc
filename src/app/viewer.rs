use eframe::{egui, Frame};
use log::info;

use super::state::ViewerState;
use crate::batch::CaseAnalysis;
use crate::config::PlotConfig;
use crate::types::Axis;

pub struct RecoveryViewer {
    pub state: ViewerState,
    pub config: PlotConfig,
}

impl RecoveryViewer {
    pub fn new(analysis: &CaseAnalysis, axis: Axis, config: PlotConfig) -> Self {
        let state = ViewerState::new(analysis, axis, config.max_points);
        info!("Viewer ready for case {}", state.report.case);
        Self { state, config }
    }
}

impl eframe::App for RecoveryViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);
    }
}

/// 打开窗口显示一个案例的分析图，窗口关闭后返回
pub fn run_viewer(analysis: &CaseAnalysis, axis: Axis, config: &PlotConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_resizable(true),
        ..Default::default()
    };

    let viewer = RecoveryViewer::new(analysis, axis, config.clone());
    let title = format!("Recovery Score - {}", analysis.report.case);
    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(viewer))))
}
