use eframe::egui;

use crate::app::state::ViewerTab;
use crate::app::viewer::RecoveryViewer;
use crate::plotter;

pub fn render_main_panel(viewer: &mut RecoveryViewer, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // 标签切换
        ui.horizontal(|ui| {
            for tab in ViewerTab::ALL {
                ui.selectable_value(&mut viewer.state.tab, tab, tab.label());
            }
            ui.separator();
            ui.label(format!("ROIs: {}", viewer.state.plot_data.roi_spans.len()));
            ui.label(format!("Threshold: {:.4e}", viewer.state.plot_data.threshold));
        });
        ui.add_space(10.0);

        let data = &viewer.state.plot_data;
        match viewer.state.tab {
            ViewerTab::Filters => plotter::plot_filters(ui, data, &viewer.config),
            ViewerTab::Jerk => plotter::plot_jerk(ui, data, &viewer.config),
            ViewerTab::Rois => plotter::plot_rois(ui, data, &viewer.config),
        }
    });
}
