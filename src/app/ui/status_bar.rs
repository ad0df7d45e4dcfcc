use eframe::egui;

use crate::app::viewer::RecoveryViewer;
use crate::types::RecoveryOutcome;
use crate::utils::{absolute_time, format_offset};

pub fn render_status_bar(viewer: &mut RecoveryViewer, ctx: &egui::Context) {
    let report = &viewer.state.report;
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label(format!("Case: {}", report.case));
                ui.separator();

                let (status_text, status_color) = match report.outcome {
                    RecoveryOutcome::Scored => ("Scored", egui::Color32::from_rgb(0, 150, 0)), // 绿色
                    RecoveryOutcome::NoDetection => ("No detection", egui::Color32::from_rgb(255, 165, 0)), // 橙色
                    RecoveryOutcome::ExtractionFailed { .. } => {
                        ("Extraction failed", egui::Color32::from_rgb(150, 0, 0)) // 红色
                    }
                };
                ui.colored_label(status_color, status_text);

                ui.separator();
                ui.label(viewer.state.status_summary());

                ui.separator();
                ui.label(format!(
                    "{} samples, {}",
                    report.samples,
                    format_offset(report.duration_seconds)
                ));

                if let Some(started) = absolute_time(viewer.state.recording_start, 0.0) {
                    ui.separator();
                    ui.label(format!("Recorded {}", started));
                }

                if let Some(extraction) = &report.extraction {
                    if extraction.has_data_loss() {
                        ui.separator();
                        ui.colored_label(
                            egui::Color32::from_rgb(150, 0, 0),
                            format!("{} ranges skipped", extraction.skipped.len()),
                        );
                    }
                }
            });
            ui.add_space(5.0);
        });
}
