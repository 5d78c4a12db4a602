// src/ui.rs
use egui;

pub fn build_ui(ctx: &egui::Context, gear_count: usize, global_angle: f64) {
    egui::Window::new("Gear Chain")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label("Meshing gear chain");
                ui.separator();
                ui.label(format!("Gears: {}", gear_count));
                ui.label(format!("Drive angle: {:.0}°", global_angle));
            });
        });
}
