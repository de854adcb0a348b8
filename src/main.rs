mod catalog;
mod effects;
mod engine;
mod error;
mod gui;
mod preview;
mod thumbnails;

use gui::FilterApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Filterdeck"),
        ..Default::default()
    };

    eframe::run_native(
        "Filterdeck",
        options,
        Box::new(|cc| Ok(Box::new(FilterApp::new(cc)))),
    )
}
