// Day Journal Application
// Main entry point

use day_journal::ui_egui::JournalApp;

fn main() -> eframe::Result<()> {
    // Initialize logging; RUST_LOG controls the level
    env_logger::init();

    log::info!("Starting Day Journal");

    eframe::run_native(
        "Day Journal",
        JournalApp::native_options(),
        Box::new(|cc| Ok(Box::new(JournalApp::new(cc)))),
    )
}
