mod app_state;
mod autosave;
mod document;
mod edit;
mod modals;
mod naming;
mod search;
mod store;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = ui::create_app()?;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    let _ = eframe::run_native("Jotter", native_options, Box::new(move |_cc| Box::new(app)));
    Ok(())
}
