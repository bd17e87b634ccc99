mod app;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CSV file with one row per decedent.
    #[arg(long, default_value = "data/maricopa_heat_deaths.csv")]
    data: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "heat-bubbles",
        options,
        Box::new(move |cc| Ok(Box::new(app::HeatBubblesApp::new(cc, args.data.clone())))),
    )
}
