mod app;
mod chart;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "hierarchy_data.json")]
    hierarchy_data: String,

    #[arg(long, default_value = "location_populations.json")]
    population_data: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "taxoscope",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::TaxoscopeApp::new(
                cc,
                args.hierarchy_data.clone(),
                args.population_data.clone(),
            )))
        }),
    )
}
