use clap::Parser;
use env_logger::Env;
use log::{error, info};
use shuttle_rasterizer::app;
use shuttle_rasterizer::io::cli::Cli;
use shuttle_rasterizer::io::obj_loader::load_obj;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = cli.resolve_config().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let mesh = match load_obj(&config.model.path) {
        Ok(mesh) => mesh,
        Err(e) => {
            error!("Failed to load model: {}", e);
            std::process::exit(1);
        }
    };

    let result = if cli.headless {
        app::run_headless(&config, mesh, &config.render.output).map(|_| ())
    } else {
        app::run_gui(&config, mesh)
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Exiting.");
}
