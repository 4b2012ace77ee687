use crate::io::config::Config;
use clap::Parser;
use log::info;

/// Software rasterizer for an orbiting OBJ model.
#[derive(Parser, Debug)]
#[command(name = "shuttle-rasterizer")]
#[command(about = "Software rasterizer with an orbit camera and flat shading")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// OBJ model to load, overrides `model.path`
    #[arg(short, long, value_name = "FILE")]
    pub model: Option<String>,

    /// Render a single frame to an image instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Output image for headless mode, overrides `render.output`
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,
}

impl Cli {
    /// Resolves the configuration: file or defaults, then command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config file: {}", path);
                Config::load(path)?
            }
            None => {
                info!("Using default settings");
                Config::default()
            }
        };

        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
        Ok(config)
    }
}
