// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::scenes::Variant;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "earth-viewer")]
#[command(about = "Rotating Earth viewer", long_about = None)]
pub struct Cli {
    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scene to show
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Directory holding the earth_*.jpg/png textures
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Hide the control panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
