use clap::{Parser, Subcommand};
use image_bridge::imaging::{RustBackend, create_preview, get_dimensions};
use image_bridge::{BridgeConfig, config, resize_image};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once; clap needs a &'static str
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "image-bridge")]
#[command(about = "Resize images through the same pipeline the C ABI uses")]
#[command(long_about = "\
Resize images through the same pipeline the C ABI uses

Input format is detected from content (JPEG, PNG, TIFF, WebP). Output is
always JPEG. Set RUST_LOG=debug to see each pipeline stage.

Run 'image-bridge gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize an image to exactly ROWS x COLS and write it as JPEG
    Resize {
        input: PathBuf,
        output: PathBuf,
        /// Output height in pixels
        #[arg(long)]
        rows: u32,
        /// Output width in pixels
        #[arg(long)]
        cols: u32,
    },
    /// Write a JPEG preview (100x100 unless configured otherwise)
    Preview { input: PathBuf, output: PathBuf },
    /// Print detected format and dimensions
    Identify { input: PathBuf },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let bridge_config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Resize {
            input,
            output,
            rows,
            cols,
        } => {
            let data = std::fs::read(&input)?;
            let jpeg = resize_image(&data, rows, cols, &bridge_config)?;
            std::fs::write(&output, &jpeg)?;
            println!(
                "{} → {} ({cols}x{rows}, {} bytes)",
                input.display(),
                output.display(),
                jpeg.len()
            );
        }
        Command::Preview { input, output } => {
            let data = std::fs::read(&input)?;
            let jpeg = create_preview(&RustBackend::new(), &data, &bridge_config)?;
            std::fs::write(&output, &jpeg)?;
            println!(
                "{} → {} ({} bytes)",
                input.display(),
                output.display(),
                jpeg.len()
            );
        }
        Command::Identify { input } => {
            let data = std::fs::read(&input)?;
            let format = image::guess_format(&data)?;
            let (width, height) = get_dimensions(&RustBackend::new(), &data)?;
            println!("{}: {format:?} {width}x{height}", input.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<BridgeConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => Ok(BridgeConfig::default()),
    }
}
