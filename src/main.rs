//! Standalone orbitview binary: open a model in an orbit viewer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orbitview::{Options, Viewer};

/// Open a glTF, GLB, OBJ or STL model in an orbit viewer.
#[derive(Parser)]
#[command(name = "orbitview", version, about)]
struct Cli {
    /// Model path, file:// URL or http(s):// URL
    locator: Option<String>,

    /// TOML options preset (partial files fill in defaults)
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Window title
    #[arg(short, long, default_value = "orbitview")]
    title: String,

    /// Print the options JSON schema and exit
    #[arg(long)]
    schema: bool,
}

#[cfg(feature = "gui")]
fn pick_model() -> Option<String> {
    rfd::FileDialog::new()
        .set_title("Open model")
        .add_filter("3D models", &["gltf", "glb", "obj", "stl"])
        .pick_file()
        .map(|path| path.to_string_lossy().into_owned())
}

#[cfg(not(feature = "gui"))]
fn pick_model() -> Option<String> {
    None
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();

    if cli.schema {
        match serde_json::to_string_pretty(&Options::json_schema()) {
            Ok(schema) => {
                #[allow(clippy::print_stdout)]
                {
                    println!("{schema}");
                }
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                log::error!("Failed to serialize schema: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let options = match &cli.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load options from {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let Some(locator) = cli.locator.or_else(pick_model) else {
        log::error!("Usage: orbitview <MODEL> [--options FILE]");
        return ExitCode::FAILURE;
    };

    let result = Viewer::builder()
        .with_locator(locator)
        .with_options(options)
        .with_title(cli.title)
        .build()
        .run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
