use std::path::PathBuf;
use std::process;

use clap::Parser;

use svg2pptx::{build_presentation, parse_svg};

/// Convert an SVG drawing into a single-slide PowerPoint presentation
#[derive(Parser, Debug)]
#[command(name = "svg2pptx", version, about)]
struct Args {
    /// Path to the source SVG file
    input: PathBuf,
    /// Desired output PPTX path
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let document = match parse_svg(&args.input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = build_presentation(&document, &args.output) {
        eprintln!("Error: {}", e);
        process::exit(3);
    }

    println!(
        "Successfully converted '{}' to '{}' ({} shapes)",
        args.input.display(),
        args.output.display(),
        document.shapes.len()
    );
}
