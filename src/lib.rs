pub mod canvas;
pub mod error;
pub mod output;
pub mod pattern;
pub mod utils;

use std::path::Path;

pub use error::{Error, Result};
pub use pattern::{generate, PatternParams, Pivot, StrokeAlpha};

/// Generates the pattern described by `params` and saves it as a PNG at `path`.
pub fn run<P: AsRef<Path>>(params: &PatternParams, path: P) -> Result<()> {
    let path = path.as_ref();

    println!(
        "Generating pattern ({}x{}, drip {})...",
        params.width, params.height, params.resolution
    );
    let img = generate(params)?;

    println!("Saving image...");
    output::write_png(&img, path)?;
    println!("Image saved as {}", path.display());

    Ok(())
}
