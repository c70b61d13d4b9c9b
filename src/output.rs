use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageBuffer, ImageEncoder, Rgb};

use crate::error::Result;

pub const OUTPUT_PATH: &str = "panaginip.png";

/// Encodes `img` as PNG at `path`, replacing any existing file.
pub fn write_png<P: AsRef<Path>>(img: &ImageBuffer<Rgb<u8>, Vec<u8>>, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    PngEncoder::new(&mut writer).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ColorType::Rgb8,
    )?;
    writer.flush()?;
    Ok(())
}
