use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("canvas of {width}x{height} pixels has a zero dimension")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("failed to allocate a {width}x{height} canvas")]
    CanvasInit { width: u32, height: u32 },
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode png: {0}")]
    Encode(#[from] image::ImageError),
}
