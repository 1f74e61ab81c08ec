pub mod projection;
pub mod render;

use std::path::PathBuf;

use hdr::{WriteError, WriteOptions};
use sky_model::{ParamError, Preetham, SkyModel, SkyParams};

use crate::{projection::FisheyeProjection, render::render_skydome};

/// Everything needed to generate one skydome image.
#[derive(Debug, Clone)]
pub struct SkydomeConfig {
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub sky: SkyParams,
    pub options: WriteOptions,
}

/// Generates the skydome described by `config` and saves it as an hdr file.
pub fn run(config: &SkydomeConfig) -> Result<(), Error> {
    validate_dimensions(config.width, config.height)?;
    let sky = Preetham::new(&config.sky)?;
    if !sky.uses_albedo() {
        tracing::warn!(
            "The Preetham sky model doesn't use ground albedo: the albedo of {} has no effect on the image.",
            config.sky.albedo
        );
    }

    tracing::info!(
        "Rendering {}x{} skydome: turbidity {}, albedo {}, solar elevation {} rad.",
        config.width,
        config.height,
        config.sky.turbidity,
        config.sky.albedo,
        config.sky.solar_elevation,
    );
    let projection = FisheyeProjection::new(config.width, config.height, config.sky.solar_elevation);
    let image = render_skydome(&sky, &projection);

    tracing::info!("Writing \"{}\".", config.output.display());
    hdr::save_hdr(&config.output, &image, config.width, config.height, &config.options)?;

    Ok(())
}

/// Checks that an image of the given size can be written as a file every
/// Radiance reader accepts.
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), Error> {
    if width < hdr::rle::MIN_WIDTH || width > hdr::rle::MAX_WIDTH {
        return Err(Error::InvalidDimensions(format!(
            "width must be between {} and {}, but got {}.",
            hdr::rle::MIN_WIDTH,
            hdr::rle::MAX_WIDTH,
            width
        )));
    }
    if height == 0 {
        return Err(Error::InvalidDimensions(
            "height must be at least 1, but got 0.".into(),
        ));
    }
    Ok(())
}

#[derive(Debug)]
pub enum Error {
    InvalidDimensions(String),
    InvalidSky(ParamError),
    Write(WriteError),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidDimensions(_) | Error::InvalidSky(_) => 2,
            Error::Write(WriteError::DegenerateInput(_)) => 2,
            Error::Write(WriteError::PathUnwritable { .. }) => 3,
            Error::Write(_) => 4,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidSky(ref e) => Some(e),
            Error::Write(ref e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidDimensions(msg) => write!(f, "Invalid image dimensions: {}", msg),
            Error::InvalidSky(e) => write!(f, "Invalid sky parameters: {}", e),
            Error::Write(e) => write!(f, "{}", e),
        }
    }
}

//-------------------------------------------------------------
// From impls.

impl From<ParamError> for Error {
    fn from(other: ParamError) -> Self {
        Error::InvalidSky(other)
    }
}

impl From<WriteError> for Error {
    fn from(other: WriteError) -> Self {
        Error::Write(other)
    }
}
