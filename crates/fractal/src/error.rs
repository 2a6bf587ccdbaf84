use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FractalError {
    #[error("max iterations must be finite and positive, got {0}")]
    InvalidMaxIterations(f64),
    #[error("evolution speed must be finite and non-negative, got {0}")]
    InvalidEvolutionSpeed(f64),
    #[error("resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}
