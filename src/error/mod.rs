use crate::raster::RasterError;
use crate::segmentation::SegmentationError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
}
