pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod logging;
pub mod raster;
pub mod segmentation;
pub mod session;
pub mod tools;
pub mod worker;

pub use config::{load_engine_config, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use geometry::{ImagePoint, ScreenPoint, ViewTransform, ViewportSize};
pub use history::HistoryStack;
pub use raster::PixelBuffer;
pub use segmentation::{SegmenterChain, SubjectSegmenter};
pub use session::{EditSession, SessionStatus};
pub use tools::{BrushMode, ToolKind};

/// Entrypoint used by embedding applications: wires logging and on-disk
/// configuration, then hands back an empty session ready for `load_image`.
pub fn new_session(segmenters: SegmenterChain) -> EditSession {
    logging::init();
    let config = load_engine_config();
    tracing::debug!(
        history_capacity = config.history_capacity,
        "edit session created"
    );
    EditSession::new(&config, segmenters)
}
