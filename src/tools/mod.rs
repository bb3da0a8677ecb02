mod brush;
mod flood_fill;
mod lasso;

pub use brush::{apply_magic_brush, apply_manual_brush, sample_color, BrushMode};
pub use flood_fill::flood_fill;
pub use lasso::apply_lasso_polygon;

/// Which parameter sliders a tool exposes in the surrounding UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOptionVisibility {
    pub has_brush_size: bool,
    pub has_tolerance: bool,
}

impl ToolOptionVisibility {
    pub const fn has_any(&self) -> bool {
        let Self {
            has_brush_size,
            has_tolerance,
        } = *self;
        has_brush_size || has_tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    PanZoom,
    AutoRemove,
    MagicWand,
    MagicBrush,
    Erase,
    Restore,
    Lasso,
}

impl ToolKind {
    pub const fn option_visibility(self) -> ToolOptionVisibility {
        match self {
            Self::Erase | Self::Restore => ToolOptionVisibility {
                has_brush_size: true,
                has_tolerance: false,
            },
            Self::MagicBrush => ToolOptionVisibility {
                has_brush_size: true,
                has_tolerance: true,
            },
            Self::MagicWand => ToolOptionVisibility {
                has_brush_size: false,
                has_tolerance: true,
            },
            Self::PanZoom | Self::AutoRemove | Self::Lasso => ToolOptionVisibility {
                has_brush_size: false,
                has_tolerance: false,
            },
        }
    }
}

/// Converts the user-facing 0..=100 tolerance into a squared-distance bound
/// over three 0..=255 channels, avoiding a square root per pixel.
pub(crate) fn tolerance_threshold(tolerance: f32) -> f32 {
    let scaled = tolerance.clamp(0.0, 100.0) * 2.55;
    scaled * scaled * 3.0
}
