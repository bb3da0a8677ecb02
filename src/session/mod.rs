use image::RgbaImage;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::geometry::{self, Color, ImagePoint, ScreenPoint, ViewTransform, ViewportSize};
use crate::history::HistoryStack;
use crate::raster::PixelBuffer;
use crate::segmentation::SegmenterChain;
use crate::tools::{self, BrushMode, ToolKind};
use crate::worker::{self, WorkerTask};

/// Published session state. `Busy` means a background operation (automatic
/// removal or flood fill) is in flight; observers should disable mutating
/// input until it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Busy,
}

#[derive(Debug, Clone, Copy)]
enum PendingApply {
    /// Swap current and backing image (automatic removal).
    Replace,
    /// Swap current only, keep the backing copy for the restore brush.
    ReplaceCurrent,
}

struct PendingEdit {
    tool: ToolKind,
    apply: PendingApply,
    task: WorkerTask<RgbaImage>,
}

/// One interactive cut-out session: owns the pixel buffer, its history, the
/// segmentation fallback chain, and at most one pending background task.
///
/// All mutations funnel through here, so a single buffer is never edited
/// concurrently: synchronous tools (brush, lasso) run inline on the calling
/// thread, heavy ones are dispatched to a worker while the session reports
/// `Busy` and rejects further mutating input. Reversible operations snapshot
/// the buffer into history first; brush drags snapshot once per stroke via
/// [`EditSession::begin_stroke`], not per sample.
pub struct EditSession {
    buffer: Option<PixelBuffer>,
    history: HistoryStack,
    segmenters: SegmenterChain,
    brush_reference: Option<Color>,
    pending: Option<PendingEdit>,
}

impl EditSession {
    pub fn new(config: &EngineConfig, segmenters: SegmenterChain) -> Self {
        Self {
            buffer: None,
            history: HistoryStack::new(config.history_capacity),
            segmenters,
            brush_reference: None,
            pending: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.pending.is_some() {
            SessionStatus::Busy
        } else {
            SessionStatus::Idle
        }
    }

    pub fn current_image(&self) -> Option<&RgbaImage> {
        self.buffer.as_ref().map(PixelBuffer::current)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Starts the session over with a freshly loaded image: new buffer, new
    /// backing copy, empty history.
    pub fn load_image(&mut self, image: RgbaImage) -> EngineResult<()> {
        if self.reject_if_busy("load_image") {
            return Ok(());
        }
        self.buffer = Some(PixelBuffer::new(image)?);
        self.history.clear();
        self.brush_reference = None;
        tracing::debug!("image loaded; session reset");
        Ok(())
    }

    /// Installs a replacement image handed back by an external collaborator
    /// (the crop tool). Reversible: the previous buffer state, backing copy
    /// included, goes into history.
    pub fn replace_image(&mut self, image: RgbaImage) -> EngineResult<()> {
        if self.reject_if_busy("replace_image") {
            return Ok(());
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return self.load_image(image);
        };
        self.history.snapshot_before(buffer);
        buffer.replace(image)?;
        self.brush_reference = None;
        Ok(())
    }

    /// Automatic subject cut-out via the segmentation fallback chain. Runs on
    /// a worker; the session stays `Busy` until [`EditSession::poll`] (or
    /// [`EditSession::wait_idle`]) applies the result. Chain failure leaves
    /// the image untouched, never an error.
    pub fn auto_remove(&mut self) {
        if self.reject_if_busy("auto_remove") {
            return;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        self.history.snapshot_before(buffer);

        let image = buffer.snapshot();
        let chain = self.segmenters.clone();
        tracing::debug!(tool = ?ToolKind::AutoRemove, "dispatching segmentation chain");
        self.pending = Some(PendingEdit {
            tool: ToolKind::AutoRemove,
            apply: PendingApply::Replace,
            task: worker::spawn(move || chain.remove_background(&image)),
        });
    }

    /// Magic wand: flood-fill erase from `seed` (image space). Out-of-bounds
    /// or already-transparent seeds are silent no-ops and leave history
    /// untouched; otherwise the fill runs on a worker while the session is
    /// `Busy`.
    pub fn magic_wand(&mut self, seed: ImagePoint, tolerance: f32) {
        if self.reject_if_busy("magic_wand") {
            return;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        let seed_alpha = match buffer.read(seed) {
            Some(pixel) => pixel[3],
            None => {
                tracing::debug!(?seed, "magic wand seed out of bounds");
                return;
            }
        };
        if seed_alpha == 0 {
            tracing::debug!(?seed, "magic wand seed already transparent");
            return;
        }
        self.history.snapshot_before(buffer);

        let image = buffer.snapshot();
        tracing::debug!(tool = ?ToolKind::MagicWand, ?seed, tolerance, "dispatching flood fill");
        self.pending = Some(PendingEdit {
            tool: ToolKind::MagicWand,
            apply: PendingApply::ReplaceCurrent,
            task: worker::spawn(move || {
                tools::flood_fill(&image, seed, tolerance).unwrap_or(image)
            }),
        });
    }

    /// One history snapshot per brush drag, taken at drag start. Per-sample
    /// brush calls deliberately do not snapshot.
    pub fn begin_stroke(&mut self) {
        if self.reject_if_busy("begin_stroke") {
            return;
        }
        if let Some(buffer) = self.buffer.as_ref() {
            self.history.snapshot_before(buffer);
        }
    }

    /// Captures the magic-brush reference color from the pixel under the
    /// initial touch point. Out-of-bounds points keep the previous reference.
    pub fn init_magic_brush(&mut self, point: ImagePoint) {
        if self.reject_if_busy("init_magic_brush") {
            return;
        }
        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        if let Some(reference) = tools::sample_color(buffer, point) {
            self.brush_reference = Some(reference);
        }
    }

    /// Per-sample magic-brush update: erases circle pixels matching the
    /// captured reference color. No-op before [`EditSession::init_magic_brush`]
    /// captured one.
    pub fn apply_magic_brush(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        tolerance: f32,
    ) -> bool {
        if self.reject_if_busy("apply_magic_brush") {
            return false;
        }
        let Some(reference) = self.brush_reference else {
            tracing::debug!("magic brush has no reference color; input ignored");
            return false;
        };
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        tools::apply_magic_brush(buffer, center_x, center_y, radius, tolerance, reference)
    }

    /// Per-sample manual erase/restore brush stamp at an image-space center.
    /// Callers pass the view-space radius divided by the current zoom scale.
    pub fn apply_manual_brush(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        mode: BrushMode,
    ) -> bool {
        if self.reject_if_busy("apply_manual_brush") {
            return false;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        tools::apply_manual_brush(buffer, center_x, center_y, radius, mode)
    }

    /// Lasso cut: maps the full drag's screen points into image space, closes
    /// the path, and erases its interior. Empty input is a no-op before any
    /// history snapshot.
    pub fn apply_lasso(
        &mut self,
        points: &[ScreenPoint],
        transform: ViewTransform,
        viewport: ViewportSize,
    ) -> bool {
        if self.reject_if_busy("apply_lasso") {
            return false;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        if points.is_empty() {
            return false;
        }

        let polygon: Vec<(f32, f32)> = points
            .iter()
            .map(|point| {
                geometry::screen_to_image_f(
                    *point,
                    viewport,
                    transform,
                    buffer.width(),
                    buffer.height(),
                )
            })
            .collect();

        self.history.snapshot_before(buffer);
        tracing::debug!(tool = ?ToolKind::Lasso, vertices = polygon.len(), "applying lasso cut");
        tools::apply_lasso_polygon(buffer, &polygon)
    }

    pub fn undo(&mut self) -> bool {
        if self.reject_if_busy("undo") {
            return false;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        self.history.undo(buffer)
    }

    pub fn redo(&mut self) -> bool {
        if self.reject_if_busy("redo") {
            return false;
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        self.history.redo(buffer)
    }

    /// Applies a finished background result if one is ready. Returns whether
    /// the session transitioned back to `Idle`. Callers drive this from their
    /// event loop while `Busy`.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(|edit| edit.task.try_take()) else {
            return false;
        };
        let Some(edit) = self.pending.take() else {
            return false;
        };
        self.apply_pending(edit.tool, edit.apply, result);
        true
    }

    /// Blocks until any pending background operation settles. Intended for
    /// headless callers and tests; interactive callers poll instead.
    pub fn wait_idle(&mut self) {
        let Some(edit) = self.pending.take() else {
            return;
        };
        let PendingEdit { tool, apply, task } = edit;
        match task.wait() {
            Some(result) => self.apply_pending(tool, apply, result),
            None => tracing::warn!(?tool, "background worker died; result dropped"),
        }
    }

    fn apply_pending(&mut self, tool: ToolKind, apply: PendingApply, image: RgbaImage) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        match apply {
            PendingApply::Replace => {
                if let Err(err) = buffer.replace(image) {
                    tracing::warn!(?tool, %err, "dropping empty background result");
                    return;
                }
            }
            PendingApply::ReplaceCurrent => buffer.replace_current(image),
        }
        tracing::debug!(?tool, "background result applied");
    }

    fn reject_if_busy(&self, operation: &'static str) -> bool {
        if self.pending.is_some() {
            tracing::debug!(operation, "session busy; mutating input ignored");
            return true;
        }
        false
    }
}
