use std::collections::VecDeque;

use crate::raster::PixelBuffer;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded undo/redo history of full buffer snapshots.
///
/// Every reversible edit pushes a deep copy of the pre-edit buffer, current
/// image and backing copy together, so undoing a dimension-changing
/// replacement reinstates a consistent pair and the restore brush always
/// samples a backing image of matching size. Exceeding the capacity silently
/// drops the oldest entry, trading deep history for bounded memory. A new
/// snapshot always clears the redo side (linear history). Undo and redo on
/// empty stacks are no-ops, never errors.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    undo: VecDeque<PixelBuffer>,
    redo: Vec<PixelBuffer>,
    capacity: usize,
}

impl HistoryStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity.max(1)),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Records the buffer's state before a mutating operation runs.
    pub fn snapshot_before(&mut self, buffer: &PixelBuffer) {
        if self.undo.len() >= self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(buffer.clone());
        self.redo.clear();
    }

    /// Installs the most recent snapshot, moving the present buffer state
    /// onto the redo stack. Returns whether anything was applied.
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(buffer.clone());
        *buffer = previous;
        true
    }

    /// Mirror of [`HistoryStack::undo`].
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        if self.undo.len() >= self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(buffer.clone());
        *buffer = next;
        true
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid_buffer(shade: u8) -> PixelBuffer {
        let mut image = RgbaImage::new(2, 2);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([shade, shade, shade, 255]);
        }
        PixelBuffer::new(image).expect("buffer should build")
    }

    fn paint(buffer: &mut PixelBuffer, shade: u8) {
        for pixel in buffer.current_mut().pixels_mut() {
            *pixel = Rgba([shade, shade, shade, 255]);
        }
    }

    #[test]
    fn undo_restores_the_exact_pre_mutation_image_and_redo_reverses_it() {
        let mut buffer = solid_buffer(10);
        let mut history = HistoryStack::default();

        history.snapshot_before(&buffer);
        paint(&mut buffer, 200);
        let mutated = buffer.snapshot();

        assert!(history.undo(&mut buffer));
        assert_eq!(buffer.current().get_pixel(0, 0).0, [10, 10, 10, 255]);

        assert!(history.redo(&mut buffer));
        assert_eq!(buffer.current().as_raw(), mutated.as_raw());
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_noops() {
        let mut buffer = solid_buffer(10);
        let mut history = HistoryStack::default();

        assert!(!history.undo(&mut buffer));
        assert!(!history.redo(&mut buffer));
        assert_eq!(buffer.current().get_pixel(0, 0).0, [10, 10, 10, 255]);
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn a_new_snapshot_clears_the_redo_stack() {
        let mut buffer = solid_buffer(10);
        let mut history = HistoryStack::default();

        history.snapshot_before(&buffer);
        paint(&mut buffer, 50);
        history.undo(&mut buffer);
        assert!(history.can_redo());

        history.snapshot_before(&buffer);
        assert!(!history.can_redo());
    }

    #[test]
    fn exceeding_capacity_evicts_the_oldest_entry() {
        let mut buffer = solid_buffer(0);
        let mut history = HistoryStack::new(3);

        for shade in 1..=4u8 {
            history.snapshot_before(&buffer);
            paint(&mut buffer, shade * 10);
        }
        assert_eq!(history.undo_depth(), 3);

        // Three undos walk back to shade 10; the shade-0 snapshot was evicted.
        while history.undo(&mut buffer) {}
        assert_eq!(buffer.current().get_pixel(0, 0).0, [10, 10, 10, 255]);
    }

    #[test]
    fn undo_restores_the_backing_copy_alongside_the_current_image() {
        let mut buffer = solid_buffer(10);
        let mut history = HistoryStack::default();

        history.snapshot_before(&buffer);
        let mut replacement = RgbaImage::new(4, 4);
        for pixel in replacement.pixels_mut() {
            *pixel = Rgba([200, 200, 200, 255]);
        }
        buffer
            .replace(replacement)
            .expect("replace should accept a non-empty image");
        assert_eq!(buffer.backing().dimensions(), (4, 4));

        assert!(history.undo(&mut buffer));
        assert_eq!(buffer.current().dimensions(), (2, 2));
        assert_eq!(buffer.backing().dimensions(), (2, 2));
        assert_eq!(buffer.backing().get_pixel(0, 0).0, [10, 10, 10, 255]);

        assert!(history.redo(&mut buffer));
        assert_eq!(buffer.backing().dimensions(), (4, 4));
    }

    #[test]
    fn snapshots_are_deep_copies_not_aliases() {
        let mut buffer = solid_buffer(10);
        let mut history = HistoryStack::default();

        history.snapshot_before(&buffer);
        buffer.current_mut().put_pixel(0, 0, Rgba([1, 2, 3, 4]));

        history.undo(&mut buffer);
        assert_eq!(buffer.current().get_pixel(0, 0).0, [10, 10, 10, 255]);
    }
}
