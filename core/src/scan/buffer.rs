//! Angle-by-range scan buffers.
//!
//! Three grids of identical shape coexist: the raw returns of the latest
//! sweep, the amplified (clutter-layered) picture accumulated across the
//! rotation in progress, and the amplified picture of the previous full
//! rotation used for afterglow. They are owned together so their shapes can
//! never diverge.

use ndarray::Array2;

pub struct ScanBufferSet {
    raw: Array2<f32>,
    amplified: Array2<f32>,
    amplified_prev: Array2<f32>,
}

impl ScanBufferSet {
    /// Builds the three buffers at a common shape. Degenerate dimensions are
    /// clamped so that even a zero-range request yields a single-ring grid.
    pub fn new(angle_buckets: usize, range_bins: usize) -> Self {
        let angles = angle_buckets.max(1);
        let bins = range_bins.max(1);
        Self {
            raw: Array2::zeros((angles, bins)),
            amplified: Array2::zeros((angles, bins)),
            amplified_prev: Array2::zeros((angles, bins)),
        }
    }

    pub fn angle_buckets(&self) -> usize {
        self.raw.nrows()
    }

    pub fn range_bins(&self) -> usize {
        self.raw.ncols()
    }

    pub fn raw(&self) -> &Array2<f32> {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut Array2<f32> {
        &mut self.raw
    }

    pub fn amplified(&self) -> &Array2<f32> {
        &self.amplified
    }

    pub fn amplified_mut(&mut self) -> &mut Array2<f32> {
        &mut self.amplified
    }

    pub fn amplified_prev(&self) -> &Array2<f32> {
        &self.amplified_prev
    }

    /// Rotation handoff: the amplified picture becomes the previous one and
    /// a cleared grid starts accumulating the new rotation. Called exactly
    /// once per full antenna rotation.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.amplified, &mut self.amplified_prev);
        self.amplified.fill(0.0);
    }

    /// Zeroes all three buffers together. Required on a range change, since
    /// the metres-per-bin semantics of every cell change at once.
    pub fn clear(&mut self) {
        self.raw.fill(0.0);
        self.amplified.fill(0.0);
        self.amplified_prev.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_match_across_all_three_buffers() {
        let buffers = ScanBufferSet::new(360, 64);
        assert_eq!(buffers.raw().dim(), (360, 64));
        assert_eq!(buffers.amplified().dim(), (360, 64));
        assert_eq!(buffers.amplified_prev().dim(), (360, 64));
    }

    #[test]
    fn degenerate_dimensions_clamp_to_single_ring() {
        let buffers = ScanBufferSet::new(0, 0);
        assert_eq!(buffers.angle_buckets(), 1);
        assert_eq!(buffers.range_bins(), 1);
    }

    #[test]
    fn rotate_moves_amplified_to_previous_and_clears_current() {
        let mut buffers = ScanBufferSet::new(4, 4);
        buffers.amplified_mut()[[2, 3]] = 7.5;
        buffers.rotate();
        assert_eq!(buffers.amplified_prev()[[2, 3]], 7.5);
        assert_eq!(buffers.amplified()[[2, 3]], 0.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut buffers = ScanBufferSet::new(4, 4);
        buffers.raw_mut()[[0, 0]] = 1.0;
        buffers.amplified_mut()[[1, 1]] = 2.0;
        buffers.rotate();
        buffers.clear();
        assert_eq!(buffers.raw().sum(), 0.0);
        assert_eq!(buffers.amplified().sum(), 0.0);
        assert_eq!(buffers.amplified_prev().sum(), 0.0);
    }
}
