//! Plan-position indicator rasterization.
//!
//! The renderer walks every pixel of the circular display, maps it back to
//! an angle bucket and range bin (applying the orientation reference), blends
//! the current amplified value with the decayed previous rotation for
//! afterglow, and maps the result through the gain setting onto a fixed
//! background/signal palette. The EBL ray is overlaid last, independent of
//! the scan data.

use crate::math::geo;
use crate::scan::ScanBufferSet;
use crate::settings::{Orientation, RadarSettings};

const BACKGROUND: [u8; 4] = [0, 8, 16, 255];
const SIGNAL: [u8; 4] = [64, 255, 96, 255];
const EBL_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Square RGBA8 raster, row-major from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PpiImage {
    size: usize,
    data: Vec<u8>,
}

impl PpiImage {
    fn new(size: usize) -> Self {
        let size = size.max(2);
        Self {
            size,
            data: vec![0; size * size * 4],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.size + x) * 4;
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let offset = (y * self.size + x) * 4;
        self.data[offset..offset + 4].copy_from_slice(&color);
    }
}

pub struct PpiRenderer {
    image: PpiImage,
    afterglow_decay: f32,
}

impl PpiRenderer {
    pub fn new(image_size: usize, afterglow_decay: f32) -> Self {
        Self {
            image: PpiImage::new(image_size),
            afterglow_decay: afterglow_decay.clamp(0.0, 1.0),
        }
    }

    pub fn image(&self) -> &PpiImage {
        &self.image
    }

    /// Bearing the display's "up" direction points at.
    fn reference_deg(settings: &RadarSettings, own_heading_deg: f64) -> f64 {
        match settings.orientation() {
            Orientation::NorthUp => 0.0,
            Orientation::CourseUp { reference_deg } => reference_deg as f64,
            Orientation::HeadUp => own_heading_deg,
        }
    }

    pub fn render(
        &mut self,
        buffers: &ScanBufferSet,
        settings: &RadarSettings,
        own_heading_deg: f64,
    ) -> &PpiImage {
        let size = self.image.size();
        let angle_buckets = buffers.angle_buckets();
        let range_bins = buffers.range_bins();
        let reference = Self::reference_deg(settings, own_heading_deg);
        let centre = (size - 1) as f64 / 2.0;
        let radius = centre;
        // Low gain compresses weak returns into the background; high gain
        // saturates the display, clutter included.
        let gain_scale = 0.2 + 1.8 * settings.gain();

        for y in 0..size {
            for x in 0..size {
                let dx = x as f64 - centre;
                let dy = y as f64 - centre;
                let r = (dx * dx + dy * dy).sqrt();
                if r > radius {
                    self.image.set_pixel(x, y, BACKGROUND);
                    continue;
                }
                // Screen angle measured clockwise from "up"; add the
                // orientation reference to recover the true bearing.
                let screen_deg = geo::wrap_deg(dx.atan2(-dy).to_degrees());
                let bearing = geo::wrap_deg(screen_deg + reference);
                let bucket =
                    ((bearing / 360.0 * angle_buckets as f64) as usize).min(angle_buckets - 1);
                let bin = ((r / radius * range_bins as f64) as usize).min(range_bins - 1);

                let current = buffers.amplified()[[bucket, bin]];
                let faded = buffers.amplified_prev()[[bucket, bin]] * self.afterglow_decay;
                let intensity = (current.max(faded) * gain_scale).clamp(0.0, 1.0);
                self.image.set_pixel(x, y, lerp_color(BACKGROUND, SIGNAL, intensity));
            }
        }

        self.draw_ebl(settings, reference);
        &self.image
    }

    fn draw_ebl(&mut self, settings: &RadarSettings, reference_deg: f64) {
        let size = self.image.size();
        let centre = (size - 1) as f64 / 2.0;
        let display_deg = geo::wrap_deg(settings.ebl_bearing_deg() as f64 - reference_deg);
        let rad = display_deg.to_radians();
        let steps = size; // dense enough to leave no gaps along the ray
        for step in 0..steps {
            let t = step as f64 / steps as f64 * centre;
            let x = (centre + t * rad.sin()).round() as isize;
            let y = (centre - t * rad.cos()).round() as isize;
            if x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size {
                self.image.set_pixel(x as usize, y as usize, EBL_COLOR);
            }
        }
    }
}

fn lerp_color(from: [u8; 4], to: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for channel in 0..4 {
        out[channel] =
            (from[channel] as f32 + (to[channel] as f32 - from[channel] as f32) * t) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadarConfig;
    use crate::scan::ScanBufferSet;
    use crate::settings::RadarSettings;

    fn settings() -> RadarSettings {
        RadarSettings::from_config(&RadarConfig::default())
    }

    fn patterned_buffers() -> ScanBufferSet {
        let mut buffers = ScanBufferSet::new(360, 64);
        for bin in 10..20 {
            buffers.amplified_mut()[[45, bin]] = 2.0;
        }
        for bucket in 200..220 {
            buffers.amplified_mut()[[bucket, 40]] = 1.5;
        }
        buffers
    }

    #[test]
    fn head_up_at_zero_heading_matches_north_up() {
        let buffers = patterned_buffers();
        let mut renderer = PpiRenderer::new(128, 0.0);

        let mut north_up = settings();
        north_up.set_north_up();
        let first = renderer.render(&buffers, &north_up, 0.0).clone();

        let mut head_up = settings();
        head_up.set_head_up();
        let second = renderer.render(&buffers, &head_up, 0.0).clone();

        assert_eq!(first, second);
    }

    #[test]
    fn head_up_rotates_the_picture_by_own_heading() {
        let buffers = patterned_buffers();
        let mut renderer = PpiRenderer::new(128, 0.0);

        let mut north_up = settings();
        north_up.set_north_up();
        let reference_image = renderer.render(&buffers, &north_up, 90.0).clone();

        let mut head_up = settings();
        head_up.set_head_up();
        let rotated = renderer.render(&buffers, &head_up, 90.0).clone();

        assert_ne!(reference_image, rotated);
    }

    #[test]
    fn zero_decay_ignores_the_previous_rotation() {
        let mut buffers = patterned_buffers();
        let mut renderer = PpiRenderer::new(96, 0.0);
        let clean = renderer.render(&buffers, &settings(), 0.0).clone();

        // Junk in the previous buffer must not show through at decay 0.
        buffers.amplified_mut().fill(3.0);
        buffers.rotate();
        for bin in 10..20 {
            buffers.amplified_mut()[[45, bin]] = 2.0;
        }
        for bucket in 200..220 {
            buffers.amplified_mut()[[bucket, 40]] = 1.5;
        }
        let with_junk_prev = renderer.render(&buffers, &settings(), 0.0).clone();
        assert_eq!(clean, with_junk_prev);
    }

    #[test]
    fn afterglow_shows_the_previous_rotation_faded() {
        let mut buffers = ScanBufferSet::new(360, 64);
        buffers.amplified_mut().fill(1.0);
        buffers.rotate(); // strong previous rotation, empty current one

        let mut renderer = PpiRenderer::new(96, 0.5);
        let image = renderer.render(&buffers, &settings(), 0.0).clone();

        let mut dark_renderer = PpiRenderer::new(96, 0.0);
        let dark = dark_renderer.render(&buffers, &settings(), 0.0).clone();

        // Centre pixel away from the EBL ray: faded trail vs nothing.
        let probe = (20, 60);
        assert_ne!(image.pixel(probe.0, probe.1), dark.pixel(probe.0, probe.1));
        assert_eq!(dark.pixel(probe.0, probe.1), BACKGROUND);
    }

    #[test]
    fn ebl_ray_is_drawn_at_its_bearing() {
        let buffers = ScanBufferSet::new(360, 64);
        let mut s = settings();
        // Move the EBL to due east so it crosses a known pixel row.
        for step in 0..90 {
            s.ebl_bearing_up(step as f64);
        }
        assert_eq!(s.ebl_bearing_deg(), 90.0);

        let mut renderer = PpiRenderer::new(101, 0.0);
        let image = renderer.render(&buffers, &s, 0.0).clone();
        // Centre row, east half: on the ray.
        assert_eq!(image.pixel(75, 50), EBL_COLOR);
        // West half stays background.
        assert_eq!(image.pixel(25, 50), BACKGROUND);
    }
}
