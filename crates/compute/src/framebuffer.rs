use glam::Vec4;

/// Bytes per RGBA8 texel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A rendered frame: tightly packed RGBA8 texels, rows stored top-to-bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// An all-zero frame of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Wraps already packed texels. Returns `None` if the length does not match.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * BYTES_PER_PIXEL).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes in one row of texels.
    #[must_use]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// The texel at `column`, `row` (row 0 is the top of the image).
    #[must_use]
    pub fn pixel(&self, column: u32, row: u32) -> Option<[u8; 4]> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let start = (row as usize * self.width as usize + column as usize) * BYTES_PER_PIXEL;
        let mut texel = [0; 4];
        texel.copy_from_slice(&self.pixels[start..start + BYTES_PER_PIXEL]);
        Some(texel)
    }

    /// Share of texels with any non-zero color channel.
    ///
    /// Misses are always pure black, so this approximates the fraction of rays
    /// that reached the fractal.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        let total = self.pixels.len() / BYTES_PER_PIXEL;
        if total == 0 {
            return 0.0;
        }
        let lit = self
            .pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|texel| texel[..3].iter().any(|&c| c != 0))
            .count();
        lit as f64 / total as f64
    }
}

/// Quantizes a linear color to RGBA8, clamping each channel to `[0, 1]` first.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let scaled = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [scaled.x as u8, scaled.y as u8, scaled.z as u8, scaled.w as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantization_clamps_and_rounds() {
        assert_eq!(to_rgba8(Vec4::new(0.0, 1.0, 0.5, 1.0)), [0, 255, 128, 255]);
        assert_eq!(to_rgba8(Vec4::new(-3.0, 7.0, 0.001, 1.0)), [0, 255, 0, 255]);
        assert_eq!(to_rgba8(Vec4::new(f32::NAN, 0.2, 0.2, 1.0))[3], 255);
    }

    #[test]
    fn pixel_lookup_is_row_major_from_the_top() {
        let mut frame = Framebuffer::new(3, 2);
        let start = frame.row_bytes() + 2 * BYTES_PER_PIXEL;
        frame.as_bytes_mut()[start..start + 4].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(frame.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(3, 0), None);
    }

    #[test]
    fn coverage_counts_lit_texels() {
        let mut pixels = vec![0, 0, 0, 255, 10, 0, 0, 255, 0, 0, 0, 255, 0, 0, 1, 255];
        let frame = Framebuffer::from_pixels(2, 2, pixels.clone()).unwrap();
        assert!((frame.coverage() - 0.5).abs() < f64::EPSILON);

        pixels.pop();
        assert!(Framebuffer::from_pixels(2, 2, pixels).is_none());
    }
}
