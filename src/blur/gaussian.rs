use crate::blur::{BlurAlgorithm, MAX_BLUR_RADIUS};
use crate::foundation::core::DisplayMetrics;
use crate::raster::buffer::{PixelBuffer, byte_len};

/// Separable Gaussian blur with a Q16 fixed-point kernel.
///
/// The kernel is rebuilt only when the prepared radius changes, and the horizontal-pass scratch
/// buffer is kept between frames so steady-state blurring allocates just the output.
#[derive(Debug, Default)]
pub struct GaussianBlur {
    radius: i32,
    prepared: bool,
    kernel: Vec<u32>,
    kernel_radius: i32,
    scratch: Vec<u8>,
}

impl GaussianBlur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Radius after clamping by the last `prepare`.
    pub fn radius(&self) -> i32 {
        self.radius
    }
}

impl BlurAlgorithm for GaussianBlur {
    fn prepare(&mut self, _metrics: &DisplayMetrics, radius: i32) -> bool {
        self.radius = radius.clamp(0, MAX_BLUR_RADIUS);
        self.prepared = false;
        if self.radius == 0 {
            return false;
        }
        if self.kernel_radius != self.radius || self.kernel.is_empty() {
            match gaussian_kernel_q16(self.radius as u32, sigma_for_radius(self.radius)) {
                Some(k) => {
                    self.kernel = k;
                    self.kernel_radius = self.radius;
                }
                None => return false,
            }
        }
        self.prepared = true;
        true
    }

    fn blur(&mut self, input: &PixelBuffer) -> Option<PixelBuffer> {
        if !self.prepared || self.radius <= 0 || self.radius > MAX_BLUR_RADIUS {
            return None;
        }
        let (width, height) = (input.width(), input.height());
        let len = byte_len(width, height)?;

        if self.scratch.len() != len {
            self.scratch.clear();
            if self.scratch.try_reserve_exact(len).is_err() {
                tracing::warn!(width, height, "blur scratch allocation failed");
                return None;
            }
            self.scratch.resize(len, 0);
        }
        let mut out = Vec::new();
        if out.try_reserve_exact(len).is_err() {
            tracing::warn!(width, height, "blur output allocation failed");
            return None;
        }
        out.resize(len, 0);

        horizontal_pass(input.as_bytes(), &mut self.scratch, width, height, &self.kernel);
        vertical_pass(&self.scratch, &mut out, width, height, &self.kernel);
        PixelBuffer::from_rgba8(width, height, out).ok()
    }

    fn release(&mut self) {
        self.prepared = false;
        self.radius = 0;
        self.kernel = Vec::new();
        self.kernel_radius = 0;
        self.scratch = Vec::new();
    }

    fn name(&self) -> &'static str {
        "gaussian"
    }
}

fn sigma_for_radius(radius: i32) -> f32 {
    0.4 * radius as f32 + 0.6
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Option<Vec<u32>> {
    if radius == 0 {
        return Some(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return None;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the center tap so constant images stay constant.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Some(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/blur/gaussian.rs"]
mod tests;
