/// Precompute a normalized 1D Gaussian kernel.
///
/// `kernel_size` must be odd and >= 1. Sigma is derived as
/// `kernel_size / 6.0` so the kernel's tails fall near zero at its edges.
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = kernel_size as f64 / 6.0;
    let half = (kernel_size / 2) as f64;

    let mut kernel: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|v| *v /= sum);
    kernel.into_iter().map(|v| v as f32).collect()
}

/// Separable Gaussian blur over an interleaved pixel buffer, in place.
///
/// Two passes (horizontal into `scratch`, vertical back into `data`) with
/// clamp-to-edge sampling. `scratch` is resized as needed and reusable
/// across calls to avoid per-region allocation.
pub fn blur_in_place(
    data: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    scratch: &mut Vec<f32>,
) {
    let ksize = kernel.len();
    if ksize <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (ksize / 2) as isize;

    scratch.resize(width * height * channels, 0.0);

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sx = (x as isize + k as isize - half).clamp(0, (width - 1) as isize);
                    acc += data[(y * width + sx as usize) * channels + c] as f32 * w;
                }
                scratch[(y * width + x) * channels + c] = acc;
            }
        }
    }

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, &w) in kernel.iter().enumerate() {
                    let sy = (y as isize + k as isize - half).clamp(0, (height - 1) as isize);
                    acc += scratch[(sy as usize * width + x) * channels + c] * w;
                }
                data[(y * width + x) * channels + c] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Downscale by an integer factor using area averaging. Output dimensions
/// are clamped to at least 1 so a sliver input never collapses to an empty
/// buffer.
pub fn downscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    factor: usize,
) -> (Vec<u8>, usize, usize) {
    let new_w = (width / factor).max(1);
    let new_h = (height / factor).max(1);
    let mut out = vec![0u8; new_w * new_h * channels];

    for y in 0..new_h {
        for x in 0..new_w {
            for c in 0..channels {
                let mut sum = 0u32;
                let mut count = 0u32;
                for dy in 0..factor {
                    for dx in 0..factor {
                        let sy = y * factor + dy;
                        let sx = x * factor + dx;
                        if sy < height && sx < width {
                            sum += data[(sy * width + sx) * channels + c] as u32;
                            count += 1;
                        }
                    }
                }
                out[(y * new_w + x) * channels + c] = (sum / count) as u8;
            }
        }
    }

    (out, new_w, new_h)
}

/// Upscale to a target size using bilinear interpolation.
pub fn upscale(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    target_w: usize,
    target_h: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; target_w * target_h * channels];
    if width == 0 || height == 0 {
        return out;
    }

    for y in 0..target_h {
        for x in 0..target_w {
            let src_x = x as f32 * (width as f32 - 1.0) / (target_w as f32 - 1.0).max(1.0);
            let src_y = y as f32 * (height as f32 - 1.0) / (target_h as f32 - 1.0).max(1.0);

            let x0 = (src_x.floor() as usize).min(width - 1);
            let x1 = (x0 + 1).min(width - 1);
            let y0 = (src_y.floor() as usize).min(height - 1);
            let y1 = (y0 + 1).min(height - 1);

            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            for c in 0..channels {
                let v00 = data[(y0 * width + x0) * channels + c] as f32;
                let v10 = data[(y0 * width + x1) * channels + c] as f32;
                let v01 = data[(y1 * width + x0) * channels + c] as f32;
                let v11 = data[(y1 * width + x1) * channels + c] as f32;

                let val = v00 * (1.0 - fx) * (1.0 - fy)
                    + v10 * fx * (1.0 - fy)
                    + v01 * (1.0 - fx) * fy
                    + v11 * fx * fy;
                out[(y * target_w + x) * channels + c] = val.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}
