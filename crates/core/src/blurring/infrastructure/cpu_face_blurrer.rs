use std::cell::RefCell;

use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::constants::DEFAULT_BLUR_KERNEL;
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

use super::gaussian;

/// ROI side length (in pixels) above which the blur runs on a downscaled
/// copy of the region and is scaled back up. The result is visually
/// identical for kernels this wide and an order of magnitude cheaper.
const DOWNSCALE_ROI_THRESHOLD: usize = 160;

/// CPU Gaussian blurrer for rectangular face regions.
///
/// The effective kernel grows with the region so that a face filling half
/// the frame is smoothed as thoroughly as a small one: features must not
/// be recoverable at any face size.
pub struct CpuFaceBlurrer {
    base_kernel_size: usize,
    roi_buf: RefCell<Vec<u8>>,
    scratch: RefCell<Vec<f32>>,
}

impl CpuFaceBlurrer {
    /// `kernel_size` must be a positive odd integer.
    pub fn new(kernel_size: usize) -> Self {
        debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
        Self {
            base_kernel_size: kernel_size,
            roi_buf: RefCell::new(Vec::new()),
            scratch: RefCell::new(Vec::new()),
        }
    }

    /// Kernel size for one region: the configured base, widened for large
    /// faces so the smoothing stays proportional to the region.
    fn kernel_size_for(&self, rw: usize, rh: usize) -> usize {
        let proportional = rw.max(rh) / 2;
        self.base_kernel_size.max(proportional | 1)
    }
}

impl Default for CpuFaceBlurrer {
    fn default() -> Self {
        Self::new(DEFAULT_BLUR_KERNEL)
    }
}

impl FrameBlurrer for CpuFaceBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[FaceRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let fw = frame.width() as usize;
        let channels = frame.channels() as usize;
        let data = frame.data_mut();

        for r in regions {
            let rx = r.x.max(0) as usize;
            let ry = r.y.max(0) as usize;
            let rw = r.width.max(0) as usize;
            let rh = r.height.max(0) as usize;

            if rw == 0 || rh == 0 {
                continue;
            }

            // Extract the ROI into a reusable buffer
            let mut roi = self.roi_buf.borrow_mut();
            let roi_size = rw * rh * channels;
            roi.resize(roi_size, 0);
            for row in 0..rh {
                let src = ((ry + row) * fw + rx) * channels;
                let dst = row * rw * channels;
                roi[dst..dst + rw * channels].copy_from_slice(&data[src..src + rw * channels]);
            }

            let ksize = self.kernel_size_for(rw, rh);
            let mut scratch = self.scratch.borrow_mut();

            if rw.max(rh) > DOWNSCALE_ROI_THRESHOLD {
                // Blur a quarter-scale copy with a quarter-width kernel,
                // then interpolate back up.
                let factor = 4;
                let small_k = (ksize / factor).max(3) | 1;
                let kernel = gaussian::gaussian_kernel_1d(small_k);
                let (mut small, sw, sh) = gaussian::downscale(&roi, rw, rh, channels, factor);
                gaussian::blur_in_place(&mut small, sw, sh, channels, &kernel, &mut scratch);
                let upscaled = gaussian::upscale(&small, sw, sh, channels, rw, rh);
                roi[..roi_size].copy_from_slice(&upscaled);
            } else {
                let kernel = gaussian::gaussian_kernel_1d(ksize);
                gaussian::blur_in_place(&mut roi, rw, rh, channels, &kernel, &mut scratch);
            }

            // Write the blurred ROI back
            for row in 0..rh {
                let dst = ((ry + row) * fw + rx) * channels;
                let src = row * rw * channels;
                data[dst..dst + rw * channels].copy_from_slice(&roi[src..src + rw * channels]);
            }
        }

        Ok(())
    }
}
