use crate::shared::region::FaceRegion;

/// A single decoded frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; everything above the
/// reader/writer treats pixel data as an opaque byte grid.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Copies the pixels under `region` into a new frame.
    ///
    /// The region must already be clamped to this frame's bounds; callers
    /// go through [`FaceRegion::clamp`] first. The crop keeps the source
    /// frame's index so diagnostics can name the originating frame.
    pub fn crop(&self, region: &FaceRegion) -> Frame {
        let fw = self.width as usize;
        let ch = self.channels as usize;
        let rx = region.x as usize;
        let ry = region.y as usize;
        let rw = region.width as usize;
        let rh = region.height as usize;

        let mut out = Vec::with_capacity(rw * rh * ch);
        for row in 0..rh {
            let start = ((ry + row) * fw + rx) * ch;
            out.extend_from_slice(&self.data[start..start + rw * ch]);
        }
        Frame::new(out, rw as u32, rh as u32, self.channels, self.index)
    }
}
