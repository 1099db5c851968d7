use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_writer::VideoWriter;

/// Encodes RGB frames to a video file via ffmpeg-next.
///
/// Uses the widely compatible MPEG4 encoder with YUV420P output; the
/// destination container is inferred from the output path's extension.
pub struct FfmpegWriter {
    octx: Option<ffmpeg_next::format::context::Output>,
    encoder: Option<ffmpeg_next::codec::encoder::video::Encoder>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    width: u32,
    height: u32,
    fps: f64,
    frame_count: usize,
    video_stream_index: usize,
}

// Safety: FfmpegWriter is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegWriter {}

impl FfmpegWriter {
    pub fn new() -> Self {
        Self {
            octx: None,
            encoder: None,
            scaler: None,
            width: 0,
            height: 0,
            fps: 0.0,
            frame_count: 0,
            video_stream_index: 0,
        }
    }

    fn fps_int(&self) -> i32 {
        let fps_i = self.fps.round() as i32;
        if fps_i <= 0 {
            30
        } else {
            fps_i
        }
    }
}

impl Default for FfmpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoWriter for FfmpegWriter {
    fn open(
        &mut self,
        path: &Path,
        metadata: &VideoMetadata,
    ) -> Result<(), Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        self.width = metadata.width;
        self.height = metadata.height;
        self.fps = metadata.fps;

        let mut octx = ffmpeg_next::format::output(path)?;

        let global_header = octx
            .format()
            .flags()
            .contains(ffmpeg_next::format::Flags::GLOBAL_HEADER);

        let codec = ffmpeg_next::encoder::find(ffmpeg_next::codec::Id::MPEG4)
            .ok_or("MPEG4 encoder not found")?;

        let mut ost = octx.add_stream(Some(codec))?;

        let mut encoder_ctx = ffmpeg_next::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()?;

        encoder_ctx.set_width(metadata.width);
        encoder_ctx.set_height(metadata.height);
        encoder_ctx.set_format(ffmpeg_next::format::Pixel::YUV420P);

        let fps_i = self.fps_int();
        encoder_ctx.set_time_base(ffmpeg_next::Rational(1, fps_i));
        encoder_ctx.set_frame_rate(Some(ffmpeg_next::Rational(fps_i, 1)));

        if global_header {
            encoder_ctx.set_flags(ffmpeg_next::codec::Flags::GLOBAL_HEADER);
        }

        let encoder = encoder_ctx.open_with(ffmpeg_next::Dictionary::new())?;
        ost.set_parameters(&encoder);

        self.video_stream_index = 0; // first stream

        octx.write_header()?;

        let scaler = ffmpeg_next::software::scaling::Context::get(
            ffmpeg_next::format::Pixel::RGB24,
            metadata.width,
            metadata.height,
            ffmpeg_next::format::Pixel::YUV420P,
            metadata.width,
            metadata.height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        self.octx = Some(octx);
        self.encoder = Some(encoder);
        self.scaler = Some(scaler);
        self.frame_count = 0;

        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let encoder = self.encoder.as_mut().ok_or("FfmpegWriter: not opened")?;
        let scaler = self.scaler.as_mut().ok_or("FfmpegWriter: not opened")?;
        let octx = self.octx.as_mut().ok_or("FfmpegWriter: not opened")?;

        let mut rgb_frame = ffmpeg_next::util::frame::video::Video::new(
            ffmpeg_next::format::Pixel::RGB24,
            self.width,
            self.height,
        );

        // Copy pixel data, respecting the destination stride
        let stride = rgb_frame.stride(0);
        let data = rgb_frame.data_mut(0);
        let src = frame.data();
        let row_bytes = self.width as usize * 3;
        for row in 0..self.height as usize {
            let src_start = row * row_bytes;
            let dst_start = row * stride;
            data[dst_start..dst_start + row_bytes]
                .copy_from_slice(&src[src_start..src_start + row_bytes]);
        }

        let mut yuv_frame = ffmpeg_next::util::frame::video::Video::empty();
        scaler.run(&rgb_frame, &mut yuv_frame)?;
        yuv_frame.set_pts(Some(self.frame_count as i64));

        encoder.send_frame(&yuv_frame)?;

        let fps_i = self.fps.round() as i32;
        let fps_i = if fps_i <= 0 { 30 } else { fps_i };
        let ost_time_base = octx
            .stream(self.video_stream_index)
            .ok_or("FfmpegWriter: missing output stream")?
            .time_base();

        let mut encoded = ffmpeg_next::Packet::empty();
        while encoder.receive_packet(&mut encoded).is_ok() {
            encoded.set_stream(self.video_stream_index);
            encoded.rescale_ts(ffmpeg_next::Rational(1, fps_i), ost_time_base);
            encoded.write_interleaved(octx)?;
        }

        self.frame_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let (Some(encoder), Some(octx)) = (self.encoder.as_mut(), self.octx.as_mut()) {
            let fps_i = self.fps.round() as i32;
            let fps_i = if fps_i <= 0 { 30 } else { fps_i };
            let ost_time_base = octx
                .stream(self.video_stream_index)
                .ok_or("FfmpegWriter: missing output stream")?
                .time_base();

            encoder.send_eof()?;
            let mut encoded = ffmpeg_next::Packet::empty();
            while encoder.receive_packet(&mut encoded).is_ok() {
                encoded.set_stream(self.video_stream_index);
                encoded.rescale_ts(ffmpeg_next::Rational(1, fps_i), ost_time_base);
                encoded.write_interleaved(octx)?;
            }

            octx.write_trailer()?;
        }

        self.octx = None;
        self.encoder = None;
        self.scaler = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::domain::video_reader::VideoReader;
    use crate::video::infrastructure::ffmpeg_reader::FfmpegReader;

    fn metadata(w: u32, h: u32, fps: f64) -> VideoMetadata {
        VideoMetadata {
            width: w,
            height: h,
            fps,
            total_frames: 0,
            codec: String::new(),
            source_path: None,
        }
    }

    fn solid_frame(index: usize, w: u32, h: u32, value: u8) -> Frame {
        Frame::new(vec![value; (w * h * 3) as usize], w, h, 3, index)
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut writer = FfmpegWriter::new();
        writer.open(&path, &metadata(160, 120, 30.0)).unwrap();
        for i in 0..3 {
            writer.write(&solid_frame(i, 160, 120, 128)).unwrap();
        }
        writer.close().unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_written_video_has_correct_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut writer = FfmpegWriter::new();
        writer.open(&path, &metadata(160, 120, 30.0)).unwrap();
        writer.write(&solid_frame(0, 160, 120, 128)).unwrap();
        writer.close().unwrap();

        let mut reader = FfmpegReader::new();
        let meta = reader.open(&path).unwrap();
        assert_eq!(meta.width, 160);
        assert_eq!(meta.height, 120);
    }

    #[test]
    fn test_write_without_open_returns_error() {
        let mut writer = FfmpegWriter::new();
        assert!(writer.write(&solid_frame(0, 160, 120, 128)).is_err());
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");

        let mut writer = FfmpegWriter::new();
        writer.open(&path, &metadata(160, 120, 30.0)).unwrap();
        writer.write(&solid_frame(0, 160, 120, 128)).unwrap();
        writer.close().unwrap();
        // Second close must not panic
        writer.close().unwrap();
    }

    #[test]
    fn test_roundtrip_preserves_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.mp4");

        let mut writer = FfmpegWriter::new();
        writer.open(&path, &metadata(160, 120, 30.0)).unwrap();
        for i in 0..3 {
            writer.write(&solid_frame(i, 160, 120, 128)).unwrap();
        }
        writer.close().unwrap();

        let mut reader = FfmpegReader::new();
        reader.open(&path).unwrap();
        let frames: Vec<_> = reader.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 3);

        // Codec is lossy, but overall brightness should survive
        let first = &frames[0];
        let avg: f64 =
            first.data().iter().map(|&b| b as f64).sum::<f64>() / first.data().len() as f64;
        assert!(
            (avg - 128.0).abs() < 40.0,
            "average pixel value {avg} should be close to 128"
        );
    }
}
