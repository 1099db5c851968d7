pub mod background_job;
pub mod control;
pub mod frame_transformer;
pub mod job;
pub mod process_video_use_case;
