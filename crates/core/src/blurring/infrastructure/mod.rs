pub mod cpu_face_blurrer;
pub mod gaussian;
