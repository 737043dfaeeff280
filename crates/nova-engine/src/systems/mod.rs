pub mod lighting;
pub mod particles;
