pub mod pixmap;
pub mod surface;
