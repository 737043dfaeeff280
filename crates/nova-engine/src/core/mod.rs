pub mod clock;
pub mod error;
pub mod init;
pub mod rng;
