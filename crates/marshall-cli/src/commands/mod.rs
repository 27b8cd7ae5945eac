pub mod gradation;
pub mod init;
pub mod marshall;
