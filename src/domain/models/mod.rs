pub mod compression;
pub mod file;
