pub mod ffmpeg_args;
mod ffmpeg_toolkit;
mod fs_ambient_catalog;

pub use ffmpeg_toolkit::FfmpegToolkit;
pub use fs_ambient_catalog::FsAmbientCatalog;
