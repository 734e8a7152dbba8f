pub mod audio;
pub mod content;
pub mod events;
pub mod observability;
pub mod persistence;
pub mod speech;
pub mod storage;
