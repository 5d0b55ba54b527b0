pub mod directory;
pub mod notify;
pub mod storage;
