pub mod layout;
pub mod backing_file;
pub mod file_lock;
