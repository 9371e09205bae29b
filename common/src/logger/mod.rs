pub mod cycle_id;
pub mod init;
pub mod spans;
