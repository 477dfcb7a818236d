pub mod config;
pub mod db;
pub mod init;
pub mod listen;
pub mod log;
pub mod process;
pub mod purge;
pub mod report;
