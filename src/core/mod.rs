pub mod config;
pub mod log;
pub mod parser;
pub mod pipeline;
pub mod purge;
pub mod report;
pub mod resolver;
pub mod summary;
