pub mod cli;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod pivot;
pub mod storage;
pub mod table;
