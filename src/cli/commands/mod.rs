pub mod add;
pub mod config;
pub mod db;
pub mod dispose;
pub mod init;
pub mod list;
pub mod pending;
pub mod predict;
