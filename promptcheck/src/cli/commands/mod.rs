// Command implementations

pub mod config;
pub mod demo;
pub mod extract;
