//! Command handlers

pub mod config;
pub mod links;
pub mod status;
pub mod tools;
