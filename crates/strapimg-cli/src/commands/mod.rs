//! Command handlers

pub mod config;
pub mod scan;
pub mod status;
pub mod upload;
