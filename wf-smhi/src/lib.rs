//! Core types and client for the SMHI Vattenwebb hydrology API.
//!
//! The client fetches raw point and chart payloads; the types describe the
//! chart payload and the processed result published for a station.

pub mod background;
pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod sentinel;
pub mod series;

pub use error::{Result, SmhiError};
