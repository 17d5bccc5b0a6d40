//! Target status and observation request widget for a TOM (target and
//! observation manager) instance.

pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod utils;
pub mod view;
