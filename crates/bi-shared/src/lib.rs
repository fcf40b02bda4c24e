//! Code shared between the dashboard clients and the backend's wire format

#![warn(unused_crate_dependencies)]

pub mod branch;
pub mod const_config;
pub mod department;
pub mod errors;
pub mod id;
pub mod report;
pub mod req_args;
pub mod time;
pub mod token;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
