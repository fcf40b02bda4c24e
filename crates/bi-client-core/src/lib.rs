//! Stores functionality that should be shared between different clients of the
//! BI reporting backend: session state, data access with list caching and
//! route guarding.
//!
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called. Call
//! [`Client::restore_session`] once at application start, the session reports
//! loading until it resolves.

#![warn(unused_crate_dependencies)]


mod client;
pub mod config;
pub mod guard;
pub mod storage;

pub use client::{Client, SessionState, UiCallBack, DUMMY_ARGUMENT};
