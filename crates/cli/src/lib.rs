//! # fundme-cli
//!
//! Command line interface: `fundme deploy`, `fundme fund` and `fundme withdraw`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod cmd;
pub mod handler;
pub mod opts;
pub mod utils;
