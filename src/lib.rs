// TEMPORARY, see diesel-rs/diesel#1787.
#![allow(proc_macro_derive_resolution_fallback)]

#[macro_use] extern crate diesel;
#[macro_use] extern crate log;

#[cfg(not(debug_assertions))]
#[macro_use]
extern crate diesel_migrations;

pub(crate) use self::config::Config;

#[macro_use] mod macros;

pub mod audit;
pub mod config;
pub mod content;
pub mod db;
pub mod lifecycle;
pub mod models;
pub mod permissions;
pub mod utils;

pub use self::lifecycle::LifecycleEngine;

pub type Result<T, E=failure::Error> = std::result::Result<T, E>;
