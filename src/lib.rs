//! Catpoint alarm controller library.
//!
//! Exposes the alarm rules, the [`SecurityService`](app::service::SecurityService)
//! that applies them, and host adapters for storage, camera labels and
//! logging. Everything outside [`alarm`] and [`app`] is replaceable through
//! the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod error;
pub mod image;
pub mod sensors;

pub use error::{Error, Result};
