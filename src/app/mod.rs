//! Application core: alarm orchestration, zero I/O.
//!
//! This module contains the business rules wiring for the controller:
//! how arming, sensor edges and camera frames reach the rule set and how
//! the outcome is persisted and announced. All interaction with storage,
//! cameras and panels happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real devices.

pub mod commands;
pub mod listeners;
pub mod ports;
pub mod report;
pub mod service;
pub mod shared;
