//! Pointkeeper - point tracking with weekly and daily history.
//!
//! Users log signed points against categories and cash them out as
//! rewards. Every total is derived from the raw rows on request; no
//! running balance is ever stored.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
