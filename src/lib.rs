//! Pitamagotchi library.
//!
//! A virtual pet for a Raspberry Pi with a three-button HAT, plus a
//! keyboard/terminal simulation of the same device. The pet rules and
//! the session loop are pure logic driven through port traits; the
//! adapters under [`adapters`] bind them to GPIO, stdin, stdout and the
//! system clock.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pet;

pub use error::{Error, InitError, Result};
