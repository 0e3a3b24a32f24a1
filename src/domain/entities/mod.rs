//! Core domain entities.
//!
//! Entities are plain data structures. Creation uses a separate struct
//! ([`NewLink`]) from the stored record ([`Link`]).

pub mod link;

pub use link::{Link, NewLink};
