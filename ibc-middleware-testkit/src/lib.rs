//! Test doubles for packet middleware stacks: an in-memory host context, a
//! channel keeper and a transfer application that record every call they
//! receive, plus fixtures for building packets and accounts.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod context;
pub mod fixtures;
pub mod testapp;
