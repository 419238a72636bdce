#![forbid(unsafe_code)]
#![allow(missing_docs)]

//! Networking: block hand-off to the peer transport.

pub mod broadcast;
