//! The Wayland-facing core of the winway proxy.
//!
//! This crate terminates the Wayland wire protocol on a local listening socket,
//! impersonating a full compositor just far enough to carry a client from
//! `wl_display.get_registry` through a shared-memory surface commit, then hands the
//! committed pixels and incoming input events across the [`host`] boundary to whatever
//! presentation surface `winway-proxy` has wired up.
//!
//! Everything below the [`server::run`] entry point is private; the event loop, object
//! tables, and interface handlers are all internal plumbing not meant to be driven piece
//! by piece from outside this crate.

mod acceptor;
mod buffer;
pub mod config;
mod connection;
mod dispatch;
mod error;
mod fixed;
mod focus;
mod frame;
mod handlers;
pub mod host;
mod input;
mod interface;
mod object;
mod poll;
mod pool;
mod server;
mod surface;
#[cfg(test)]
mod test_framework;
mod time;
mod wire;

pub use error::{HostError, PoolError};
pub use server::run;
