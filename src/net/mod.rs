//! TCP listener plumbing shared by both servers.

pub mod listener;

pub use listener::{Listener, ListenerError};
