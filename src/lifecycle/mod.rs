//! Process lifecycle: shutdown coordination and signal wiring.

pub mod shutdown;

pub use shutdown::Shutdown;
