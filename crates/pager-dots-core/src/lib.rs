//! Core systems for pager-dots.
//!
//! This crate provides the foundational pieces shared by the indicator and
//! render crates:
//!
//! - **Signal/Slot System**: Type-safe, synchronous notification with explicit
//!   connection handles
//! - **Errors**: [`SignalError`] for connection bookkeeping
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use pager_dots_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
