//! Status polling and presentation mapping for the UrBackup client monitor.
//!
//! This crate implements the **business logic** of the monitor. It has no
//! UI dependencies; the app wires [`StatusView`] and [`StatusIcon`] into its
//! window and tray.
//!
//! # Flow
//!
//! - **Poll** — run `<control tool> status` and decode the JSON [`Snapshot`]
//! - **Broadcast** — hand each result to every subscriber of a [`StatusBus`]
//! - **Render** — map `Option<&Snapshot>` to window text and an icon state
//!
//! A missing or unreadable status is always `None`; there is no partial
//! snapshot.

pub mod bus;
pub mod control;
pub mod error;
pub mod icon;
pub mod poller;
pub mod snapshot;
pub mod view;

// Re-export primary types for convenience.
pub use bus::StatusBus;
pub use control::{ControlTool, Platform};
pub use error::PollError;
pub use icon::StatusIcon;
pub use poller::{DEFAULT_POLL_INTERVAL, Poller, decode_status, run_poll_loop};
pub use snapshot::{Action, InternetStatus, RunningProcess, Server, Snapshot};
pub use view::StatusView;
