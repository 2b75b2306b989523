//! Freehand drawing surface with a bounded bitmap undo history.
//!
//! The crate is UI-toolkit agnostic: a host translates its native pointer,
//! touch and toolbar events into the normalized operations of
//! [`DrawingSurface`] (see [`input::SurfaceController`] for a ready-made
//! adapter), repaints the regions reported by
//! [`DrawingSurface::take_damage`], and exports the flattened result with
//! [`DrawingSurface::export_image`].
//!
//! [`lock::OperationLock`] is a small companion gate for hosts that need to
//! block redundant user-triggered work while an async operation is pending.

pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod lock;
pub mod surface;
pub mod util;

pub use config::Config;
pub use draw::{Color, Point};
pub use export::{ExportEncoding, ExportError, ExportFormat, ExportedImage};
pub use history::{HistoryStack, Snapshot};
pub use input::ToolMode;
pub use lock::{LockError, OperationLock};
pub use surface::{ConfirmClear, DrawingSurface};
