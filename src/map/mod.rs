//! Map layer: marker styles, popups, the surface abstraction, and marker lifecycle.
//!
//! # Modules
//!
//! - [`markers`]: Reconcile-by-identifier marker manager
//! - [`popup`]: Popup content captured from a record
//! - [`style`]: Difficulty-keyed marker icons
//! - [`surface`]: [`MapSurface`] trait and the in-memory [`HeadlessSurface`]

pub mod markers;
pub mod popup;
pub mod style;
pub mod surface;

pub use markers::{MarkerLifecycleManager, ReconcileStats};
pub use popup::InfoPopup;
pub use style::MarkerStyle;
pub use surface::{ClickHandler, HeadlessMarker, HeadlessSurface, MapSurface, MarkerHandle};

/// Default map center (Salt Lake City).
pub const DEFAULT_CENTER: (f64, f64) = (40.7608, -111.8910);

pub const DEFAULT_ZOOM: u8 = 11;
