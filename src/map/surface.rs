//! Map surface abstraction.
//!
//! This module defines the [`MapSurface`] trait the marker manager draws through, so
//! the engine never reaches for an ambient map instance. A host binds it to its real
//! map widget; [`HeadlessSurface`] keeps markers in memory for the CLI and for tests.

use super::popup::InfoPopup;
use super::style::MarkerStyle;
use crate::domain::GeoPoint;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to a marker living on a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Wraps a surface-specific marker identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback invoked when a marker is clicked; yields the popup to open.
pub type ClickHandler = Box<dyn Fn() -> InfoPopup + Send + Sync>;

/// Rendering surface that owns the actual marker resources.
///
/// Every marker created through a surface must eventually be passed to
/// [`MapSurface::destroy_marker`]; the marker manager guarantees this on
/// reconciliation and on teardown.
pub trait MapSurface {
    /// Places a new, visible marker and returns its handle.
    fn create_marker(&mut self, position: GeoPoint, title: &str, style: MarkerStyle) -> MarkerHandle;

    /// Removes a marker and releases everything attached to it.
    fn destroy_marker(&mut self, handle: MarkerHandle);

    fn set_visible(&mut self, handle: MarkerHandle, visible: bool);

    /// Registers the callback run when the marker is clicked.
    fn attach_click_handler(&mut self, handle: MarkerHandle, on_click: ClickHandler);
}

/// A marker held by [`HeadlessSurface`].
pub struct HeadlessMarker {
    pub position: GeoPoint,
    pub title: String,
    pub style: MarkerStyle,
    pub visible: bool,
    on_click: Option<ClickHandler>,
}

impl fmt::Debug for HeadlessMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessMarker")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("style", &self.style)
            .field("visible", &self.visible)
            .field("has_click_handler", &self.on_click.is_some())
            .finish()
    }
}

/// In-memory map surface with no rendering.
///
/// Counts every create and destroy so callers can check that markers are neither
/// leaked nor recreated needlessly.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    markers: BTreeMap<MarkerHandle, HeadlessMarker>,
    next_id: u64,
    created: usize,
    destroyed: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn marker(&self, handle: MarkerHandle) -> Option<&HeadlessMarker> {
        self.markers.get(&handle)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.markers.values().filter(|m| m.visible).count()
    }

    /// Total markers ever created on this surface.
    #[must_use]
    pub const fn created_total(&self) -> usize {
        self.created
    }

    /// Total markers ever destroyed on this surface.
    #[must_use]
    pub const fn destroyed_total(&self) -> usize {
        self.destroyed
    }

    /// Simulates a click, returning the popup the marker's handler produces.
    #[must_use]
    pub fn click(&self, handle: MarkerHandle) -> Option<InfoPopup> {
        self.markers
            .get(&handle)
            .and_then(|marker| marker.on_click.as_ref())
            .map(|on_click| on_click())
    }
}

impl MapSurface for HeadlessSurface {
    fn create_marker(&mut self, position: GeoPoint, title: &str, style: MarkerStyle) -> MarkerHandle {
        self.next_id += 1;
        let handle = MarkerHandle::new(self.next_id);
        self.markers.insert(
            handle,
            HeadlessMarker {
                position,
                title: title.to_string(),
                style,
                visible: true,
                on_click: None,
            },
        );
        self.created += 1;
        tracing::trace!(handle = handle.raw(), title = %title, ?style, "headless marker created");
        handle
    }

    fn destroy_marker(&mut self, handle: MarkerHandle) {
        if self.markers.remove(&handle).is_some() {
            self.destroyed += 1;
            tracing::trace!(handle = handle.raw(), "headless marker destroyed");
        } else {
            tracing::warn!(handle = handle.raw(), "destroy requested for unknown marker");
        }
    }

    fn set_visible(&mut self, handle: MarkerHandle, visible: bool) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.visible = visible;
        }
    }

    fn attach_click_handler(&mut self, handle: MarkerHandle, on_click: ClickHandler) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.on_click = Some(on_click);
        }
    }
}
