//! Skatemap: client-side view synchronization for a skatepark directory.
//!
//! Skatemap keeps three views of one remotely owned park collection consistent:
//! - A searchable, category-filtered, sortable list
//! - A set of map markers, one per park, shown or hidden by a quick filter
//! - Detail and popup projections of single parks
//!
//! The collection is fetched over HTTP, held in memory, and never persisted.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI host (main.rs)                                 │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and actions                       │
//! │  - Filter/sort controller                           │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View (view/)  │   │ Map (map/)    │   │ Fetch (fetch/)│
//! │ - Criteria    │   │ - Surface     │   │ - Coordinator │
//! │ - Derivation  │   │ - Reconcile   │   │ - Messages    │
//! │ - View models │   │ - Popups      │   │ - Dispatch    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage (storage/), Remote (remote/), Domain       │
//! │  - In-memory record store                           │
//! │  - HTTP source and wire format                      │
//! │  - Records, enumerations, errors                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (records, enumerations, errors)
//! - [`fetch`]: Loading state machine and request/response protocol
//! - [`infrastructure`]: Platform paths
//! - [`map`]: Map surface abstraction and marker lifecycle
//! - [`remote`]: Remote source trait, HTTP implementation, wire format
//! - [`storage`]: In-memory record store
//! - [`view`]: Criteria, list derivation, and view models
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```toml
//! base_url = "http://localhost:3000"
//! records_path = "/api/skateparks"
//! create_path = "/api/skateparks/addpark"
//! request_timeout_secs = 10
//! trace_level = "info"
//! excerpt_len = 100
//!
//! [map]
//! center_lat = 40.7608
//! center_lng = -111.8910
//! zoom = 11
//! ```
//!
//! # Example
//!
//! ```rust
//! use skatemap::app::{handle_event, Action, Event};
//! use skatemap::fetch::FetchResponse;
//! use skatemap::map::HeadlessSurface;
//! use skatemap::{initialize, Config};
//!
//! let mut state = initialize(&Config::default(), HeadlessSurface::new());
//! let (_, actions) = handle_event(&mut state, &Event::Refresh)?;
//! for action in actions {
//!     if let Action::PostToRemote(request) = action {
//!         // Execute `request` with `skatemap::fetch::dispatch` and feed the
//!         // response back as `Event::Fetch`.
//!         let _ = request;
//!     }
//! }
//! # Ok::<(), skatemap::SkatemapError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod map;
pub mod remote;
pub mod storage;
pub mod view;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{Result, SkatemapError};

use crate::domain::GeoPoint;
use crate::map::{MapSurface, DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::remote::HttpSource;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Map display settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: DEFAULT_CENTER.0,
            center_lng: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Runtime configuration, usually read from a TOML file.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root URL of the park service.
    pub base_url: String,

    /// Path of the collection endpoint. Default: `/api/skateparks`
    pub records_path: String,

    /// Path of the create endpoint. Default: `/api/skateparks/addpark`
    pub create_path: String,

    /// Per-request timeout enforced by the HTTP client. Default: 10
    pub request_timeout_secs: u64,

    /// Tracing level when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Characters of description shown in list rows and popups. Default: 100
    pub excerpt_len: usize,

    pub map: MapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            records_path: "/api/skateparks".to_string(),
            create_path: "/api/skateparks/addpark".to_string(),
            request_timeout_secs: 10,
            trace_level: None,
            excerpt_len: 100,
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Config`] if the document does not parse, names an
    /// unknown key, or holds an out-of-range value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use skatemap::Config;
    ///
    /// let config = Config::from_toml_str("base_url = \"https://parks.example\"\n[map]\nzoom = 13\n")?;
    /// assert_eq!(config.base_url, "https://parks.example");
    /// assert_eq!(config.map.zoom, 13);
    /// assert_eq!(config.records_path, "/api/skateparks");
    /// # Ok::<(), skatemap::SkatemapError>(())
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SkatemapError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SkatemapError::Io`] if the file cannot be read, otherwise the errors
    /// of [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SkatemapError::Config("base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(SkatemapError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.center().is_none() {
            return Err(SkatemapError::Config(format!(
                "map center ({}, {}) is not a valid coordinate",
                self.map.center_lat, self.map.center_lng
            )));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Initial map center, or `None` if the configured coordinates are invalid.
    #[must_use]
    pub fn center(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.map.center_lat, self.map.center_lng)
    }
}

/// Builds the HTTP remote source described by `config`.
///
/// # Errors
///
/// Returns [`SkatemapError::Config`] if the HTTP client cannot be built.
pub fn remote_source(config: &Config) -> Result<HttpSource> {
    HttpSource::new(
        &config.base_url,
        &config.records_path,
        &config.create_path,
        config.request_timeout(),
    )
}

/// Creates an empty `AppState` drawing markers on `surface`.
///
/// The state starts `Idle`; send [`Event::Refresh`] to load the collection.
pub fn initialize<S: MapSurface>(config: &Config, surface: S) -> AppState<S> {
    tracing::debug!(
        base_url = %config.base_url,
        excerpt_len = config.excerpt_len,
        "initializing skatemap view"
    );
    AppState::new(surface, config.excerpt_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml_str("").expect("parses");
        assert_eq!(config, Config::default());
        assert_eq!(config.map.zoom, 11);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("scan_depth = 4").expect_err("rejected");
        assert!(matches!(err, SkatemapError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_toml_str("request_timeout_secs = 0").expect_err("rejected");
        assert!(matches!(err, SkatemapError::Config(_)));
    }

    #[test]
    fn invalid_center_is_rejected() {
        let err = Config::from_toml_str("[map]\ncenter_lat = 120.0").expect_err("rejected");
        assert!(matches!(err, SkatemapError::Config(_)));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("skatemap.toml");
        std::fs::write(&path, "excerpt_len = 40\ntrace_level = \"debug\"\n").expect("write");

        let config = Config::from_file(&path).expect("loads");
        assert_eq!(config.excerpt_len, 40);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/skatemap.toml")).expect_err("fails");
        assert!(matches!(err, SkatemapError::Io(_)));
    }
}
