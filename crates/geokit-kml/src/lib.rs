//! # geokit-kml — KML Document Generation
//!
//! Builds KML files for Google Earth from typed elements. Every element
//! keeps its parameters in a [`geokit_core::RestrictedMap`] seeded with the
//! element's defaults, so a misspelled parameter is rejected at
//! construction instead of silently producing an unused field.
//!
//! ## Layers
//!
//! - [`formats`] — the raw KML string templates with `{field}` slots.
//! - [`template`] — the renderer that fills those slots from a parameter
//!   snapshot, plus XML escaping.
//! - [`element`], [`style`], [`geometry`], [`overlay`] — typed elements
//!   implementing [`KmlElement`].
//! - [`document`] — folders and the top-level [`KmlDocument`].
//!
//! `KmlDocument::write` produces a plain `.kml` file with its attachments
//! copied beside it, or a `.kmz` archive holding both.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod element;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod overlay;
pub mod style;
pub mod template;

pub use document::{Folder, KmlDocument};
pub use element::{
    Attachment, Coordinate, Coordinates, DataPoint, ExtendedData, KmlElement, Params,
};
pub use error::KmlError;
pub use geometry::{LineString, LookAt, Placemark, Polygon};
pub use overlay::{GroundOverlay, LatLonBox, ScreenOverlay};
pub use style::{IconStyle, LineStyle, PolyStyle, Style};
pub use template::{render, xml_escape};
