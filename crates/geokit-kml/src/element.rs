//! # Element Basics
//!
//! The [`KmlElement`] trait, the parameter map shared by all elements, and
//! the small value types (coordinates, extended data, attachments) that
//! other elements embed.

use std::fmt;
use std::path::{Path, PathBuf};

use geokit_core::RestrictedMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::KmlError;
use crate::formats;
use crate::style::Style;
use crate::template::{render, xml_escape};

/// Named element parameters. The key set is fixed by each element's
/// defaults; overrides with any other key are rejected.
pub type Params = RestrictedMap<String, Value>;

/// Anything that can be written into a KML document.
pub trait KmlElement {
    /// Render this element as KML text.
    fn write(&self) -> Result<String, KmlError>;

    /// Shared styles this element refers to by URL. The document writes
    /// each of them once, ahead of its contents.
    fn styles(&self) -> Vec<&Style> {
        Vec::new()
    }

    /// Files this element refers to, such as an overlay image. They are
    /// stored next to a `.kml` document or inside a `.kmz` archive.
    fn attachments(&self) -> Vec<&Attachment> {
        Vec::new()
    }
}

/// A file shipped with a document and referenced from it by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// An existing file on disk, copied or archived under its file name.
    File(PathBuf),
    /// Content generated in memory, e.g. a rendered colour bar.
    Bytes { name: String, data: Vec<u8> },
}

impl Attachment {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    /// The name the document refers to this attachment by.
    ///
    /// # Errors
    ///
    /// `KmlError::InvalidAttachment` for a file path without a file name.
    pub fn name(&self) -> Result<String, KmlError> {
        match self {
            Self::File(path) => file_name(path),
            Self::Bytes { name, .. } => Ok(name.clone()),
        }
    }

    /// The attachment's content.
    pub fn read(&self) -> Result<Vec<u8>, KmlError> {
        match self {
            Self::File(path) => Ok(std::fs::read(path)?),
            Self::Bytes { data, .. } => Ok(data.clone()),
        }
    }
}

fn file_name(path: &Path) -> Result<String, KmlError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| KmlError::InvalidAttachment(path.display().to_string()))
}

/// Build a parameter map from an element's default values.
pub(crate) fn defaults(pairs: &[(&str, Value)]) -> Params {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Apply caller overrides to `params`, rejecting unknown parameter names.
pub(crate) fn with_overrides<I, S>(mut params: Params, overrides: I) -> Result<Params, KmlError>
where
    I: IntoIterator<Item = (S, Value)>,
    S: Into<String>,
{
    params.update(overrides.into_iter().map(|(key, value)| (key.into(), value)))?;
    Ok(params)
}

/// Snapshot `params` for rendering, XML-escaping the string values of
/// `text_keys`.
pub(crate) fn fields(params: &Params, text_keys: &[&str]) -> IndexMap<String, Value> {
    let mut snapshot = params.to_mapping();
    for key in text_keys {
        if let Some(Value::String(text)) = snapshot.get_mut(*key) {
            *text = xml_escape(text);
        }
    }
    snapshot
}

/// A single position. Altitude is omitted from the output when absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
    pub alt: Option<f64>,
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat, alt: None }
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((lon, lat, alt): (f64, f64, f64)) -> Self {
        Self {
            lon,
            lat,
            alt: Some(alt),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)?;
        if let Some(alt) = self.alt {
            write!(f, ",{alt}")?;
        }
        Ok(())
    }
}

/// An ordered list of positions, written as space-separated
/// `lon,lat[,alt]` tuples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(Vec<Coordinate>);

impl Coordinates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coordinate: impl Into<Coordinate>) {
        self.0.push(coordinate.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.0.iter()
    }
}

impl<C: Into<Coordinate>> FromIterator<C> for Coordinates {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coordinate) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{coordinate}")?;
        }
        Ok(())
    }
}

/// One named value in an element's `<ExtendedData>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub name: String,
    pub value: String,
}

impl DataPoint {
    pub fn new(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

impl KmlElement for DataPoint {
    fn write(&self) -> Result<String, KmlError> {
        let fields = IndexMap::from([
            ("name".to_string(), Value::String(xml_escape(&self.name))),
            ("value".to_string(), Value::String(xml_escape(&self.value))),
        ]);
        render(formats::DATA_FIELD, &fields)
    }
}

/// The `<ExtendedData>` block of an element. Writes nothing when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedData(Vec<DataPoint>);

impl ExtendedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: DataPoint) {
        self.0.push(point);
    }

    /// Add a data field from a name and any displayable value.
    pub fn add(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.push(DataPoint::new(name, value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Extend<DataPoint> for ExtendedData {
    fn extend<I: IntoIterator<Item = DataPoint>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl KmlElement for ExtendedData {
    fn write(&self) -> Result<String, KmlError> {
        if self.0.is_empty() {
            return Ok(String::new());
        }
        let mut out = String::from(formats::DATA_HEADER);
        for point in &self.0 {
            out.push_str(&point.write()?);
        }
        out.push_str(formats::DATA_FOOTER);
        Ok(out)
    }
}
