//! # Geometry Elements
//!
//! Placemarks carrying a line, a polygon, or a single point, plus the
//! `LookAt` camera used to frame them.

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::element::{
    defaults, fields, with_overrides, Coordinates, DataPoint, ExtendedData, KmlElement, Params,
};
use crate::error::KmlError;
use crate::formats;
use crate::style::{url_tag, IconStyle, Style};
use crate::template::render;

const NO_OVERRIDES: [(&str, Value); 0] = [];

/// Camera position looking at a point.
///
/// Parameters: `lat`, `lon`, `altitude` (0), `heading` (0), `tilt` (0),
/// `range` (25000 m), `altitude_mode` (`relativeToGround`).
#[derive(Debug, Clone, PartialEq)]
pub struct LookAt {
    params: Params,
}

impl LookAt {
    pub fn defaults() -> Params {
        defaults(&[
            ("lon", Value::Null),
            ("lat", Value::Null),
            ("altitude", json!(0)),
            ("heading", json!(0)),
            ("tilt", json!(0)),
            ("range", json!(25000.0)),
            ("altitude_mode", json!("relativeToGround")),
        ])
    }

    pub fn new<I, S>(
        lat: impl Into<Value>,
        lon: impl Into<Value>,
        overrides: I,
    ) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut params = Self::defaults();
        params.update([("lat".to_string(), lat.into()), ("lon".to_string(), lon.into())])?;
        Ok(Self {
            params: with_overrides(params, overrides)?,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for LookAt {
    fn write(&self) -> Result<String, KmlError> {
        render(formats::LOOK_AT, &fields(&self.params, &["altitude_mode"]))
    }
}

/// A path through a list of coordinates.
///
/// Parameters: `name`, `description`, `extrude` (1), `tessellate` (1).
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    params: Params,
    coordinates: Coordinates,
    style: Option<Style>,
}

impl LineString {
    pub fn defaults() -> Params {
        defaults(&[
            ("name", json!("")),
            ("description", json!("")),
            ("extrude", json!(1)),
            ("tessellate", json!(1)),
        ])
    }

    pub fn new<I, S>(coordinates: Coordinates, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Ok(Self {
            params: with_overrides(Self::defaults(), overrides)?,
            coordinates,
            style: None,
        })
    }

    /// Reference `style` from this line. The document writes the style.
    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for LineString {
    fn write(&self) -> Result<String, KmlError> {
        let mut f = fields(&self.params, &["name", "description"]);
        f.insert("style_url".to_string(), Value::String(url_tag(self.style.as_ref())?));
        f.insert("coordinates".to_string(), Value::String(self.coordinates.to_string()));
        render(formats::LINE_STRING, &f)
    }

    fn styles(&self) -> Vec<&Style> {
        self.style.iter().collect()
    }
}

/// A closed area with an optional hole.
///
/// Parameters: `name`, `description`, `altitude_mode`
/// (`relativeToGround`), `tessellate` (1), `extrude` (0).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    params: Params,
    outer: Coordinates,
    inner: Option<Coordinates>,
    style: Option<Style>,
    look_at: Option<LookAt>,
    data: ExtendedData,
}

impl Polygon {
    pub fn defaults() -> Params {
        defaults(&[
            ("name", json!("")),
            ("description", json!("")),
            ("altitude_mode", json!("relativeToGround")),
            ("tessellate", json!(1)),
            ("extrude", json!(0)),
        ])
    }

    pub fn new<I, S>(outer: Coordinates, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Ok(Self {
            params: with_overrides(Self::defaults(), overrides)?,
            outer,
            inner: None,
            style: None,
            look_at: None,
            data: ExtendedData::new(),
        })
    }

    pub fn with_inner_boundary(mut self, inner: Coordinates) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_look_at(mut self, look_at: LookAt) -> Self {
        self.look_at = Some(look_at);
        self
    }

    pub fn add_data(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    pub fn data(&self) -> &ExtendedData {
        &self.data
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

fn boundary(template: &str, coordinates: &Coordinates) -> Result<String, KmlError> {
    let f = IndexMap::from([(
        "coordinates".to_string(),
        Value::String(coordinates.to_string()),
    )]);
    render(template, &f)
}

impl KmlElement for Polygon {
    fn write(&self) -> Result<String, KmlError> {
        let inner = match &self.inner {
            Some(inner) => boundary(formats::INNER_BOUNDARY, inner)?,
            None => String::new(),
        };
        let look_at = match &self.look_at {
            Some(look_at) => look_at.write()?,
            None => String::new(),
        };

        let mut f = fields(&self.params, &["name", "description", "altitude_mode"]);
        f.insert("style_url".to_string(), Value::String(url_tag(self.style.as_ref())?));
        f.insert("look_at".to_string(), Value::String(look_at));
        f.insert("data".to_string(), Value::String(self.data.write()?));
        f.insert(
            "outer_boundary".to_string(),
            Value::String(boundary(formats::OUTER_BOUNDARY, &self.outer)?),
        );
        f.insert("inner_boundary".to_string(), Value::String(inner));
        render(formats::POLYGON, &f)
    }

    fn styles(&self) -> Vec<&Style> {
        self.style.iter().collect()
    }
}

/// A pinned point.
///
/// Parameters: `name` (`Placemark`), `lat`, `lon`, `altitude` (0). Uses
/// the yellow pushpin icon unless another style is given, and frames itself
/// with a default `LookAt` unless one is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    params: Params,
    style: Style,
    look_at: Option<LookAt>,
}

impl Placemark {
    pub fn defaults() -> Params {
        defaults(&[
            ("name", json!("Placemark")),
            ("lat", Value::Null),
            ("lon", Value::Null),
            ("altitude", json!(0)),
        ])
    }

    pub fn new<I, S>(name: &str, lat: f64, lon: f64, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut params = Self::defaults();
        params.update([
            ("name".to_string(), json!(name)),
            ("lat".to_string(), json!(lat)),
            ("lon".to_string(), json!(lon)),
        ])?;
        Ok(Self {
            params: with_overrides(params, overrides)?,
            style: IconStyle::yellow_pushpin().into(),
            look_at: None,
        })
    }

    pub fn with_style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_look_at(mut self, look_at: LookAt) -> Self {
        self.look_at = Some(look_at);
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for Placemark {
    fn write(&self) -> Result<String, KmlError> {
        let look_at = match &self.look_at {
            Some(look_at) => look_at.write()?,
            None => {
                let lat = self.params.get("lat")?.clone();
                let lon = self.params.get("lon")?.clone();
                LookAt::new(lat, lon, NO_OVERRIDES)?.write()?
            }
        };

        let mut f = fields(&self.params, &["name"]);
        f.insert("look_at".to_string(), Value::String(look_at));
        f.insert("style_url".to_string(), Value::String(self.style.url_tag()?));
        render(formats::POINT_PLACEMARK, &f)
    }

    fn styles(&self) -> Vec<&Style> {
        vec![&self.style]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{LineStyle, PolyStyle};

    fn square() -> Coordinates {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_look_at_defaults() {
        let kml = LookAt::new(40.0, -105.0, NO_OVERRIDES).unwrap().write().unwrap();
        assert!(kml.contains("<longitude>-105.0</longitude>"));
        assert!(kml.contains("<latitude>40.0</latitude>"));
        assert!(kml.contains("<range>25000.0</range>"));
        assert!(kml.contains("<altitudeMode>relativeToGround</altitudeMode>"));
    }

    #[test]
    fn test_look_at_overrides() {
        let look = LookAt::new(1.0, 2.0, [("tilt", json!(45)), ("range", json!(1000))]).unwrap();
        let kml = look.write().unwrap();
        assert!(kml.contains("<tilt>45</tilt>"));
        assert!(kml.contains("<range>1000</range>"));
    }

    #[test]
    fn test_line_string_without_style() {
        let line = LineString::new(square(), [("name", json!("Track & Trace"))]).unwrap();
        let kml = line.write().unwrap();
        assert!(kml.contains("<name>Track &amp; Trace</name>"));
        assert!(!kml.contains("<styleUrl>"));
        assert!(kml.contains("<coordinates>0,0 1,0 1,1 0,1 0,0</coordinates>"));
        assert!(line.styles().is_empty());
    }

    #[test]
    fn test_line_string_with_style() {
        let style = LineStyle::new([("id", json!("GroundTrack"))]).unwrap();
        let line = LineString::new(square(), NO_OVERRIDES).unwrap().with_style(style);
        let kml = line.write().unwrap();
        assert!(kml.contains("<styleUrl>#GroundTrack</styleUrl>"));
        assert_eq!(line.styles().len(), 1);
        assert_eq!(line.styles()[0].id(), "GroundTrack");
    }

    #[test]
    fn test_line_string_rejects_unknown_parameter() {
        let err = LineString::new(square(), [("tesselate", json!(0))]).unwrap_err();
        assert!(matches!(err, KmlError::Namespace(_)));
    }

    #[test]
    fn test_polygon_outer_only() {
        let poly = Polygon::new(square(), [("name", json!("Plant"))]).unwrap();
        let kml = poly.write().unwrap();
        assert!(kml.contains("<outerBoundaryIs>"));
        assert!(!kml.contains("<innerBoundaryIs>"));
        assert!(!kml.contains("<ExtendedData>"));
        assert!(!kml.contains("<LookAt>"));
        assert!(kml.contains("<extrude>0</extrude>"));
    }

    #[test]
    fn test_polygon_full() {
        let hole: Coordinates = vec![(0.25, 0.25), (0.75, 0.25), (0.5, 0.75), (0.25, 0.25)]
            .into_iter()
            .collect();
        let mut poly = Polygon::new(square(), NO_OVERRIDES)
            .unwrap()
            .with_inner_boundary(hole)
            .with_style(PolyStyle::new("zone", NO_OVERRIDES).unwrap())
            .with_look_at(LookAt::new(0.5, 0.5, NO_OVERRIDES).unwrap());
        poly.add_data(DataPoint::new("emissions", 12.5));

        let kml = poly.write().unwrap();
        assert!(kml.contains("<innerBoundaryIs>"));
        assert!(kml.contains("<styleUrl>#zone</styleUrl>"));
        assert!(kml.contains("<LookAt>"));
        assert!(kml.contains(r#"<Data name="emissions">"#));
        assert_eq!(poly.data().len(), 1);
    }

    #[test]
    fn test_placemark_default_style_and_look_at() {
        let mark = Placemark::new("Stack", 40.5, -104.25, NO_OVERRIDES).unwrap();
        let kml = mark.write().unwrap();
        assert!(kml.contains("<name>Stack</name>"));
        assert!(kml.contains("<styleUrl>#yellow-pushpin</styleUrl>"));
        assert!(kml.contains("<coordinates>-104.25,40.5,0</coordinates>"));
        assert!(kml.contains("<latitude>40.5</latitude>"));
        assert_eq!(mark.styles()[0].id(), "yellow-pushpin");
    }

    #[test]
    fn test_placemark_explicit_look_at() {
        let look = LookAt::new(0.0, 0.0, [("tilt", json!(60))]).unwrap();
        let mark = Placemark::new("Origin", 0.0, 0.0, [("altitude", json!(10))])
            .unwrap()
            .with_look_at(look);
        let kml = mark.write().unwrap();
        assert!(kml.contains("<tilt>60</tilt>"));
        assert!(kml.contains("<coordinates>0.0,0.0,10</coordinates>"));
    }
}
