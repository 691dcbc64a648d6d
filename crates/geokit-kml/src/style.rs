//! # Shared Styles
//!
//! Line, polygon, and icon styles. A style is written once at the top of
//! the document and referenced from elements by `#id`.

use serde_json::{json, Value};

use crate::element::{defaults, fields, with_overrides, KmlElement, Params};
use crate::error::KmlError;
use crate::formats;
use crate::template::{render, value_text, xml_escape};

/// Icon used by placemarks that do not bring their own style.
pub const YELLOW_PUSHPIN: &str = "http://maps.google.com/mapfiles/kml/pushpin/ylw-pushpin.png";

fn style_id(params: &Params) -> String {
    params
        .get("id")
        .map(|id| value_text(id).into_owned())
        .unwrap_or_default()
}

/// Colour and width for lines.
///
/// Parameters: `id` (`StyleID`), `colour` (`ffffffff`, aabbggrr), `width` (2).
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    params: Params,
}

impl LineStyle {
    pub fn defaults() -> Params {
        defaults(&[
            ("id", json!("StyleID")),
            ("colour", json!("ffffffff")),
            ("width", json!(2)),
        ])
    }

    /// Create a line style from the defaults plus `overrides`.
    pub fn new<I, S>(overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Ok(Self {
            params: with_overrides(Self::defaults(), overrides)?,
        })
    }

    pub fn id(&self) -> String {
        style_id(&self.params)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for LineStyle {
    fn write(&self) -> Result<String, KmlError> {
        render(formats::LINE_STYLE, &fields(&self.params, &["id", "colour"]))
    }
}

/// Fill and outline for polygons.
///
/// Parameters: `id`, `fill_colour` and `line_colour` (`ffa9a9a9`),
/// `line_width` (1).
#[derive(Debug, Clone, PartialEq)]
pub struct PolyStyle {
    params: Params,
}

impl PolyStyle {
    pub fn defaults() -> Params {
        Self::seeded("")
    }

    fn seeded(id: &str) -> Params {
        defaults(&[
            ("id", json!(id)),
            ("fill_colour", json!("ffa9a9a9")),
            ("line_colour", json!("ffa9a9a9")),
            ("line_width", json!(1)),
        ])
    }

    pub fn new<I, S>(id: &str, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Ok(Self {
            params: with_overrides(Self::seeded(id), overrides)?,
        })
    }

    pub fn id(&self) -> String {
        style_id(&self.params)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for PolyStyle {
    fn write(&self) -> Result<String, KmlError> {
        render(
            formats::POLY_STYLE,
            &fields(&self.params, &["id", "fill_colour", "line_colour"]),
        )
    }
}

/// Icon and hot spot for point placemarks.
///
/// Parameters: `id`, `scale` (1.3), `x`/`y` (20/2), `xunits`/`yunits`
/// (`pixels`), `icon` (yellow pushpin).
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    params: Params,
}

impl IconStyle {
    pub fn defaults() -> Params {
        Self::seeded("")
    }

    fn seeded(id: &str) -> Params {
        defaults(&[
            ("id", json!(id)),
            ("scale", json!(1.3)),
            ("x", json!(20)),
            ("y", json!(2)),
            ("xunits", json!("pixels")),
            ("yunits", json!("pixels")),
            ("icon", json!(YELLOW_PUSHPIN)),
        ])
    }

    pub fn new<I, S>(id: &str, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Ok(Self {
            params: with_overrides(Self::seeded(id), overrides)?,
        })
    }

    /// The yellow pushpin style placemarks fall back to.
    pub fn yellow_pushpin() -> Self {
        Self {
            params: Self::seeded("yellow-pushpin"),
        }
    }

    pub fn id(&self) -> String {
        style_id(&self.params)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for IconStyle {
    fn write(&self) -> Result<String, KmlError> {
        render(
            formats::ICON_STYLE,
            &fields(&self.params, &["id", "icon", "xunits", "yunits"]),
        )
    }
}

/// Any shared style an element can point at.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Line(LineStyle),
    Poly(PolyStyle),
    Icon(IconStyle),
}

impl Style {
    pub fn id(&self) -> String {
        match self {
            Self::Line(style) => style.id(),
            Self::Poly(style) => style.id(),
            Self::Icon(style) => style.id(),
        }
    }

    /// The `<styleUrl>` line referencing this style.
    pub fn url_tag(&self) -> Result<String, KmlError> {
        let url = Value::String(xml_escape(&self.id()));
        let fields = indexmap::IndexMap::from([("url".to_string(), url)]);
        render(formats::STYLE_URL, &fields)
    }
}

impl KmlElement for Style {
    fn write(&self) -> Result<String, KmlError> {
        match self {
            Self::Line(style) => style.write(),
            Self::Poly(style) => style.write(),
            Self::Icon(style) => style.write(),
        }
    }
}

impl From<LineStyle> for Style {
    fn from(style: LineStyle) -> Self {
        Self::Line(style)
    }
}

impl From<PolyStyle> for Style {
    fn from(style: PolyStyle) -> Self {
        Self::Poly(style)
    }
}

impl From<IconStyle> for Style {
    fn from(style: IconStyle) -> Self {
        Self::Icon(style)
    }
}

/// `<styleUrl>` for an optional style, or nothing.
pub(crate) fn url_tag(style: Option<&Style>) -> Result<String, KmlError> {
    style.map_or_else(|| Ok(String::new()), Style::url_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_OVERRIDES: [(&str, Value); 0] = [];

    #[test]
    fn test_line_style_defaults() {
        let style = LineStyle::new(NO_OVERRIDES).unwrap();
        assert_eq!(style.id(), "StyleID");
        let kml = style.write().unwrap();
        assert!(kml.contains(r#"<Style id="StyleID">"#));
        assert!(kml.contains("<color>ffffffff</color>"));
        assert!(kml.contains("<width>2</width>"));
    }

    #[test]
    fn test_line_style_overrides() {
        let style = LineStyle::new([
            ("id", json!("GroundTrack")),
            ("colour", json!("FF0000FF")),
            ("width", json!(4)),
        ])
        .unwrap();
        let kml = style.write().unwrap();
        assert!(kml.contains(r#"<Style id="GroundTrack">"#));
        assert!(kml.contains("<color>FF0000FF</color>"));
        assert!(kml.contains("<width>4</width>"));
    }

    #[test]
    fn test_line_style_unknown_parameter() {
        let err = LineStyle::new([("color", json!("FF0000FF"))]).unwrap_err();
        assert!(matches!(err, KmlError::Namespace(_)));
        assert_eq!(err.to_string(), r#"element parameter rejected: invalid key: "color""#);
    }

    #[test]
    fn test_instances_do_not_share_defaults() {
        let first = LineStyle::new([("width", json!(9))]).unwrap();
        let second = LineStyle::new(NO_OVERRIDES).unwrap();
        assert_eq!(first.params().get("width"), Ok(&json!(9)));
        assert_eq!(second.params().get("width"), Ok(&json!(2)));
    }

    #[test]
    fn test_poly_style() {
        let style = PolyStyle::new("zone", [("line_width", json!(3))]).unwrap();
        assert_eq!(style.id(), "zone");
        let kml = style.write().unwrap();
        assert!(kml.contains(r#"<Style id="zone">"#));
        assert!(kml.contains("<color>ffa9a9a9</color>"));
        assert!(kml.contains("<width>3</width>"));
    }

    #[test]
    fn test_icon_style_yellow_pushpin() {
        let style = IconStyle::yellow_pushpin();
        assert_eq!(style.id(), "yellow-pushpin");
        let kml = style.write().unwrap();
        assert!(kml.contains("<scale>1.3</scale>"));
        assert!(kml.contains(YELLOW_PUSHPIN));
        assert!(kml.contains(r#"<hotSpot x="20" y="2" xunits="pixels" yunits="pixels"/>"#));
    }

    #[test]
    fn test_style_url_tag() {
        let style = Style::from(LineStyle::new([("id", json!("track"))]).unwrap());
        assert_eq!(style.url_tag().unwrap(), "        <styleUrl>#track</styleUrl>\n");
        assert_eq!(url_tag(None).unwrap(), "");
    }
}
