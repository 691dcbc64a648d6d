//! # Image Overlays
//!
//! Images draped on the ground (`GroundOverlay`) or pinned to the screen
//! (`ScreenOverlay`), e.g. a data raster and its colour bar. An overlay can
//! carry its image as an [`Attachment`] so the document ships it along.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::element::{
    defaults, fields, with_overrides, Attachment, DataPoint, ExtendedData, KmlElement, Params,
};
use crate::error::KmlError;
use crate::formats;
use crate::template::render;

/// Bounds of a ground overlay, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

/// An image stretched over a `LatLonBox`.
///
/// Parameters: `name`, `description`, `colour` (`ffffffff`), `draw_order`
/// (1), `href`, `view_bound_scale` (0.75), `north`/`east`/`south`/`west`,
/// `rotation` (0).
#[derive(Debug, Clone, PartialEq)]
pub struct GroundOverlay {
    params: Params,
    data: ExtendedData,
    image: Option<Attachment>,
}

impl GroundOverlay {
    pub fn defaults() -> Params {
        defaults(&[
            ("name", json!("")),
            ("description", json!("")),
            ("colour", json!("ffffffff")),
            ("draw_order", json!(1)),
            ("href", json!("")),
            ("view_bound_scale", json!(0.75)),
            ("north", Value::Null),
            ("east", Value::Null),
            ("south", Value::Null),
            ("west", Value::Null),
            ("rotation", json!(0)),
        ])
    }

    pub fn new<I, S>(bounds: LatLonBox, href: &str, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut params = Self::defaults();
        params.update([
            ("north".to_string(), json!(bounds.north)),
            ("east".to_string(), json!(bounds.east)),
            ("south".to_string(), json!(bounds.south)),
            ("west".to_string(), json!(bounds.west)),
            ("href".to_string(), json!(href)),
        ])?;
        Ok(Self {
            params: with_overrides(params, overrides)?,
            data: ExtendedData::new(),
            image: None,
        })
    }

    /// Ship `image` with the document and point `href` at it.
    pub fn with_image(mut self, image: Attachment) -> Result<Self, KmlError> {
        self.params.set("href".to_string(), json!(image.name()?))?;
        self.image = Some(image);
        Ok(self)
    }

    pub fn add_data(&mut self, point: DataPoint) {
        self.data.push(point);
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for GroundOverlay {
    fn write(&self) -> Result<String, KmlError> {
        let mut f = fields(&self.params, &["name", "description", "colour", "href"]);
        f.insert("data".to_string(), Value::String(self.data.write()?));
        render(formats::GROUND_OVERLAY, &f)
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.image.iter().collect()
    }
}

/// An image fixed to the viewer's screen, such as a legend.
///
/// Parameters follow the KML `overlayXY`, `screenXY`, `rotationXY`, and
/// `size` attributes, each as `x_*`, `y_*`, `xunits_*`, `yunits_*`, plus
/// `name`, `description`, `href`, and `rotation`. By default the image's
/// top-left corner sits at the screen's top-left corner and takes half the
/// screen width and a tenth of its height.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOverlay {
    params: Params,
    image: Option<Attachment>,
}

impl ScreenOverlay {
    pub fn defaults() -> Params {
        defaults(&[
            ("name", json!("")),
            ("description", json!("")),
            ("href", json!("")),
            ("x_overlay", json!(0)),
            ("y_overlay", json!(1)),
            ("xunits_overlay", json!("fraction")),
            ("yunits_overlay", json!("fraction")),
            ("x_screen", json!(0.01)),
            ("y_screen", json!(0.99)),
            ("xunits_screen", json!("fraction")),
            ("yunits_screen", json!("fraction")),
            ("x_size", json!(0.5)),
            ("y_size", json!(0.1)),
            ("xunits_size", json!("fraction")),
            ("yunits_size", json!("fraction")),
            ("x_rotation", json!(0.5)),
            ("y_rotation", json!(0.5)),
            ("xunits_rotation", json!("fraction")),
            ("yunits_rotation", json!("fraction")),
            ("rotation", json!(0)),
        ])
    }

    pub fn new<I, S>(href: &str, overrides: I) -> Result<Self, KmlError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut params = Self::defaults();
        params.set("href".to_string(), json!(href))?;
        Ok(Self {
            params: with_overrides(params, overrides)?,
            image: None,
        })
    }

    /// Ship `image` with the document and point `href` at it.
    pub fn with_image(mut self, image: Attachment) -> Result<Self, KmlError> {
        self.params.set("href".to_string(), json!(image.name()?))?;
        self.image = Some(image);
        Ok(self)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl KmlElement for ScreenOverlay {
    fn write(&self) -> Result<String, KmlError> {
        const TEXT: [&str; 11] = [
            "name",
            "description",
            "href",
            "xunits_overlay",
            "yunits_overlay",
            "xunits_screen",
            "yunits_screen",
            "xunits_size",
            "yunits_size",
            "xunits_rotation",
            "yunits_rotation",
        ];
        render(formats::SCREEN_OVERLAY, &fields(&self.params, &TEXT))
    }

    fn attachments(&self) -> Vec<&Attachment> {
        self.image.iter().collect()
    }
}
