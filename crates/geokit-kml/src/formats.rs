//! # KML Templates
//!
//! String templates for each KML construct. Slots are written `{field}`
//! and filled by [`crate::template::render`]. The `style_url`, `look_at`,
//! `data`, and boundary slots take already-rendered KML and are inserted
//! verbatim, including their trailing newline.
//!
//! Indentation is cosmetic; Google Earth does not require it, but it keeps
//! generated files readable when they have to be checked by hand.
//!
//! KML reference: <https://developers.google.com/kml/documentation/kmlreference>

pub const FILE_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">
    <Document>
        <name>{name}</name>
        <description>{description}</description>
"#;

pub const FILE_FOOTER: &str = "    </Document>
</kml>
";

pub const FOLDER_HEADER: &str = "    <Folder>
        <name>{name}</name>
        <description>{description}</description>
";

pub const FOLDER_FOOTER: &str = "    </Folder>
";

pub const STYLE_URL: &str = "        <styleUrl>#{url}</styleUrl>
";

pub const LINE_STYLE: &str = r#"    <Style id="{id}">
        <LineStyle>
            <color>{colour}</color>
            <width>{width}</width>
        </LineStyle>
    </Style>
"#;

pub const POLY_STYLE: &str = r#"    <Style id="{id}">
        <PolyStyle>
            <color>{fill_colour}</color>
        </PolyStyle>
        <LineStyle>
            <color>{line_colour}</color>
            <width>{line_width}</width>
        </LineStyle>
    </Style>
"#;

pub const ICON_STYLE: &str = r#"    <Style id="{id}">
        <IconStyle>
            <scale>{scale}</scale>
            <Icon>
                <href>{icon}</href>
            </Icon>
            <hotSpot x="{x}" y="{y}" xunits="{xunits}" yunits="{yunits}"/>
        </IconStyle>
    </Style>
"#;

pub const LINE_STRING: &str = "    <Placemark>
        <name>{name}</name>
        <description>{description}</description>
{style_url}        <LineString>
            <extrude>{extrude}</extrude>
            <tessellate>{tessellate}</tessellate>
            <coordinates>{coordinates}</coordinates>
        </LineString>
    </Placemark>
";

pub const POLYGON: &str = "    <Placemark>
        <name>{name}</name>
{data}{look_at}        <description>{description}</description>
{style_url}        <Polygon>
            <altitudeMode>{altitude_mode}</altitudeMode>
            <tessellate>{tessellate}</tessellate>
            <extrude>{extrude}</extrude>
{outer_boundary}{inner_boundary}        </Polygon>
    </Placemark>
";

pub const OUTER_BOUNDARY: &str = "            <outerBoundaryIs>
                <LinearRing>
                    <coordinates>{coordinates}</coordinates>
                </LinearRing>
            </outerBoundaryIs>
";

pub const INNER_BOUNDARY: &str = "            <innerBoundaryIs>
                <LinearRing>
                    <coordinates>{coordinates}</coordinates>
                </LinearRing>
            </innerBoundaryIs>
";

pub const DATA_HEADER: &str = "        <ExtendedData>
";

pub const DATA_FOOTER: &str = "        </ExtendedData>
";

pub const DATA_FIELD: &str = r#"            <Data name="{name}">
                <value>{value}</value>
            </Data>
"#;

pub const POINT_PLACEMARK: &str = "    <Placemark>
        <name>{name}</name>
{look_at}{style_url}        <Point>
            <gx:drawOrder>1</gx:drawOrder>
            <coordinates>{lon},{lat},{altitude}</coordinates>
        </Point>
    </Placemark>
";

pub const LOOK_AT: &str = "        <LookAt>
            <longitude>{lon}</longitude>
            <latitude>{lat}</latitude>
            <altitude>{altitude}</altitude>
            <heading>{heading}</heading>
            <tilt>{tilt}</tilt>
            <range>{range}</range>
            <altitudeMode>{altitude_mode}</altitudeMode>
        </LookAt>
";

pub const GROUND_OVERLAY: &str = "    <GroundOverlay>
        <name>{name}</name>
        <color>{colour}</color>
        <description>{description}</description>
{data}        <drawOrder>{draw_order}</drawOrder>
        <Icon>
            <href>{href}</href>
            <viewBoundScale>{view_bound_scale}</viewBoundScale>
        </Icon>
        <LatLonBox>
            <north>{north}</north>
            <south>{south}</south>
            <east>{east}</east>
            <west>{west}</west>
            <rotation>{rotation}</rotation>
        </LatLonBox>
    </GroundOverlay>
";

pub const SCREEN_OVERLAY: &str = r#"    <ScreenOverlay>
        <name>{name}</name>
        <description>{description}</description>
        <Icon>
            <href>{href}</href>
        </Icon>
        <overlayXY x="{x_overlay}" y="{y_overlay}" xunits="{xunits_overlay}" yunits="{yunits_overlay}"/>
        <screenXY x="{x_screen}" y="{y_screen}" xunits="{xunits_screen}" yunits="{yunits_screen}"/>
        <rotationXY x="{x_rotation}" y="{y_rotation}" xunits="{xunits_rotation}" yunits="{yunits_rotation}"/>
        <rotation>{rotation}</rotation>
        <size x="{x_size}" y="{y_size}" xunits="{xunits_size}" yunits="{yunits_size}"/>
    </ScreenOverlay>
"#;
