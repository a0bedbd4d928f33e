use crate::overlay::GroundOverlayEntry;

const HEAD: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
"#;
const TAIL: &str = "</Document>\n</kml>\n";

/// Escapes text for use in XML element content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn ground_overlay(entry: &GroundOverlayEntry) -> String {
    let b = &entry.bounds;
    format!(
        "  <GroundOverlay>
    <name>{}</name>
    <drawOrder>{}</drawOrder>
    <Icon>
      <href>{}</href>
    </Icon>
    <altitudeMode>clampToSeaFloor</altitudeMode>
    <LatLonBox>
      <north>{}</north>
      <south>{}</south>
      <east>{}</east>
      <west>{}</west>
      <rotation>{}</rotation>
    </LatLonBox>
  </GroundOverlay>
",
        escape(&entry.name),
        entry.draw_order,
        escape(&entry.href),
        b.north,
        b.south,
        b.east,
        b.west,
        entry.rotation
    )
}

/// A complete KML document with one ground overlay per entry.
pub fn document(entries: &[GroundOverlayEntry]) -> String {
    let mut out = String::from(HEAD);
    for entry in entries {
        out += &ground_overlay(entry);
    }
    out += TAIL;
    out
}
