//! GeoJSON Boundary Input
//!
//! Reads a boundary from GeoJSON and writes it back out for the overlay layer.
//! Accepts a bare `Polygon` geometry, a `Feature` wrapping one, or a
//! `FeatureCollection` whose first feature is a polygon. Altitude components
//! are dropped.

use geojson::{Feature, GeoJson, Geometry, Value};

use fleet_events::GeoPoint;

use super::Boundary;
use crate::error::BoundaryError;

/// Property key holding the area's name.
const NAME_PROPERTY: &str = "Name";

impl Boundary {
    /// Parses a boundary from GeoJSON text.
    pub fn from_geojson_str(content: &str) -> Result<Self, BoundaryError> {
        let geojson: GeoJson = content.parse()?;
        Self::from_geojson(geojson)
    }

    /// Builds a boundary from parsed GeoJSON.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self, BoundaryError> {
        let feature = match geojson {
            GeoJson::Geometry(geometry) => return polygon_from_geometry(geometry),
            GeoJson::Feature(feature) => feature,
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .next()
                .ok_or_else(|| BoundaryError::UnsupportedGeometry("empty feature collection".into()))?,
        };

        let name = feature
            .property(NAME_PROPERTY)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let geometry = feature
            .geometry
            .ok_or_else(|| BoundaryError::UnsupportedGeometry("feature has no geometry".into()))?;

        let boundary = polygon_from_geometry(geometry)?;
        Ok(match name {
            Some(name) => boundary.with_name(name),
            None => boundary,
        })
    }

    /// Exports the boundary as a GeoJSON polygon feature.
    pub fn to_geojson(&self) -> GeoJson {
        let rings = self
            .rings()
            .iter()
            .map(|ring| ring.iter().map(|p| vec![p.lng, p.lat]).collect())
            .collect();

        let mut feature = Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(rings))),
            id: None,
            properties: None,
            foreign_members: None,
        };
        if let Some(name) = self.name() {
            feature.set_property(NAME_PROPERTY, name);
        }
        GeoJson::Feature(feature)
    }
}

fn polygon_from_geometry(geometry: Geometry) -> Result<Boundary, BoundaryError> {
    match geometry.value {
        Value::Polygon(rings) => {
            let rings = rings
                .into_iter()
                .map(|ring| ring.into_iter().map(position_to_point).collect::<Result<Vec<_>, _>>())
                .collect::<Result<Vec<Vec<GeoPoint>>, _>>()?;
            Boundary::new(rings)
        }
        other => Err(BoundaryError::UnsupportedGeometry(kind(&other).to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn position_to_point(position: Vec<f64>) -> Result<GeoPoint, BoundaryError> {
    match position.as_slice() {
        [lng, lat, ..] => Ok(GeoPoint::new(*lng, *lat)),
        _ => Err(BoundaryError::UnsupportedGeometry(format!(
            "position with {} coordinates",
            position.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE_FEATURE: &str = r#"{
        "type": "Feature",
        "properties": { "Name": "Test Pit" },
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]]
        }
    }"#;

    #[test]
    fn test_parse_feature_drops_altitude() {
        let boundary = Boundary::from_geojson_str(SQUARE_FEATURE).unwrap();

        assert_eq!(boundary.name(), Some("Test Pit"));
        assert_eq!(boundary.outer().len(), 5);
        assert_eq!(boundary.outer()[2], GeoPoint::new(1.0, 1.0));
        assert!(boundary.contains(GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_parse_bare_polygon_with_hole() {
        let json = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
                [[1, 1], [3, 1], [3, 3], [1, 3], [1, 1]]
            ]
        }"#;
        let boundary = Boundary::from_geojson_str(json).unwrap();

        assert_eq!(boundary.holes().count(), 1);
        assert!(!boundary.contains(GeoPoint::new(2.0, 2.0)));
        assert!(boundary.name().is_none());
    }

    #[test]
    fn test_rejects_non_polygon() {
        let json = r#"{ "type": "Point", "coordinates": [1.0, 2.0] }"#;
        assert!(matches!(
            Boundary::from_geojson_str(json),
            Err(BoundaryError::UnsupportedGeometry(_))
        ));
    }

    #[test]
    fn test_rejects_unclosed_ring() {
        let json = r#"{ "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]] }"#;
        assert!(matches!(
            Boundary::from_geojson_str(json),
            Err(BoundaryError::RingNotClosed { ring: 0 })
        ));
    }

    #[test]
    fn test_export_keeps_name_and_rings() {
        let boundary = Boundary::from_geojson_str(SQUARE_FEATURE).unwrap();
        let reparsed = Boundary::from_geojson(boundary.to_geojson()).unwrap();

        assert_eq!(reparsed, boundary);
    }

    #[test]
    fn test_feature_collection_uses_first_feature() {
        let collection = format!(
            r#"{{ "type": "FeatureCollection", "features": [{}, {}] }}"#,
            SQUARE_FEATURE,
            r#"{ "type": "Feature", "properties": { "Name": "Second" },
                 "geometry": { "type": "Point", "coordinates": [5.0, 5.0] } }"#
        );

        let boundary = Boundary::from_geojson_str(&collection).unwrap();

        assert_eq!(boundary.name(), Some("Test Pit"));
        assert!(boundary.contains(GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_empty_feature_collection_rejected() {
        let result = Boundary::from_geojson_str(r#"{ "type": "FeatureCollection", "features": [] }"#);
        assert!(matches!(result, Err(BoundaryError::UnsupportedGeometry(_))));
    }
}
