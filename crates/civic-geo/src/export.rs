//! GeoJSON rendering of hotspots for map clients.

use civic_core::models::Hotspot;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;

/// One point feature per hotspot, positioned at the centroid (`[lng, lat]`)
pub fn hotspots_to_geojson(hotspots: &[Hotspot]) -> FeatureCollection {
    let features = hotspots.iter().map(hotspot_feature).collect();

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

fn hotspot_feature(hotspot: &Hotspot) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![hotspot.centroid.lng, hotspot.centroid.lat]));

    let mut properties = JsonObject::new();
    properties.insert("area".to_string(), JsonValue::from(hotspot.area_name.clone()));
    properties.insert("zone".to_string(), JsonValue::from(hotspot.zone.clone()));
    properties.insert("complaint_count".to_string(), JsonValue::from(hotspot.complaint_count));
    properties.insert(
        "dominant_category".to_string(),
        JsonValue::from(hotspot.dominant_category.clone()),
    );
    properties.insert("severity".to_string(), JsonValue::from(hotspot.severity.as_str()));

    Feature {
        geometry: Some(geometry),
        properties: Some(properties),
        id: Some(Id::Number(hotspot.id.into())),
        bbox: None,
        foreign_members: None,
    }
}
