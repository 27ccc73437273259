use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::{Cost, Error, NodeId, VehicleType};

/// Result of a single start → end query
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Ordered geometry along the traversed ways, from the located start node
    /// to the located end node
    pub points: Vec<Point<f64>>,
    /// Length of the geometry in meters
    pub distance_meters: f64,
    /// Accumulated search cost in seconds, turn penalties included
    pub cost_seconds: Cost,
    /// Crossing-level node path the search settled on
    pub nodes: Vec<NodeId>,
    pub vehicle: VehicleType,
    /// Point the query asked to start from, before locating
    pub query_start: Point<f64>,
    pub query_end: Point<f64>,
}

impl Route {
    pub fn start(&self) -> Option<Point<f64>> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point<f64>> {
        self.points.last().copied()
    }

    /// Network geometry extended to the query points, so the line starts and
    /// ends where the query did rather than at the located nodes.
    pub fn line(&self) -> Vec<Point<f64>> {
        let mut line = Vec::with_capacity(self.points.len() + 2);
        line.push(self.query_start);
        for point in self.points.iter().copied().chain([self.query_end]) {
            if line.last() != Some(&point) {
                line.push(point);
            }
        }
        line
    }

    /// Converts the route to a `GeoJSON` `Feature` with a `LineString` geometry.
    pub fn to_feature(&self, leg_index: usize) -> Result<Feature, Error> {
        let line: LineString<f64> = self.line().into_iter().collect();
        let geometry = Geometry::new(GeoJsonValue::from(&line));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "leg_index": leg_index,
                "vehicle": self.vehicle,
                "distance": self.distance_meters,
                "cost": self.cost_seconds,
                "time": self.cost_seconds.round() as i64,
                "node_count": self.nodes.len(),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        routes_to_geojson(std::slice::from_ref(self))
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// One feature per leg, in leg order
pub fn routes_to_geojson(routes: &[Route]) -> Result<FeatureCollection, Error> {
    let features = routes
        .iter()
        .enumerate()
        .map(|(idx, route)| route.to_feature(idx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> Route {
        Route {
            points: vec![Point::new(13.4, 52.5), Point::new(13.41, 52.51)],
            distance_meters: 1310.5,
            cost_seconds: 157.26,
            nodes: vec![1, 2],
            vehicle: VehicleType::Car,
            query_start: Point::new(13.4, 52.5),
            query_end: Point::new(13.4101, 52.5102),
        }
    }

    #[test]
    fn feature_has_lon_lat_line_and_properties() {
        let feature = sample_route().to_feature(0).unwrap();
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["geometry"]["type"], json!("LineString"));
        let coordinates = value["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coordinates.len(), 3);
        assert_eq!(coordinates[0], json!([13.4, 52.5]));
        assert_eq!(coordinates[2], json!([13.4101, 52.5102]));

        let props = feature.properties.unwrap();
        assert_eq!(props["distance"], json!(1310.5));
        assert_eq!(props["time"], json!(157));
        assert_eq!(props["vehicle"], json!("car"));
    }

    #[test]
    fn collection_keeps_leg_order() {
        let routes = vec![sample_route(), sample_route()];
        let collection = routes_to_geojson(&routes).unwrap();
        assert_eq!(collection.features.len(), 2);
        let second = collection.features[1].properties.as_ref().unwrap();
        assert_eq!(second["leg_index"], json!(1));
    }
}
