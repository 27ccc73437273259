use std::{str::FromStr, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
};
use crossway_core::{
    Route, VehicleType,
    model::{Address, routes_to_geojson},
};
use geo::Point;
use geojson::{FeatureCollection, Geometry, Value as GeoJsonValue};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// `lon,lat`
    pub start: String,
    /// `lon,lat`
    pub end: String,
    pub vehicle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Waypoints as `[lon, lat]`
    pub points: Vec<[f64; 2]>,
    pub vehicle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LocateQuery {
    pub id: i64,
}

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 200;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub nodes: usize,
    pub ways: usize,
    pub crossings: usize,
    pub addresses: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.planner.store().stats();
    Json(HealthResponse {
        status: "ok",
        nodes: stats.nodes,
        ways: stats.ways,
        crossings: stats.crossings,
        addresses: stats.addresses,
    })
}

pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let start = parse_point(&query.start)?;
    let end = parse_point(&query.end)?;
    let vehicle = parse_vehicle(query.vehicle.as_deref())?;

    let route = run_blocking(state, move |state| {
        state.planner.find_route(start, end, vehicle)
    })
    .await?;

    tracing::info!(
        %vehicle,
        distance = route.distance_meters,
        cost = route.cost_seconds,
        "Route found"
    );
    Ok(Json(routes_to_geojson(std::slice::from_ref(&route))?))
}

pub async fn post_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<FeatureCollection>, ApiError> {
    if request.points.len() < 2 {
        return Err(ApiError::BadRequest(format!(
            "at least two points are required, got {}",
            request.points.len()
        )));
    }
    let points = request
        .points
        .iter()
        .map(|&[lon, lat]| checked_point(lon, lat))
        .collect::<Result<Vec<_>, _>>()?;
    let vehicle = parse_vehicle(request.vehicle.as_deref())?;

    let routes: Vec<Route> = run_blocking(state, move |state| {
        state.planner.find_route_through(&points, vehicle)
    })
    .await?;

    tracing::info!(%vehicle, legs = routes.len(), "Route found");
    Ok(Json(routes_to_geojson(&routes)?))
}

/// Addresses matching all words of `q`, the last word as a prefix
pub async fn search_addresses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Address>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);
    let text = query.q.clone();

    let addresses = run_blocking(state, move |state| {
        Ok(state.planner.store().search_addresses(&text, limit))
    })
    .await?;

    tracing::debug!(query = %query.q, found = addresses.len(), "Address search");
    Ok(Json(addresses))
}

/// Position of an address returned by the search, as a GeoJSON point
pub async fn locate_address(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocateQuery>,
) -> Result<Json<Geometry>, ApiError> {
    let address = state
        .planner
        .store()
        .locate_address(query.id)
        .ok_or_else(|| ApiError::NotFound(format!("No address with id {}", query.id)))?;

    let point = Point::new(address.lon, address.lat);
    Ok(Json(Geometry::new(GeoJsonValue::from(&point))))
}

/// Searches are CPU bound and block on storage, keep them off the async workers
async fn run_blocking<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, crossway_core::Error> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

fn parse_point(raw: &str) -> Result<Point<f64>, ApiError> {
    let invalid = || ApiError::BadRequest(format!("expected 'lon,lat', got '{raw}'"));

    let (lon, lat) = raw.split_once(',').ok_or_else(invalid)?;
    let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;
    let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;

    checked_point(lon, lat)
}

fn checked_point(lon: f64, lat: f64) -> Result<Point<f64>, ApiError> {
    if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() > 90.0 {
        return Err(ApiError::BadRequest(format!(
            "coordinate out of range: ({lon}, {lat})"
        )));
    }
    Ok(Point::new(lon, lat))
}

fn parse_vehicle(raw: Option<&str>) -> Result<VehicleType, ApiError> {
    match raw {
        None => Ok(VehicleType::default()),
        Some(value) => {
            VehicleType::from_str(value).map_err(|e| ApiError::BadRequest(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_parsing() {
        let point = parse_point("13.4, 52.5").unwrap();
        assert_eq!(point, Point::new(13.4, 52.5));
        assert!(parse_point("13.4").is_err());
        assert!(parse_point("abc,52.5").is_err());
        assert!(parse_point("200,52.5").is_err());
    }

    #[test]
    fn vehicle_defaults_to_car() {
        assert_eq!(parse_vehicle(None).unwrap(), VehicleType::Car);
        assert_eq!(parse_vehicle(Some("foot")).unwrap(), VehicleType::Pedestrian);
        assert!(parse_vehicle(Some("tram")).is_err());
    }
}
