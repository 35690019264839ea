// src/domain/store/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(i64);

impl StoreId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("store id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<StoreId> for i64 {
    fn from(value: StoreId) -> Self {
        value.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store name, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreName(String);

impl StoreName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("please enter a store name".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreSlug(String);

impl StoreSlug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::Validation(format!(
                "slug is not url-safe: {value}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free text, `None` when blank after trimming.
pub fn trimmed_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Tag collection with set semantics. Keeps first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreTags(Vec<String>);

impl StoreTags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || out.iter().any(|t| t == tag) {
                continue;
            }
            out.push(tag.to_string());
        }
        Self(out)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Longitude/latitude pair in degrees, GeoJSON order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> DomainResult<Self> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(DomainError::Validation(
                "you must supply coordinates".into(),
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::Validation(format!(
                "longitude out of range: {lng}"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::Validation(format!(
                "latitude out of range: {lat}"
            )));
        }
        Ok(Self { lng, lat })
    }

    pub fn from_coordinates(coordinates: &[f64]) -> DomainResult<Self> {
        match coordinates {
            [lng, lat] => Self::new(*lng, *lat),
            _ => Err(DomainError::Validation(
                "you must supply coordinates as [lng, lat]".into(),
            )),
        }
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Great-circle distance (haversine).
    pub fn distance_meters(&self, other: &Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }
}

pub const DEFAULT_LOCATION_KIND: &str = "Point";

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub kind: String,
    pub point: GeoPoint,
    pub address: String,
}

impl Location {
    pub fn new(kind: Option<String>, point: GeoPoint, address: impl Into<String>) -> DomainResult<Self> {
        let address = address.into();
        let address = address.trim();
        if address.is_empty() {
            return Err(DomainError::Validation("you must supply an address".into()));
        }
        let kind = trimmed_text(kind).unwrap_or_else(|| DEFAULT_LOCATION_KIND.to_string());
        Ok(Self {
            kind,
            point,
            address: address.to_string(),
        })
    }
}
