use serde::{Deserialize, Serialize};

use crate::error::LookupError;

pub const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

pub fn geo_lookup_url(ip: &str) -> String {
    format!("https://ipapi.co/{ip}/json/")
}

/// Public IP plus coarse location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub ip: String,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Body of the IP resolution service.
#[derive(Debug, Clone, Deserialize)]
pub struct IpResponse {
    pub ip: String,
}

impl IpResponse {
    pub fn into_ip(self) -> Result<String, LookupError> {
        let ip = self.ip.trim();
        if ip.is_empty() {
            return Err(LookupError::NetworkFailure("IP lookup returned an empty address".to_string()));
        }
        Ok(ip.to_string())
    }
}

/// Body of the geolocation service. Only the fields we use are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl GeoResponse {
    /// The service reports refusals in the body, sometimes with a 4xx status.
    /// A flagged body is passed on whatever the status, anything else needs a 2xx.
    pub fn checked(self, status_ok: bool) -> Result<GeoResponse, LookupError> {
        if self.error || status_ok {
            Ok(self)
        } else {
            Err(LookupError::NetworkFailure("Geolocation returned an error status".to_string()))
        }
    }

    pub fn into_location(self, ip: String) -> Result<Location, LookupError> {
        if self.error {
            tracing::debug!("Geolocation refused {ip}: {:?}", self.reason);
            return Err(LookupError::GeoUnavailable);
        }

        Ok(Location {
            ip,
            city: self.city,
            country: self.country_name,
        })
    }
}

/// The two outbound calls of a location lookup. One attempt each, no retries.
#[allow(async_fn_in_trait)]
pub trait GeoLookup {
    async fn resolve_ip(&self) -> Result<String, LookupError>;

    async fn locate(&self, ip: &str) -> Result<GeoResponse, LookupError>;
}

/// Resolve the caller's public IP, then its city and country.
pub async fn resolve_location<G: GeoLookup>(lookup: &G) -> Result<Location, LookupError> {
    let ip = lookup.resolve_ip().await?;
    locate_ip(lookup, &ip).await
}

/// Resolve city and country for an already known IP.
pub async fn locate_ip<G: GeoLookup>(lookup: &G, ip: &str) -> Result<Location, LookupError> {
    lookup.locate(ip).await?.into_location(ip.to_owned())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct StubLookup {
        ip: Result<String, LookupError>,
        geo: Result<GeoResponse, LookupError>,
        locate_calls: Cell<usize>,
    }

    impl GeoLookup for StubLookup {
        async fn resolve_ip(&self) -> Result<String, LookupError> {
            self.ip.clone()
        }

        async fn locate(&self, _ip: &str) -> Result<GeoResponse, LookupError> {
            self.locate_calls.set(self.locate_calls.get() + 1);
            self.geo.clone()
        }
    }

    fn geo(city: &str, country: &str) -> GeoResponse {
        GeoResponse {
            city: Some(city.to_string()),
            country_name: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn resolves_ip_then_location() {
        let lookup = StubLookup {
            ip: Ok("203.0.113.7".to_string()),
            geo: Ok(geo("Aarhus", "Denmark")),
            locate_calls: Cell::new(0),
        };

        let location = resolve_location(&lookup).await.unwrap();
        assert_eq!(location, Location {
            ip: "203.0.113.7".to_string(),
            city: Some("Aarhus".to_string()),
            country: Some("Denmark".to_string()),
        });
    }

    #[tokio::test]
    async fn service_error_flag_is_geo_unavailable() {
        let lookup = StubLookup {
            ip: Ok("127.0.0.1".to_string()),
            geo: Ok(GeoResponse { error: true, reason: Some("Reserved IP Address".to_string()), ..Default::default() }),
            locate_calls: Cell::new(0),
        };

        assert_eq!(resolve_location(&lookup).await, Err(LookupError::GeoUnavailable));
    }

    #[tokio::test]
    async fn failed_ip_resolution_skips_geolocation() {
        let lookup = StubLookup {
            ip: Err(LookupError::NetworkFailure("offline".to_string())),
            geo: Ok(geo("Aarhus", "Denmark")),
            locate_calls: Cell::new(0),
        };

        assert!(matches!(resolve_location(&lookup).await, Err(LookupError::NetworkFailure(_))));
        assert_eq!(lookup.locate_calls.get(), 0);
    }

    #[test]
    fn error_flag_wins_over_status() {
        let refused = GeoResponse { error: true, ..Default::default() };
        let located = refused.checked(false).unwrap().into_location("10.0.0.1".to_string());
        assert_eq!(located, Err(LookupError::GeoUnavailable));

        let unflagged = geo("Aarhus", "Denmark");
        assert!(matches!(unflagged.clone().checked(false), Err(LookupError::NetworkFailure(_))));
        assert_eq!(unflagged.checked(true).unwrap().city.as_deref(), Some("Aarhus"));
    }

    #[test]
    fn parses_service_bodies() {
        let geo: GeoResponse = serde_json::from_str(r#"{"ip":"8.8.8.8","city":"Mountain View","country_name":"United States","latitude":37.4}"#).unwrap();
        assert!(!geo.error);
        assert_eq!(geo.country_name.as_deref(), Some("United States"));

        let refused: GeoResponse = serde_json::from_str(r#"{"ip":"10.0.0.1","error":true,"reason":"Reserved IP Address"}"#).unwrap();
        assert!(refused.error);
        assert_eq!(refused.city, None);

        let ip: IpResponse = serde_json::from_str(r#"{"ip":"  "}"#).unwrap();
        assert!(ip.into_ip().is_err());
    }
}
