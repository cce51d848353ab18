use ip_logger_lib::{
    error::LookupError,
    geo_lookup::{geo_lookup_url, GeoLookup, GeoResponse, IpResponse, IP_LOOKUP_URL},
};

use crate::USER_AGENT;

/// Native lookup client, used by the CLI.
#[derive(Clone)]
pub struct HttpLookup {
    client: reqwest::Client,
}

impl HttpLookup {
    pub fn new() -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(network_failure)?;

        Ok(Self { client })
    }
}

impl GeoLookup for HttpLookup {
    async fn resolve_ip(&self) -> Result<String, LookupError> {
        let response = self.client.get(IP_LOOKUP_URL)
            .send().await
            .and_then(|response| response.error_for_status())
            .map_err(network_failure)?;

        response.json::<IpResponse>().await
            .map_err(network_failure)?
            .into_ip()
    }

    async fn locate(&self, ip: &str) -> Result<GeoResponse, LookupError> {
        let response = self.client.get(geo_lookup_url(ip))
            .send().await
            .map_err(network_failure)?;

        let status_ok = response.status().is_success();
        response.json::<GeoResponse>().await
            .map_err(network_failure)?
            .checked(status_ok)
    }
}

fn network_failure(err: reqwest::Error) -> LookupError {
    LookupError::NetworkFailure(err.to_string())
}
