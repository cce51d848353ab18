use gloo_net::http::Request;
use ip_logger_lib::{
    error::{LookupError, ReadError, StoreError, WriteError},
    geo_lookup::{geo_lookup_url, GeoLookup, GeoResponse, IpResponse, IP_LOOKUP_URL},
    log_record::{LogRecord, NewLogRecord},
    telemetry::LogStore,
};
use web_sys::js_sys::Uint8Array;

const IP_LOGS_PATH: &str = "/ip_logs";

pub async fn make_request<ReturnType>(path: &str) -> Result<ReturnType, StoreError>
where
    ReturnType: serde::de::DeserializeOwned,
{
    let response = Request::get(path).send().await
        .map_err(|err| StoreError::NetworkFailure(err.to_string()))?;

    if !response.ok() {
        return Err(StoreError::ServiceError(format!("{path} returned {}", response.status())));
    }

    let binary = response.binary().await
        .map_err(|err| StoreError::NetworkFailure(err.to_string()))?;

    bincode::deserialize::<ReturnType>(&binary)
        .map_err(|err| StoreError::ServiceError(err.to_string()))
}

/// The persistence API served next to the page.
pub struct ServerStore;

impl LogStore for ServerStore {
    async fn insert_log(&self, record: NewLogRecord) -> Result<(), WriteError> {
        let body = bincode::serialize(&record)
            .map_err(|err| StoreError::ServiceError(err.to_string()))?;

        let response = Request::post(IP_LOGS_PATH)
            .header("content-type", "application/octet-stream")
            .body(Uint8Array::from(body.as_slice()))
            .map_err(|err| StoreError::NetworkFailure(err.to_string()))?
            .send().await
            .map_err(|err| StoreError::NetworkFailure(err.to_string()))?;

        if !response.ok() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::ServiceError(format!("{} {message}", response.status())));
        }

        Ok(())
    }

    async fn fetch_all_logs(&self) -> Result<Vec<LogRecord>, ReadError> {
        make_request(IP_LOGS_PATH).await
    }
}

/// ipify and ipapi.co, straight from the browser.
pub struct BrowserLookup;

impl GeoLookup for BrowserLookup {
    async fn resolve_ip(&self) -> Result<String, LookupError> {
        let response = Request::get(IP_LOOKUP_URL).send().await
            .map_err(|err| LookupError::NetworkFailure(err.to_string()))?;

        if !response.ok() {
            return Err(LookupError::NetworkFailure(format!("IP lookup returned {}", response.status())));
        }

        response.json::<IpResponse>().await
            .map_err(|err| LookupError::NetworkFailure(err.to_string()))?
            .into_ip()
    }

    async fn locate(&self, ip: &str) -> Result<GeoResponse, LookupError> {
        let response = Request::get(&geo_lookup_url(ip)).send().await
            .map_err(|err| LookupError::NetworkFailure(err.to_string()))?;

        response.json::<GeoResponse>().await
            .map_err(|err| LookupError::NetworkFailure(err.to_string()))?
            .checked(response.ok())
    }
}

pub fn user_agent() -> String {
    gloo_utils::window().navigator().user_agent().unwrap_or_default()
}
