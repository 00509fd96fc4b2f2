//! Async HTTP client for the robot backend.
//!
//! One method per backend operation. Transport and body-decode failures map
//! to [`Error::Http`]; the `success: false` envelope is NOT an error at this
//! layer. Callers decide how to surface it: status slices keep the message
//! in their `error` field, the command dispatcher turns it into a notice.
//! The backend serves its envelope on non-2xx statuses too, so replies are
//! decoded regardless of status code.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use url::Url;

use mibot_core::prelude::*;

use crate::envelope::{
    BatteryReply, CommandAck, ComprehensiveStatusReply, CurrentMapReply, DiscoverReply,
    EmergencyReply, MapsReply, NetworkStatusReply, SetIpReply, StorageReply,
};

/// Client for the MiBOT backend HTTP API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client for the given base origin (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|_| Error::invalid_base_url(base_url))?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid_base_url(base_url));
        }
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;
        Ok(Self { base, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|_| Error::invalid_base_url(format!("{}{}", self.base, path)))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!("GET {url}");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        response.json().await.map_err(|e| Error::http(e.to_string()))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.endpoint(path)?;
        trace!("POST {url}");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        response.json().await.map_err(|e| Error::http(e.to_string()))
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.post(path, &json!({})).await
    }

    // ─────────────────────────────────────────────────────────
    // Status endpoints
    // ─────────────────────────────────────────────────────────

    pub async fn network_status(&self) -> Result<NetworkStatusReply> {
        self.get("/api/network/status").await
    }

    pub async fn discover_robot(&self) -> Result<DiscoverReply> {
        self.get("/api/robot/discover").await
    }

    pub async fn comprehensive_status(&self) -> Result<ComprehensiveStatusReply> {
        self.get("/api/robot/status").await
    }

    pub async fn battery(&self) -> Result<BatteryReply> {
        self.get("/api/robot/battery").await
    }

    pub async fn storage(&self) -> Result<StorageReply> {
        self.get("/api/robot/storage").await
    }

    pub async fn maps(&self) -> Result<MapsReply> {
        self.get("/api/robot/maps").await
    }

    pub async fn current_map(&self) -> Result<CurrentMapReply> {
        self.get("/api/robot/current_map").await
    }

    pub async fn emergency_status(&self) -> Result<EmergencyReply> {
        self.get("/api/robot/emergency_status").await
    }

    // ─────────────────────────────────────────────────────────
    // Control commands
    // ─────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<CommandAck> {
        self.post("/api/login", &json!({ "email": email, "password": password }))
            .await
    }

    pub async fn stop(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/stop").await
    }

    pub async fn resume(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/resume").await
    }

    pub async fn execute(&self, stitched_map_ids: &[String]) -> Result<CommandAck> {
        self.post(
            "/api/robot/execute",
            &json!({ "stitchedMapIds": stitched_map_ids }),
        )
        .await
    }

    pub async fn quit(&self) -> Result<CommandAck> {
        self.post("/api/robot/quit", &json!({ "command": "quit" }))
            .await
    }

    pub async fn relocate(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/relocate").await
    }

    pub async fn force_relocate(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/force_relocate").await
    }

    pub async fn auto_charge(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/auto_charge").await
    }

    pub async fn undock(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/undock").await
    }

    pub async fn emergency_exit(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/emergency_exit").await
    }

    pub async fn refresh_maps_cache(&self) -> Result<CommandAck> {
        self.post_empty("/api/robot/refresh_maps_cache").await
    }

    pub async fn set_robot_ip(&self, ip: &str, port: u16) -> Result<SetIpReply> {
        self.post("/api/robot/set_ip", &json!({ "ip": ip, "port": port }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let err = ApiClient::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_endpoint_join() {
        let client = ApiClient::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        let url = client.endpoint("/api/robot/battery").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/robot/battery");
    }

    #[test]
    fn test_endpoint_join_with_trailing_slash() {
        let client = ApiClient::new("http://10.0.0.2:5000/", Duration::from_secs(5)).unwrap();
        let url = client.endpoint("/api/robot/stop").unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.2:5000/api/robot/stop");
    }
}
