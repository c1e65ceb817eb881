// Device HTTP client
//
// Wraps `reqwest::Client` with adapter URL construction and reply
// handling. Every call is a plain GET against a fixed path on port 80;
// replies are single-line CSV handed to the record aggregator. No call
// is retried here.

use tracing::debug;
use url::Url;

use crate::device::Device;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::records::{BasicInfo, ControlInfo, PowerInfo, SensorInfo};
use crate::response::{self, FieldMap};
use crate::transport::TransportConfig;

/// HTTP client for one or more adapters.
///
/// Holds no per-device state, so a single instance can serve every device
/// in a registry concurrently. Read-modify-write sequences against the same
/// device must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct DaikinClient {
    http: reqwest::Client,
}

impl DaikinClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// `http://{address}{path}`. `address` may carry a port.
    fn url(address: &str, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("http://{address}{path}"))?)
    }

    async fn get_fields(&self, url: Url) -> Result<FieldMap, Error> {
        debug!("GET {}", url);

        let path = url.path().to_owned();
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                path,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        response::parse(&body)
    }

    /// Fetch the raw field map of any endpoint. `ret` is left for the
    /// caller to interpret.
    pub async fn query(&self, address: &str, endpoint: Endpoint) -> Result<FieldMap, Error> {
        self.get_fields(Self::url(address, endpoint.path())?).await
    }

    // ── Typed fetches ────────────────────────────────────────────────
    //
    // Each fetch builds a fresh record and only stores it on success, so a
    // failed call never leaves a half-decoded record behind.

    pub async fn get_basic_info(&self, device: &mut Device) -> Result<(), Error> {
        let fields = self.query(&device.address, Endpoint::BasicInfo).await?;
        let mut info = BasicInfo::default();
        info.populate(&fields)?;
        device.basic_info = Some(info);
        Ok(())
    }

    pub async fn get_control_info(&self, device: &mut Device) -> Result<(), Error> {
        let fields = self.query(&device.address, Endpoint::ControlInfo).await?;
        let mut info = ControlInfo::default();
        info.populate(&fields)?;
        device.control_info = Some(info);
        Ok(())
    }

    pub async fn get_sensor_info(&self, device: &mut Device) -> Result<(), Error> {
        let fields = self.query(&device.address, Endpoint::SensorInfo).await?;
        let mut info = SensorInfo::default();
        info.populate(&fields)?;
        device.sensor_info = Some(info);
        Ok(())
    }

    pub async fn get_power_info(&self, device: &mut Device) -> Result<(), Error> {
        let fields = self.query(&device.address, Endpoint::DayPowerEx).await?;
        let mut info = PowerInfo::default();
        info.populate(&fields)?;
        device.power_info = Some(info);
        Ok(())
    }

    /// Run all four fetches in order, stopping at the first failure.
    pub async fn refresh(&self, device: &mut Device) -> Result<(), Error> {
        self.get_basic_info(device).await?;
        self.get_control_info(device).await?;
        self.get_sensor_info(device).await?;
        self.get_power_info(device).await
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Write the device's in-memory control settings back to it.
    ///
    /// Requires a prior successful [`get_control_info`](Self::get_control_info).
    /// Any `ret` other than `OK` is a rejection, not a transient fault.
    pub async fn set_control_info(&self, device: &Device) -> Result<(), Error> {
        let control = device
            .control_info
            .as_ref()
            .ok_or(Error::NotPopulated {
                record: "control info",
            })?;

        let url = Url::parse(&format!(
            "http://{}{}?{}",
            device.address,
            Endpoint::SetControlInfo.path(),
            control.query_string()
        ))?;

        let fields = self.get_fields(url).await?;
        match fields.get(response::RET) {
            Some(ret) if ret == response::RET_OK => Ok(()),
            Some(ret) => Err(Error::DeviceRejected { ret: ret.clone() }),
            None => Err(Error::MalformedResponse {
                message: "reply carries no ret field".into(),
            }),
        }
    }
}
