// daikin-api: Async Rust client for the Daikin split air-conditioner WiFi adapter

pub mod client;
pub mod device;
pub mod endpoint;
pub mod error;
pub mod records;
pub mod response;
pub mod transport;
pub mod wire;

pub use client::DaikinClient;
pub use device::Device;
pub use endpoint::Endpoint;
pub use error::Error;
pub use records::{BasicInfo, ControlInfo, PowerInfo, SensorInfo};
pub use response::FieldMap;
pub use transport::TransportConfig;
pub use wire::{
    Fan, FanDir, Humidity, KWattHours, Mode, NOT_AVAILABLE, Name, Power, Temperature, Text,
    Version, WireValue,
};
