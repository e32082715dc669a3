// MyQ device endpoints
//
// Account-wide device listing plus single-attribute reads and writes.

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::myq::client::MyqClient;
use crate::myq::models::{AttributeResponse, DeviceDetailsResponse, MyqDevice};

/// Device attributes the door bridge reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAttribute {
    /// Human-readable door description.
    Desc,
    /// Current state code (1..=5) with an update timestamp.
    DoorState,
    /// Write-only command attribute: 0 = close, 1 = open.
    DesiredDoorState,
}

impl DoorAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::DoorState => "doorstate",
            Self::DesiredDoorState => "desireddoorstate",
        }
    }
}

impl MyqClient {
    /// List every device on the account, doors or not.
    ///
    /// `GET /api/UserDeviceDetails`
    pub async fn list_devices(&self, token: &str) -> Result<Vec<MyqDevice>, Error> {
        debug!("listing devices");
        let resp: DeviceDetailsResponse = self.get("/api/UserDeviceDetails", &[], token).await?;
        Ok(resp.devices)
    }

    /// Read one attribute of one device.
    ///
    /// `GET /Device/getDeviceAttribute?devId={id}&name={attr}`
    pub async fn get_attribute(
        &self,
        token: &str,
        device_id: &str,
        attribute: DoorAttribute,
    ) -> Result<AttributeResponse, Error> {
        debug!(device_id, attribute = attribute.as_str(), "reading attribute");
        self.get(
            "/Device/getDeviceAttribute",
            &[("devId", device_id), ("name", attribute.as_str())],
            token,
        )
        .await
    }

    /// Write one attribute of one device.
    ///
    /// `PUT /api/deviceattribute/putdeviceattribute`
    pub async fn set_attribute(
        &self,
        token: &str,
        device_id: &str,
        attribute: DoorAttribute,
        value: u8,
    ) -> Result<(), Error> {
        debug!(
            device_id,
            attribute = attribute.as_str(),
            value,
            "writing attribute"
        );
        let value = value.to_string();
        let _: Value = self
            .put(
                "/api/deviceattribute/putdeviceattribute",
                &[
                    ("AttributeName", attribute.as_str()),
                    ("DeviceId", device_id),
                    ("AttributeValue", value.as_str()),
                ],
                token,
            )
            .await?;
        Ok(())
    }
}
