//! Bravia REST/IRCC client

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::command::{unwrap_response, JsonCommand, DEFAULT_API_VERSION};
use super::ircc;
use crate::config::DeviceConfig;
use crate::error::{BraviaError, Result};

const PSK_HEADER: &str = "X-Auth-PSK";

#[derive(Debug, Deserialize)]
struct RemoteCode {
    name: String,
    value: String,
}

/// Raw answer to an IRCC send. The device puts nothing useful in the body
/// on success; a SOAP fault comes back with a 500.
#[derive(Debug, Clone)]
pub struct IrccResponse {
    pub status: StatusCode,
    pub body: String,
}

impl IrccResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Client for one television, bound to its address and PSK.
///
/// Construction fetches the remote-control code table; a client value only
/// exists once that succeeded.
pub struct BraviaClient {
    psk: String,
    system_endpoint: String,
    ircc_endpoint: String,
    http_client: Client,
    next_id: AtomicU64,
    codes: HashMap<String, String>,
}

impl BraviaClient {
    pub async fn connect(server: impl Into<String>, psk: impl Into<String>) -> Result<Self> {
        Self::from_config(DeviceConfig::new(server, psk)).await
    }

    pub async fn from_config(config: DeviceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder.build()?;

        let mut client = Self {
            psk: config.psk,
            system_endpoint: format!("{}/sony/system", config.server),
            ircc_endpoint: format!("{}/sony/IRCC", config.server),
            http_client,
            next_id: AtomicU64::new(0),
            codes: HashMap::new(),
        };

        client.codes = client.fetch_codes().await?;
        tracing::info!(
            "[Bravia] {} remote codes loaded from {}",
            client.codes.len(),
            config.server
        );

        Ok(client)
    }

    async fn fetch_codes(&self) -> Result<HashMap<String, String>> {
        // Answer is [controller info, [{name, value}, ...]]
        let info = self.call("getRemoteControllerInfo").await?;
        let list = match info {
            Value::Array(items) if items.len() >= 2 => items.into_iter().nth(1),
            _ => None,
        }
        .ok_or_else(|| {
            BraviaError::Protocol("getRemoteControllerInfo: missing code list".to_string())
        })?;

        let codes: Vec<RemoteCode> = serde_json::from_value(list).map_err(|e| {
            BraviaError::Protocol(format!("getRemoteControllerInfo: malformed code list: {}", e))
        })?;

        Ok(codes.into_iter().map(|c| (c.name, c.value)).collect())
    }

    /// Names accepted by [`send_command`](Self::send_command), in no particular order
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }

    /// Press a remote-control button by name over IRCC
    pub async fn send_command(&self, name: &str) -> Result<IrccResponse> {
        let code = self
            .code_for(name)
            .ok_or_else(|| BraviaError::UnknownCommand(name.to_string()))?;

        tracing::debug!("[Bravia] IRCC {} ({})", name, code);

        let resp = self
            .http_client
            .post(&self.ircc_endpoint)
            .header(CONTENT_TYPE, ircc::CONTENT_TYPE)
            .header("SOAPACTION", ircc::SOAP_ACTION)
            .header(PSK_HEADER, self.psk.as_str())
            .body(ircc::envelope(code))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!("[Bravia] IRCC {} returned {}", name, status);
        }

        Ok(IrccResponse { status, body })
    }

    /// Issue a JSON-RPC style call on `/sony/system` and unwrap the result
    pub async fn send_json_command(&self, command: JsonCommand) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!("[Bravia] {} (id {})", command.method(), id);

        let resp = self
            .http_client
            .post(&self.system_endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(PSK_HEADER, self.psk.as_str())
            .json(&command.envelope(id))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            tracing::warn!("[Bravia] {} returned {}", command.method(), status);
        }

        let body: Value = serde_json::from_str(&text)?;
        Ok(unwrap_response(body))
    }

    /// Parameterless call
    pub async fn call(&self, method: &str) -> Result<Value> {
        self.send_json_command(JsonCommand::new(method)).await
    }

    pub async fn is_on(&self) -> Result<bool> {
        let power = self.call("getPowerStatus").await?;
        // An error body (e.g. rejected PSK) has no status; don't read it as standby
        let status = power.get("status").and_then(Value::as_str).ok_or_else(|| {
            BraviaError::Protocol(format!("getPowerStatus: no status in {}", power))
        })?;
        Ok(status == "active")
    }

    pub async fn ensure_on(&self) -> Result<()> {
        if !self.is_on().await? {
            self.turn_on().await?;
        }
        Ok(())
    }

    pub async fn turn_on(&self) -> Result<()> {
        self.set_power_status(true).await
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.set_power_status(false).await
    }

    async fn set_power_status(&self, on: bool) -> Result<()> {
        self.send_json_command(JsonCommand::new("setPowerStatus").named("status", on))
            .await?;
        tracing::info!("[Bravia] Power set to {}", if on { "on" } else { "off" });
        Ok(())
    }

    pub async fn get_versions(&self) -> Result<Value> {
        self.call("getVersions").await
    }

    /// Pass [`DEFAULT_API_VERSION`] unless probing a newer API revision
    pub async fn get_method_types(&self, version: &str) -> Result<Value> {
        self.send_json_command(JsonCommand::new("getMethodTypes").arg(version))
            .await
    }

    pub async fn get_default_method_types(&self) -> Result<Value> {
        self.get_method_types(DEFAULT_API_VERSION).await
    }

    pub async fn get_interface_information(&self) -> Result<Value> {
        self.call("getInterfaceInformation").await
    }

    pub async fn get_system_information(&self) -> Result<Value> {
        self.call("getSystemInformation").await
    }

    pub async fn get_system_supported_function(&self) -> Result<Value> {
        self.call("getSystemSupportedFunction").await
    }

    pub async fn get_led_indicator_status(&self) -> Result<Value> {
        self.call("getLEDIndicatorStatus").await
    }

    pub async fn request_reboot(&self) -> Result<Value> {
        tracing::info!("[Bravia] Requesting reboot");
        self.call("requestReboot").await
    }
}
