//! Connection settings shared by the request builder and the caller.

use serde::Deserialize;

/// Where the sales inquiry service lives and which SAP client to address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Service root, e.g. `https://host/sap/opu/odata/sap`. A trailing slash
    /// is ignored.
    pub base_url: String,
    /// Sent as the `sap-client` query parameter on every request when set.
    #[serde(default)]
    pub sap_client: Option<String>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sap_client: None,
        }
    }

    pub fn with_sap_client(mut self, sap_client: impl Into<String>) -> Self {
        self.sap_client = Some(sap_client.into());
        self
    }
}
