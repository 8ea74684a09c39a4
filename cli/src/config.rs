//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use sales_inquiry_core::input::resolve_accepter;
use sales_inquiry_core::{Sdc, ServiceConfig};

use crate::transport::{UreqTransport, DEFAULT_MAX_BODY_BYTES};

/// Fetch a sales inquiry from API_SALES_INQUIRY_SRV and log every record.
#[derive(Debug, Clone, Parser)]
#[command(name = "sales-inquiry-reads", version)]
pub struct Args {
    /// Service root, without the `API_SALES_INQUIRY_SRV` segment.
    #[arg(long, env = "SAP_API_BASE_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// SAP client number, sent as `sap-client`.
    #[arg(long, env = "SAP_CLIENT")]
    pub sap_client: Option<String>,

    /// Sent as the `APIKey` header.
    #[arg(long, env = "SAP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "SAP_API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Responses with a larger body are reported as request errors.
    #[arg(long, env = "SAP_API_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: u64,

    /// SDC input document naming the inquiry, item and accepter.
    #[arg(long, env = "SDC_INPUT")]
    pub input: Option<PathBuf>,

    /// Overrides the input document's sales inquiry.
    #[arg(long)]
    pub sales_inquiry: Option<String>,

    /// Overrides the input document's item.
    #[arg(long)]
    pub item: Option<String>,

    /// Resource to fetch (`Header`, `Item` or `All`); repeatable. Overrides
    /// the input document's accepter.
    #[arg(long = "accepter")]
    pub accepter: Vec<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}

/// What a single run fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub sales_inquiry: String,
    pub item: Option<String>,
    pub accepter: Vec<String>,
}

impl Args {
    pub fn service_config(&self) -> ServiceConfig {
        let config = ServiceConfig::new(self.base_url.clone());
        match &self.sap_client {
            Some(sap_client) => config.with_sap_client(sap_client.clone()),
            None => config,
        }
    }

    pub fn transport(&self) -> UreqTransport {
        UreqTransport::new(Duration::from_secs(self.timeout_secs), self.api_key.clone())
            .with_body_limit(self.max_body_bytes)
    }

    /// Combine the input document with command-line overrides.
    pub fn plan(&self, sdc: Option<&Sdc>) -> Result<RunPlan> {
        let sales_inquiry = match (&self.sales_inquiry, sdc) {
            (Some(id), _) => id.clone(),
            (None, Some(sdc)) if !sdc.document_id().is_empty() => sdc.document_id().to_string(),
            _ => bail!("no sales inquiry given: pass --sales-inquiry or an --input document"),
        };

        let item = self
            .item
            .clone()
            .or_else(|| sdc.and_then(Sdc::item_id).map(str::to_string));

        let accepter = match sdc {
            Some(sdc) if self.accepter.is_empty() => sdc.resolved_accepter(),
            _ => resolve_accepter(&self.accepter),
        };

        Ok(RunPlan {
            sales_inquiry,
            item,
            accepter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["sales-inquiry-reads"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn sdc(id: &str, item: &str, accepter: &[&str]) -> Sdc {
        let mut sdc = Sdc::default();
        sdc.sales_inquiry.sales_inquiry = id.to_string();
        sdc.sales_inquiry.sales_inquiry_item.sales_inquiry_item = item.to_string();
        sdc.accepter = accepter.iter().map(|s| s.to_string()).collect();
        sdc
    }

    #[test]
    fn sap_client_flows_into_service_config() {
        let config = args(&["--base-url", "http://sap.test/", "--sap-client", "100"]).service_config();
        assert_eq!(config.base_url, "http://sap.test/");
        assert_eq!(config.sap_client.as_deref(), Some("100"));
    }

    #[test]
    fn body_limit_defaults_above_ureq_default() {
        assert_eq!(args(&[]).max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(DEFAULT_MAX_BODY_BYTES > 10 * 1024 * 1024);
        assert_eq!(args(&["--max-body-bytes", "2048"]).max_body_bytes, 2048);
    }

    #[test]
    fn plan_from_input_document() {
        let plan = args(&[]).plan(Some(&sdc("10000001", "10", &["Item"]))).unwrap();
        assert_eq!(
            plan,
            RunPlan {
                sales_inquiry: "10000001".to_string(),
                item: Some("10".to_string()),
                accepter: vec!["Item".to_string()],
            }
        );
    }

    #[test]
    fn flags_override_input_document() {
        let plan = args(&["--sales-inquiry", "2", "--item", "20", "--accepter", "Header"])
            .plan(Some(&sdc("1", "10", &["Item"])))
            .unwrap();
        assert_eq!(plan.sales_inquiry, "2");
        assert_eq!(plan.item.as_deref(), Some("20"));
        assert_eq!(plan.accepter, ["Header"]);
    }

    #[test]
    fn all_expands_to_every_resource() {
        let plan = args(&["--sales-inquiry", "1", "--accepter", "All"]).plan(None).unwrap();
        assert_eq!(plan.accepter, ["Header", "Item"]);
        assert_eq!(plan.item, None);
    }

    #[test]
    fn missing_accepter_means_all() {
        let plan = args(&[]).plan(Some(&sdc("1", "", &[]))).unwrap();
        assert_eq!(plan.accepter, ["Header", "Item"]);
        assert_eq!(plan.item, None);
    }

    #[test]
    fn missing_inquiry_is_an_error() {
        assert!(args(&[]).plan(None).is_err());
        assert!(args(&[]).plan(Some(&sdc("", "10", &[]))).is_err());
    }
}
