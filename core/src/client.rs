//! Stateless HTTP request builder and response parser for
//! `API_SALES_INQUIRY_SRV`.
//!
//! # Design
//! `SalesInquiryClient` holds only the service root and the optional SAP
//! client number. Each step of a fetch path is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Filter values are inserted into the `$filter` expression
//! unescaped.

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::formatter;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Header, HeaderPartner, Item, ItemPricingElement};

pub const SERVICE_NAME: &str = "API_SALES_INQUIRY_SRV";
pub const HEADER_ENTITY_SET: &str = "A_SalesInquiry";
pub const ITEM_ENTITY_SET: &str = "A_SalesInquiryItem";

/// `$filter` selecting one sales inquiry header.
pub fn header_filter(sales_inquiry: &str) -> String {
    format!("SalesInquiry eq '{sales_inquiry}'")
}

/// `$filter` selecting one item of one sales inquiry.
pub fn item_filter(sales_inquiry: &str, sales_inquiry_item: &str) -> String {
    format!("SalesInquiry eq '{sales_inquiry}' and SalesInquiryItem eq '{sales_inquiry_item}'")
}

/// Synchronous, stateless client for the sales inquiry service.
#[derive(Debug, Clone)]
pub struct SalesInquiryClient {
    base_url: String,
    sap_client: Option<String>,
}

impl SalesInquiryClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sap_client: config.sap_client.clone(),
        }
    }

    pub fn build_header_request(&self, sales_inquiry: &str) -> HttpRequest {
        self.request(
            self.entity_set_url(HEADER_ENTITY_SET),
            Some(header_filter(sales_inquiry)),
        )
    }

    pub fn build_item_request(&self, sales_inquiry: &str, sales_inquiry_item: &str) -> HttpRequest {
        self.request(
            self.entity_set_url(ITEM_ENTITY_SET),
            Some(item_filter(sales_inquiry, sales_inquiry_item)),
        )
    }

    /// Request for a navigation link taken from a previous response. The URI
    /// is used as-is, including when it is empty.
    pub fn build_link_request(&self, uri: &str) -> HttpRequest {
        self.request(uri.to_string(), None)
    }

    pub fn parse_header(&self, response: HttpResponse) -> Result<Vec<Header>, ApiError> {
        check_status(&response)?;
        formatter::convert_to_header(&response.body)
    }

    pub fn parse_header_partner(&self, response: HttpResponse) -> Result<Vec<HeaderPartner>, ApiError> {
        check_status(&response)?;
        formatter::convert_to_header_partner(&response.body)
    }

    pub fn parse_item(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        check_status(&response)?;
        formatter::convert_to_item(&response.body)
    }

    pub fn parse_item_pricing_element(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<ItemPricingElement>, ApiError> {
        check_status(&response)?;
        formatter::convert_to_item_pricing_element(&response.body)
    }

    fn entity_set_url(&self, entity_set: &str) -> String {
        [self.base_url.as_str(), SERVICE_NAME, entity_set].join("/")
    }

    fn request(&self, url: String, filter: Option<String>) -> HttpRequest {
        let mut query = Vec::new();
        if let Some(filter) = filter {
            query.push(("$filter".to_string(), filter));
        }
        if let Some(sap_client) = &self.sap_client {
            query.push(("sap-client".to_string(), sap_client.clone()));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url,
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Map non-2xx status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
