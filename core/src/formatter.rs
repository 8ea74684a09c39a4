//! Conversion of raw response bodies into typed records.
//!
//! Every list response of the service is wrapped in the same envelope,
//! `{"d":{"results":[...]}}`. Both `d` and `results` are required; anything
//! else is a decode error. Rows are returned in upstream order.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::{Header, HeaderPartner, Item, ItemPricingElement};

#[derive(Debug, Deserialize)]
struct Envelope<R> {
    d: Results<R>,
}

#[derive(Debug, Deserialize)]
struct Results<R> {
    results: R,
}

fn convert<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, ApiError> {
    let envelope: Envelope<Vec<T>> = serde_json::from_slice(body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    Ok(envelope.d.results)
}

pub fn convert_to_header(body: &[u8]) -> Result<Vec<Header>, ApiError> {
    convert(body)
}

pub fn convert_to_header_partner(body: &[u8]) -> Result<Vec<HeaderPartner>, ApiError> {
    convert(body)
}

/// Used for both `A_SalesInquiryItem` and a header's `to_Item` navigation.
pub fn convert_to_item(body: &[u8]) -> Result<Vec<Item>, ApiError> {
    convert(body)
}

pub fn convert_to_item_pricing_element(body: &[u8]) -> Result<Vec<ItemPricingElement>, ApiError> {
    convert(body)
}
