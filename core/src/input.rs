//! The SDC input document that names what one run should fetch.
//!
//! Only `SalesInquiry.SalesInquiry`, `SalesInquiry.SalesInquiryItem.SalesInquiryItem`
//! and `accepter` drive the caller; the remaining fields are carried so a
//! document read here can be written back unchanged.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::caller::Resource;
use crate::error::InputError;
use crate::types::null_as_default;

/// Input document for one sales inquiry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sdc {
    #[serde(deserialize_with = "null_as_default")]
    pub connection_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub result: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub redis_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub filepath: String,
    #[serde(rename = "SalesInquiry", deserialize_with = "null_as_default")]
    pub sales_inquiry: SdcSalesInquiry,
    #[serde(deserialize_with = "null_as_default")]
    pub api_schema: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accepter: Vec<String>,
    #[serde(rename = "sales_inquiry", deserialize_with = "null_as_default")]
    pub sales_inquiry_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SdcSalesInquiry {
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_organization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub distribution_channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organization_division: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_office: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_district: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sold_to_party: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_change_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_order_by_customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_purchase_order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_purchase_order_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_net_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_currency: String,
    #[serde(rename = "SDDocumentReason", deserialize_with = "null_as_default")]
    pub sd_document_reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub header_billing_block_reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub binding_period_validity_start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub binding_period_validity_end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hdr_order_probability_in_percent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expected_order_net_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub incoterms_classification: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_payment_terms: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method: String,
    #[serde(rename = "OverallSDProcessStatus", deserialize_with = "null_as_default")]
    pub overall_sd_process_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_credit_check_status: String,
    #[serde(rename = "OverallSDDocumentRejectionSts", deserialize_with = "null_as_default")]
    pub overall_sd_document_rejection_sts: String,
    #[serde(deserialize_with = "null_as_default")]
    pub header_partner: SdcHeaderPartner,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_item: SdcSalesInquiryItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SdcHeaderPartner {
    #[serde(deserialize_with = "null_as_default")]
    pub partner_function: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub supplier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SdcSalesInquiryItem {
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_item: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_item_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_item_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_order_by_customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material_by_customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requested_quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub requested_quantity_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_order_probability_in_percent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_gross_weight: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_net_weight: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_weight_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_volume: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_volume_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub net_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub material_group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub batch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub incoterms_classification: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_payment_terms: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_document_rjcn_reason: String,
    #[serde(rename = "WBSElement", deserialize_with = "null_as_default")]
    pub wbs_element: String,
    #[serde(rename = "SDProcessStatus", deserialize_with = "null_as_default")]
    pub sd_process_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_pricing_element: SdcItemPricingElement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SdcItemPricingElement {
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_procedure_step: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_procedure_counter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_application: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_date_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_calculation_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_base_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_rate_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_quantity_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_scale_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_record: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_sequential_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pricing_scale_basis: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_scale_basis_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_scale_basis_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub condition_scale_basis_currency: String,
    /// A string in this schema, a boolean in the service response.
    #[serde(deserialize_with = "null_as_default")]
    pub condition_is_manually_changed: String,
}

impl Sdc {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| InputError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn document_id(&self) -> &str {
        &self.sales_inquiry.sales_inquiry
    }

    /// `None` when the document leaves the item id blank.
    pub fn item_id(&self) -> Option<&str> {
        let item = self.sales_inquiry.sales_inquiry_item.sales_inquiry_item.as_str();
        (!item.is_empty()).then_some(item)
    }

    /// The accepter list with `All` (or an empty list) expanded to every
    /// resource name.
    pub fn resolved_accepter(&self) -> Vec<String> {
        resolve_accepter(&self.accepter)
    }
}

/// Expand an accepter list: empty, or starting with `"All"`, means every
/// resource. Anything else is returned unchanged.
pub fn resolve_accepter(accepter: &[String]) -> Vec<String> {
    match accepter.first().map(String::as_str) {
        None | Some("All") => Resource::ALL.iter().map(|r| r.name().to_string()).collect(),
        Some(_) => accepter.to_vec(),
    }
}
