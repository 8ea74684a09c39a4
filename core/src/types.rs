//! Record types for the sales inquiry service.
//!
//! # Design
//! Records mirror the upstream entity sets field for field and are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift. Field values pass through verbatim. Keys absent from a response
//! and keys sent as `null` both decode to their empty value, and
//! serialization writes every key back in upstream spelling so a decoded
//! `results` sequence re-encodes unchanged.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the field's empty value. The upstream sends `null` for
/// unset dates and flags; a value of the wrong type is still an error.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The `__metadata` block attached to every result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub entity_type: String,
}

/// A navigation link to a sub-resource.
///
/// On the wire this is an OData deferred object,
/// `{"__deferred":{"uri":"..."}}`. The record exposes only the URI, which
/// is empty when the upstream omitted the link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Deferred", into = "Deferred")]
pub struct Link(String);

impl Link {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct Deferred {
    #[serde(rename = "__deferred", default, deserialize_with = "null_as_default")]
    deferred: DeferredUri,
}

#[derive(Default, Serialize, Deserialize)]
struct DeferredUri {
    #[serde(default, deserialize_with = "null_as_default")]
    uri: String,
}

impl From<Deferred> for Link {
    fn from(value: Deferred) -> Self {
        Link(value.deferred.uri)
    }
}

impl From<Link> for Deferred {
    fn from(value: Link) -> Self {
        Deferred {
            deferred: DeferredUri { uri: value.0 },
        }
    }
}

/// One row of `A_SalesInquiry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Header {
    #[serde(rename = "__metadata", deserialize_with = "null_as_default")]
    pub metadata: Metadata,
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
    #[serde(rename = "to_Partner", deserialize_with = "null_as_default")]
    pub to_header_partner: Link,
    #[serde(rename = "to_Item", deserialize_with = "null_as_default")]
    pub to_item: Link,
}

/// One row of a header's `to_Partner` navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct HeaderPartner {
    #[serde(rename = "__metadata", deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partner_function: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub supplier: String,
}

/// One row of `A_SalesInquiryItem`, also returned by a header's `to_Item`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Item {
    #[serde(rename = "__metadata", deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry: String,
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
    #[serde(rename = "to_PricingElement", deserialize_with = "null_as_default")]
    pub to_item_pricing_element: Link,
}

/// One pricing condition row of an item's `to_PricingElement` navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ItemPricingElement {
    #[serde(rename = "__metadata", deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sales_inquiry_item: String,
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
    /// Boolean here; the SDC input schema carries the same field as a string.
    #[serde(deserialize_with = "null_as_default")]
    pub condition_is_manually_changed: bool,
}
