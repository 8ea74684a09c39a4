use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub const SERVICE_ROOT: &str = "/API_SALES_INQUIRY_SRV";

/// One upstream row, kept as raw JSON so the mock stays independent of the
/// client's record types.
pub type Record = Map<String, Value>;

#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    pub inquiries: Vec<Inquiry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Inquiry {
    pub header: Record,
    #[serde(default)]
    pub partners: Vec<Record>,
    #[serde(default)]
    pub items: Vec<InquiryItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct InquiryItem {
    pub item: Record,
    #[serde(default)]
    pub pricing_elements: Vec<Record>,
}

impl Catalog {
    /// The catalog embedded from `fixtures/catalog.json`.
    pub fn sample() -> Result<Self, serde_json::Error> {
        serde_json::from_str(include_str!("../fixtures/catalog.json"))
    }

    fn inquiry(&self, sales_inquiry: &str) -> Option<&Inquiry> {
        self.inquiries
            .iter()
            .find(|i| field(&i.header, "SalesInquiry") == sales_inquiry)
    }
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(rename = "$filter")]
    filter: Option<String>,
}

type Db = Arc<Catalog>;

pub fn app(catalog: Catalog) -> Router {
    Router::new()
        .route("/API_SALES_INQUIRY_SRV/A_SalesInquiry", get(list_headers))
        .route("/API_SALES_INQUIRY_SRV/A_SalesInquiryItem", get(list_items))
        .route("/API_SALES_INQUIRY_SRV/{entity}/{navigation}", get(navigate))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app(catalog)).await
}

/// Parse an equality `$filter` such as
/// `SalesInquiry eq '1' and SalesInquiryItem eq '10'` into field/value pairs.
pub fn parse_filter(filter: &str) -> Option<Vec<(String, String)>> {
    filter
        .split(" and ")
        .map(|clause| {
            let (name, value) = clause.trim().split_once(" eq ")?;
            let value = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
            Some((name.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Split an entity segment such as `A_SalesInquiry('1')` or
/// `A_SalesInquiryItem(SalesInquiry='1',SalesInquiryItem='10')` into the
/// entity set name and its key values. A bare key gets an empty name.
pub fn parse_entity_key(segment: &str) -> Option<(String, Vec<(String, String)>)> {
    let (entity_set, rest) = segment.split_once('(')?;
    let keys = rest.strip_suffix(')')?;
    let pairs = keys
        .split(',')
        .map(|part| {
            let (name, value) = part.split_once('=').unwrap_or(("", part));
            let value = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
            Some((name.trim().to_string(), value.to_string()))
        })
        .collect::<Option<Vec<_>>>()?;
    Some((entity_set.to_string(), pairs))
}

fn field<'a>(record: &'a Record, name: &str) -> &'a str {
    record.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn key_value<'a>(keys: &'a [(String, String)], name: &str) -> Option<&'a str> {
    match keys {
        [(key, value)] if key.is_empty() => Some(value.as_str()),
        _ => keys
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str()),
    }
}

fn matches(record: &Record, filter: &[(String, String)]) -> bool {
    filter.iter().all(|(name, value)| field(record, name) == value)
}

fn parse_params(params: &ListParams) -> Result<Vec<(String, String)>, StatusCode> {
    match params.filter.as_deref() {
        None => Ok(Vec::new()),
        Some(filter) => parse_filter(filter).ok_or(StatusCode::BAD_REQUEST),
    }
}

/// Absolute service root as seen by the client, for metadata and links.
fn service_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}{SERVICE_ROOT}")
}

fn envelope(results: Vec<Record>) -> Json<Value> {
    Json(json!({ "d": { "results": results } }))
}

fn with_metadata(mut record: Record, uri: String, entity_type: &str) -> Record {
    record.insert(
        "__metadata".to_string(),
        json!({ "id": uri, "uri": uri, "type": format!("API_SALES_INQUIRY_SRV.{entity_type}") }),
    );
    record
}

fn deferred(uri: String) -> Value {
    json!({ "__deferred": { "uri": uri } })
}

fn header_row(root: &str, header: &Record) -> Record {
    let uri = format!("{root}/A_SalesInquiry('{}')", field(header, "SalesInquiry"));
    let mut row = with_metadata(header.clone(), uri.clone(), "A_SalesInquiryType");
    row.insert("to_Partner".to_string(), deferred(format!("{uri}/to_Partner")));
    row.insert("to_Item".to_string(), deferred(format!("{uri}/to_Item")));
    row
}

fn partner_row(root: &str, partner: &Record) -> Record {
    let uri = format!(
        "{root}/A_SalesInquiryPartner(SalesInquiry='{}',PartnerFunction='{}')",
        field(partner, "SalesInquiry"),
        field(partner, "PartnerFunction"),
    );
    with_metadata(partner.clone(), uri, "A_SalesInquiryPartnerType")
}

fn item_row(root: &str, item: &Record) -> Record {
    let uri = format!(
        "{root}/A_SalesInquiryItem(SalesInquiry='{}',SalesInquiryItem='{}')",
        field(item, "SalesInquiry"),
        field(item, "SalesInquiryItem"),
    );
    let mut row = with_metadata(item.clone(), uri.clone(), "A_SalesInquiryItemType");
    row.insert(
        "to_PricingElement".to_string(),
        deferred(format!("{uri}/to_PricingElement")),
    );
    row
}

fn pricing_row(root: &str, element: &Record) -> Record {
    let uri = format!(
        "{root}/A_SalesInquiryItemPrcgElmnt(SalesInquiry='{}',SalesInquiryItem='{}',PricingProcedureStep='{}',PricingProcedureCounter='{}')",
        field(element, "SalesInquiry"),
        field(element, "SalesInquiryItem"),
        field(element, "PricingProcedureStep"),
        field(element, "PricingProcedureCounter"),
    );
    with_metadata(element.clone(), uri, "A_SalesInquiryItemPrcgElmntType")
}

async fn list_headers(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = parse_params(&params)?;
    let root = service_url(&headers);
    let rows = db
        .inquiries
        .iter()
        .filter(|i| matches(&i.header, &filter))
        .map(|i| header_row(&root, &i.header))
        .collect();
    Ok(envelope(rows))
}

async fn list_items(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, StatusCode> {
    let filter = parse_params(&params)?;
    let root = service_url(&headers);
    let rows = db
        .inquiries
        .iter()
        .flat_map(|i| i.items.iter())
        .filter(|i| matches(&i.item, &filter))
        .map(|i| item_row(&root, &i.item))
        .collect();
    Ok(envelope(rows))
}

async fn navigate(
    State(db): State<Db>,
    headers: HeaderMap,
    Path((entity, navigation)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let (entity_set, keys) = parse_entity_key(&entity).ok_or(StatusCode::NOT_FOUND)?;
    let root = service_url(&headers);
    let sales_inquiry = key_value(&keys, "SalesInquiry").ok_or(StatusCode::NOT_FOUND)?;
    let inquiry = db.inquiry(sales_inquiry).ok_or(StatusCode::NOT_FOUND)?;

    let rows = match (entity_set.as_str(), navigation.as_str()) {
        ("A_SalesInquiry", "to_Partner") => inquiry
            .partners
            .iter()
            .map(|p| partner_row(&root, p))
            .collect(),
        ("A_SalesInquiry", "to_Item") => inquiry
            .items
            .iter()
            .map(|i| item_row(&root, &i.item))
            .collect(),
        ("A_SalesInquiryItem", "to_PricingElement") => {
            let item_no = key_value(&keys, "SalesInquiryItem").ok_or(StatusCode::NOT_FOUND)?;
            let item = inquiry
                .items
                .iter()
                .find(|i| field(&i.item, "SalesInquiryItem") == item_no)
                .ok_or(StatusCode::NOT_FOUND)?;
            item.pricing_elements
                .iter()
                .map(|e| pricing_row(&root, e))
                .collect()
        }
        _ => return Err(StatusCode::NOT_FOUND),
    };
    Ok(envelope(rows))
}
