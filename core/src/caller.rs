//! Orchestration of the dependent fetches for one sales inquiry.
//!
//! # Design
//! `fetch_selected` spawns one scoped thread per requested resource name and
//! returns when all of them have finished. Inside a fetch path every step
//! runs strictly after the previous one, because its input is the link the
//! previous step returned. A failed step is reported and the path keeps
//! going with an empty link, which the transport then rejects; nothing
//! short-circuits the chain.

use std::thread;

use serde::Serialize;

use crate::client::SalesInquiryClient;
use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::reporter::{Reporter, Step};

/// A top-level fetch path that can be requested by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Header, then its partners, its items and the first item's pricing.
    Header,
    /// One item, then its pricing elements.
    Item,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Header, Resource::Item];

    /// Case-sensitive lookup; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Header" => Some(Resource::Header),
            "Item" => Some(Resource::Item),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Header => "Header",
            Resource::Item => "Item",
        }
    }
}

/// Drives the fetch paths through a `Transport` and reports every step to a
/// `Reporter`.
pub struct SalesInquiryCaller<T, R> {
    client: SalesInquiryClient,
    transport: T,
    reporter: R,
}

impl<T: Transport, R: Reporter> SalesInquiryCaller<T, R> {
    pub fn new(config: &ServiceConfig, transport: T, reporter: R) -> Self {
        Self {
            client: SalesInquiryClient::new(config),
            transport,
            reporter,
        }
    }

    /// Run the fetch path for every recognized name in `wanted`, concurrently,
    /// and wait for all of them. A name listed twice runs twice.
    pub fn fetch_selected<S: AsRef<str>>(
        &self,
        sales_inquiry: &str,
        sales_inquiry_item: Option<&str>,
        wanted: &[S],
    ) {
        let resources: Vec<Resource> = wanted
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let resource = Resource::from_name(name);
                if resource.is_none() {
                    tracing::debug!(name, "ignoring unknown resource");
                }
                resource
            })
            .collect();
        if resources.is_empty() {
            return;
        }

        let sales_inquiry_item = sales_inquiry_item.unwrap_or_default();
        thread::scope(|scope| {
            for resource in resources {
                scope.spawn(move || match resource {
                    Resource::Header => self.fetch_header(sales_inquiry),
                    Resource::Item => self.fetch_item(sales_inquiry, sales_inquiry_item),
                });
            }
        });
    }

    /// Header → partners → items → first item's pricing elements.
    pub fn fetch_header(&self, sales_inquiry: &str) {
        let headers = self.step(
            Step::Header,
            self.client.build_header_request(sales_inquiry),
            SalesInquiryClient::parse_header,
        );
        let header = headers.first();

        let partner_uri = header.map(|h| h.to_header_partner.uri()).unwrap_or_default();
        self.step(
            Step::HeaderPartner,
            self.client.build_link_request(partner_uri),
            SalesInquiryClient::parse_header_partner,
        );

        let item_uri = header.map(|h| h.to_item.uri()).unwrap_or_default();
        let items = self.step(
            Step::Item,
            self.client.build_link_request(item_uri),
            SalesInquiryClient::parse_item,
        );

        self.fetch_pricing_elements(items.first().map(|i| i.to_item_pricing_element.uri()));
    }

    /// Item → its pricing elements.
    pub fn fetch_item(&self, sales_inquiry: &str, sales_inquiry_item: &str) {
        let items = self.step(
            Step::Item,
            self.client.build_item_request(sales_inquiry, sales_inquiry_item),
            SalesInquiryClient::parse_item,
        );

        self.fetch_pricing_elements(items.first().map(|i| i.to_item_pricing_element.uri()));
    }

    fn fetch_pricing_elements(&self, uri: Option<&str>) {
        self.step(
            Step::ItemPricingElement,
            self.client.build_link_request(uri.unwrap_or_default()),
            SalesInquiryClient::parse_item_pricing_element,
        );
    }

    /// Execute one request, report the outcome, and hand back whatever rows
    /// were decoded (none on failure).
    fn step<V, P>(&self, step: Step, request: HttpRequest, parse: P) -> Vec<V>
    where
        V: Serialize,
        P: FnOnce(&SalesInquiryClient, HttpResponse) -> Result<Vec<V>, ApiError>,
    {
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| parse(&self.client, response));

        match result {
            Ok(records) => {
                match serde_json::to_value(&records) {
                    Ok(value) => self.reporter.info(step, &value),
                    Err(e) => self
                        .reporter
                        .error(step, &ApiError::SerializationError(e.to_string())),
                }
                records
            }
            Err(err) => {
                self.reporter.error(step, &err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    const BASE_URL: &str = "http://sap.test";
    const SRV: &str = "http://sap.test/API_SALES_INQUIRY_SRV";

    /// In-memory transport keyed by URL. Unknown URLs (including the empty
    /// one) fail the way a real client fails on an unroutable address.
    #[derive(Default)]
    struct FakeTransport {
        routes: HashMap<String, HttpResponse>,
        calls: Mutex<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn route(mut self, url: &str, status: u16, body: serde_json::Value) -> Self {
            self.routes.insert(
                url.to_string(),
                HttpResponse {
                    status,
                    body: body.to_string().into_bytes(),
                },
            );
            self
        }

        fn urls(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|r| r.url.clone()).collect()
        }
    }

    impl Transport for FakeTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.lock().unwrap().push(request.clone());
            self.routes
                .get(&request.url)
                .cloned()
                .ok_or_else(|| ApiError::Transport(format!("no route to {:?}", request.url)))
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<(Step, Result<serde_json::Value, String>)>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<(Step, Result<serde_json::Value, String>)> {
            self.events.lock().unwrap().clone()
        }

        fn errors(&self) -> Vec<(Step, String)> {
            self.events()
                .into_iter()
                .filter_map(|(step, outcome)| outcome.err().map(|e| (step, e)))
                .collect()
        }

        fn successes(&self) -> Vec<Step> {
            self.events()
                .into_iter()
                .filter(|(_, outcome)| outcome.is_ok())
                .map(|(step, _)| step)
                .collect()
        }
    }

    impl Reporter for RecordingReporter {
        fn info(&self, step: Step, records: &serde_json::Value) {
            self.events.lock().unwrap().push((step, Ok(records.clone())));
        }

        fn error(&self, step: Step, error: &ApiError) {
            self.events.lock().unwrap().push((step, Err(error.to_string())));
        }
    }

    fn envelope(rows: Vec<serde_json::Value>) -> serde_json::Value {
        json!({"d": {"results": rows}})
    }

    fn deferred(uri: &str) -> serde_json::Value {
        json!({"__deferred": {"uri": uri}})
    }

    fn header_url() -> String {
        format!("{SRV}/A_SalesInquiry")
    }

    fn item_url() -> String {
        format!("{SRV}/A_SalesInquiryItem")
    }

    fn partner_link() -> String {
        format!("{SRV}/A_SalesInquiry('SI001')/to_Partner")
    }

    fn items_link() -> String {
        format!("{SRV}/A_SalesInquiry('SI001')/to_Item")
    }

    fn pricing_link() -> String {
        format!("{SRV}/A_SalesInquiryItem(SalesInquiry='SI001',SalesInquiryItem='10')/to_PricingElement")
    }

    fn full_service() -> FakeTransport {
        let item = json!({
            "SalesInquiry": "SI001",
            "SalesInquiryItem": "10",
            "Material": "TG11",
            "to_PricingElement": deferred(&pricing_link())
        });
        FakeTransport::default()
            .route(
                &header_url(),
                200,
                envelope(vec![json!({
                    "SalesInquiry": "SI001",
                    "SoldToParty": "17100001",
                    "to_Partner": deferred(&partner_link()),
                    "to_Item": deferred(&items_link())
                })]),
            )
            .route(
                &partner_link(),
                200,
                envelope(vec![
                    json!({"SalesInquiry": "SI001", "PartnerFunction": "AG", "Customer": "17100001"}),
                    json!({"SalesInquiry": "SI001", "PartnerFunction": "WE", "Customer": "17100002"}),
                ]),
            )
            .route(&items_link(), 200, envelope(vec![item.clone()]))
            .route(&item_url(), 200, envelope(vec![item]))
            .route(
                &pricing_link(),
                200,
                envelope(vec![json!({
                    "SalesInquiry": "SI001",
                    "SalesInquiryItem": "10",
                    "ConditionType": "PR00",
                    "ConditionIsManuallyChanged": false
                })]),
            )
    }

    fn caller<'a>(
        transport: &'a FakeTransport,
        reporter: &'a RecordingReporter,
    ) -> SalesInquiryCaller<&'a FakeTransport, &'a RecordingReporter> {
        SalesInquiryCaller::new(&ServiceConfig::new(BASE_URL), transport, reporter)
    }

    #[test]
    fn resource_names_are_case_sensitive() {
        assert_eq!(Resource::from_name("Header"), Some(Resource::Header));
        assert_eq!(Resource::from_name("Item"), Some(Resource::Item));
        assert_eq!(Resource::from_name("header"), None);
        assert_eq!(Resource::from_name("Bogus"), None);
        for resource in Resource::ALL {
            assert_eq!(Resource::from_name(resource.name()), Some(resource));
        }
    }

    #[test]
    fn empty_selection_does_nothing() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected::<&str>("SI001", Some("10"), &[]);
        assert!(transport.urls().is_empty());
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", Some("10"), &["Bogus", "header"]);
        assert!(transport.urls().is_empty());
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn header_path_follows_links_in_order() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", None, &["Header"]);

        assert_eq!(
            transport.urls(),
            vec![header_url(), partner_link(), items_link(), pricing_link()]
        );
        assert_eq!(
            reporter.successes(),
            vec![Step::Header, Step::HeaderPartner, Step::Item, Step::ItemPricingElement]
        );

        let events = reporter.events();
        let partners = events[1].1.as_ref().unwrap();
        assert_eq!(partners.as_array().unwrap().len(), 2);
        assert_eq!(partners[1]["PartnerFunction"], "WE");
        assert_eq!(events[3].1.as_ref().unwrap()[0]["ConditionIsManuallyChanged"], false);
    }

    #[test]
    fn header_request_carries_filter() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_header("SI001");
        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls[0].query_param("$filter"), Some("SalesInquiry eq 'SI001'"));
        assert!(calls[1..].iter().all(|r| r.query_param("$filter").is_none()));
    }

    #[test]
    fn item_path_fetches_item_then_pricing() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", Some("10"), &["Item"]);

        assert_eq!(transport.urls(), vec![item_url(), pricing_link()]);
        assert_eq!(reporter.successes(), vec![Step::Item, Step::ItemPricingElement]);
        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            calls[0].query_param("$filter"),
            Some("SalesInquiry eq 'SI001' and SalesInquiryItem eq '10'")
        );
    }

    #[test]
    fn missing_item_id_filters_on_empty_value() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", None, &["Item"]);
        let calls = transport.calls.lock().unwrap();
        assert_eq!(
            calls[0].query_param("$filter"),
            Some("SalesInquiry eq 'SI001' and SalesInquiryItem eq ''")
        );
    }

    #[test]
    fn both_paths_run_to_completion() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", Some("10"), &["Header", "Bogus", "Item"]);

        let mut urls = transport.urls();
        urls.sort();
        let mut expected = vec![
            header_url(),
            partner_link(),
            items_link(),
            pricing_link(),
            item_url(),
            pricing_link(),
        ];
        expected.sort();
        assert_eq!(urls, expected);
        assert_eq!(reporter.successes().len(), 6);
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn duplicate_names_run_twice() {
        let transport = full_service();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", Some("10"), &["Item", "Item"]);
        assert_eq!(transport.urls().len(), 4);
    }

    #[test]
    fn header_transport_failure_does_not_stop_the_chain() {
        let transport = FakeTransport::default();
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_selected("SI001", None, &["Header"]);

        assert_eq!(
            transport.urls(),
            vec![header_url(), String::new(), String::new(), String::new()]
        );
        let errors = reporter.errors();
        let steps: Vec<Step> = errors.iter().map(|(step, _)| *step).collect();
        assert_eq!(
            steps,
            vec![Step::Header, Step::HeaderPartner, Step::Item, Step::ItemPricingElement]
        );
        assert!(errors.iter().all(|(_, e)| e.starts_with("API request error")));
        assert!(reporter.successes().is_empty());
    }

    #[test]
    fn header_status_error_does_not_stop_the_chain() {
        let transport =
            FakeTransport::default().route(&header_url(), 503, json!({"error": "unavailable"}));
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_header("SI001");

        let errors = reporter.errors();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].1.contains("HTTP 503"));
    }

    #[test]
    fn empty_header_results_leave_links_empty() {
        let transport = FakeTransport::default().route(&header_url(), 200, envelope(vec![]));
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_header("SI001");

        assert_eq!(reporter.successes(), vec![Step::Header]);
        assert_eq!(reporter.events()[0].1.as_ref().unwrap(), &json!([]));
        assert_eq!(reporter.errors().len(), 3);
        assert_eq!(&transport.urls()[1..], [String::new(), String::new(), String::new()]);
    }

    #[test]
    fn decode_failure_is_reported_as_convert_error() {
        let transport = full_service().route(&partner_link(), 200, json!({"unexpected": true}));
        let reporter = RecordingReporter::default();
        caller(&transport, &reporter).fetch_header("SI001");

        let errors = reporter.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, Step::HeaderPartner);
        assert!(errors[0].1.starts_with("convert error"));
        assert_eq!(
            reporter.successes(),
            vec![Step::Header, Step::Item, Step::ItemPricingElement]
        );
    }
}
