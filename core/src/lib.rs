//! Read-only client core for the `API_SALES_INQUIRY_SRV` OData service.
//!
//! # Overview
//! Fetches a sales inquiry's header, header partners, items and item pricing
//! elements, decodes each response into flat records and reports every step
//! to a `Reporter`.
//!
//! # Design
//! - `SalesInquiryClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - `SalesInquiryCaller` executes the dependent steps through a host
//!   supplied `Transport` and never surfaces errors to its own caller; each
//!   failure is reported and the chain continues.
//! - Records are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod caller;
pub mod client;
pub mod config;
pub mod error;
pub mod formatter;
pub mod http;
pub mod input;
pub mod reporter;
pub mod types;

pub use caller::{Resource, SalesInquiryCaller};
pub use client::SalesInquiryClient;
pub use config::ServiceConfig;
pub use error::{ApiError, InputError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use input::Sdc;
pub use reporter::{Reporter, Step, TracingReporter};
pub use types::{Header, HeaderPartner, Item, ItemPricingElement, Link, Metadata};
