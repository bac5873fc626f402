//! Client core for the LeadCnpj administration API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host supplies a
//! [`Transport`]; everything else, from CNPJ masking to the screen state
//! machine, is deterministic.
//!
//! # Design
//! - `LeadClient` and `CepClient` are stateless; they hold only a base URL.
//! - `LeadService` wraps the five lead operations plus the CEP lookup,
//!   logging failures and returning them unchanged.
//! - `LeadStore` holds the screen state and turns actions into effects;
//!   `Session` runs those effects through the service.
//! - Request DTOs are PascalCase, response DTOs camelCase, kept as separate
//!   types.

pub mod cep;
pub mod client;
pub mod error;
pub mod format;
pub mod http;
pub mod search;
pub mod service;
pub mod session;
pub mod store;
pub mod types;

pub use cep::{CepAddress, CepClient, CepLookup};
pub use client::LeadClient;
pub use error::{ApiError, ValidationError};
pub use format::{digits_only, format_cep, format_cnpj};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use search::filter_leads;
pub use service::LeadService;
pub use session::Session;
pub use store::{Action, Effect, Field, Intent, LeadForm, LeadStore, Mode, Outcome};
pub use types::{CreateLead, Lead, LeadId, UpdateLead};
