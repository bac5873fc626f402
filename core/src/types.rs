//! Wire DTOs for the LeadCnpj API.
//!
//! # Design
//! The server reads PascalCase request bodies and writes camelCase responses.
//! Request and response are therefore separate types with their own serde
//! renames; nothing infers one casing from the other. The mock-server crate
//! defines its own copies and the integration tests catch drift.

use serde::{Deserialize, Serialize};

/// Server-assigned lead identifier.
pub type LeadId = i64;

/// A lead as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub cnpj: String,
    pub corporate_reason: String,
    pub cep: String,
    pub address: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Request payload for creating a lead. CNPJ and CEP are digits only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLead {
    pub cnpj: String,
    pub corporate_reason: String,
    pub cep: String,
    pub address: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Request payload for updating a lead. Only the fields present in the JSON
/// are applied; the CNPJ cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corporate_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<CreateLead> for UpdateLead {
    fn from(lead: CreateLead) -> Self {
        UpdateLead {
            corporate_reason: Some(lead.corporate_reason),
            cep: Some(lead.cep),
            address: Some(lead.address),
            number: Some(lead.number),
            complement: Some(lead.complement),
            neighborhood: Some(lead.neighborhood),
            city: Some(lead.city),
            state: Some(lead.state),
        }
    }
}
