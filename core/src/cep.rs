//! Postal-code lookup against a ViaCEP-compatible service.
//!
//! ViaCEP answers `200 {"erro": true}` for well-formed codes it does not
//! know, so a miss is a successful parse that yields [`CepLookup::NotFound`].
//! Payloads missing any of the four address fields are rejected instead of
//! being applied partially.

use serde::Deserialize;

use crate::client::{check_status, json_headers, parse_json};
use crate::error::ApiError;
use crate::format::digits_only;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const DEFAULT_CEP_URL: &str = "https://viacep.com.br/ws";

/// Address fields resolved from a CEP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepAddress {
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CepLookup {
    Found(CepAddress),
    NotFound,
}

#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
}

impl ViaCepPayload {
    /// ViaCEP signals a miss with `erro: true` (older versions send `"true"`).
    /// `erro: false` is a match.
    fn is_miss(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    fn into_address(self) -> Option<CepAddress> {
        let city = self.localidade.filter(|c| !c.trim().is_empty())?;
        let state = self.uf.filter(|s| !s.trim().is_empty())?;
        Some(CepAddress {
            address: self.logradouro?,
            neighborhood: self.bairro?,
            city,
            state,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CepClient {
    base_url: String,
}

impl Default for CepClient {
    fn default() -> Self {
        Self::new(DEFAULT_CEP_URL)
    }
}

impl CepClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `cep` may be formatted; only its digits go into the path.
    pub fn build_lookup(&self, cep: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{}/json/", self.base_url, digits_only(cep)),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn parse_lookup(&self, response: HttpResponse) -> Result<CepLookup, ApiError> {
        check_status(&response)?;
        let payload: ViaCepPayload = parse_json(&response)?;
        if payload.is_miss() {
            return Ok(CepLookup::NotFound);
        }
        payload
            .into_address()
            .map(CepLookup::Found)
            .ok_or_else(|| ApiError::DeserializationError("incomplete address payload".to_string()))
    }
}
