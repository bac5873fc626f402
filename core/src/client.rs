//! Stateless HTTP request builder and response parser for the LeadCnpj API.
//!
//! # Design
//! `LeadClient` holds only the base address. Each CRUD operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Every request carries the JSON
//! content-type header, bodies or not.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateLead, Lead, LeadId, UpdateLead};

pub const DEFAULT_BASE_URL: &str = "https://localhost:7267/api";

/// Synchronous, stateless client for the LeadCnpj API.
#[derive(Debug, Clone)]
pub struct LeadClient {
    base_url: String,
}

impl Default for LeadClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl LeadClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, endpoint: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{endpoint}", self.base_url),
            headers: json_headers(),
            body,
        }
    }

    pub fn build_list_leads(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/LeadCnpj/GetAllLeadCnpj", None)
    }

    pub fn build_get_lead(&self, id: LeadId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/LeadCnpj/GetLeadCnpjById/{id}"), None)
    }

    pub fn build_create_lead(&self, input: &CreateLead) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/LeadCnpj/CreateLeadCnpj", Some(body)))
    }

    pub fn build_update_lead(&self, id: LeadId, input: &UpdateLead) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Put, &format!("/LeadCnpj/UpdateLeadCnpj/{id}"), Some(body)))
    }

    pub fn build_delete_lead(&self, id: LeadId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/LeadCnpj/DeleteLeadCnpj/{id}"), None)
    }

    pub fn parse_list_leads(&self, response: HttpResponse) -> Result<Vec<Lead>, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_get_lead(&self, response: HttpResponse) -> Result<Lead, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_create_lead(&self, response: HttpResponse) -> Result<Lead, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_update_lead(&self, response: HttpResponse) -> Result<Lead, ApiError> {
        check_status(&response)?;
        parse_json(&response)
    }

    pub fn parse_delete_lead(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

pub(crate) fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

pub(crate) fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = server_message(&response.body);
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::HttpError {
        status: response.status,
        message,
        body: response.body.clone(),
    })
}

/// Pull the `Message` (or `message`) string out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["Message", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|m| m.as_str()))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LeadClient {
        LeadClient::new("http://localhost:3000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const LEAD_JSON: &str = r#"{"id":1,"cnpj":"12345678000190","corporateReason":"Acme","cep":"01310100","address":"Av. Paulista","number":"1000","complement":"","neighborhood":"Bela Vista","city":"São Paulo","state":"SP"}"#;

    #[test]
    fn build_list_leads_produces_correct_request() {
        let req = client().build_list_leads();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/LeadCnpj/GetAllLeadCnpj");
        assert!(req.body.is_none());
        assert_eq!(req.headers, json_headers());
    }

    #[test]
    fn build_get_lead_produces_correct_request() {
        let req = client().build_get_lead(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/LeadCnpj/GetLeadCnpjById/42");
    }

    #[test]
    fn build_update_lead_sends_only_supplied_fields() {
        let input = UpdateLead {
            city: Some("Campinas".to_string()),
            ..UpdateLead::default()
        };
        let req = client().build_update_lead(5, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/LeadCnpj/UpdateLeadCnpj/5");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "City": "Campinas" }));
    }

    #[test]
    fn build_delete_lead_produces_correct_request() {
        let req = client().build_delete_lead(9);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/LeadCnpj/DeleteLeadCnpj/9");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = LeadClient::new("http://localhost:3000/api/");
        assert_eq!(client.build_list_leads().path, "http://localhost:3000/api/LeadCnpj/GetAllLeadCnpj");
    }

    #[test]
    fn default_points_at_local_api() {
        assert_eq!(LeadClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn any_2xx_is_accepted() {
        let lead = client().parse_create_lead(response(200, LEAD_JSON)).unwrap();
        assert_eq!(lead.id, 1);
        let lead = client().parse_create_lead(response(201, LEAD_JSON)).unwrap();
        assert_eq!(lead.cnpj, "12345678000190");
        assert!(client().parse_delete_lead(response(204, "")).is_ok());
        assert!(client().parse_delete_lead(response(200, "")).is_ok());
    }

    #[test]
    fn not_found_keeps_server_message() {
        let err = client()
            .parse_get_lead(response(404, r#"{"Message":"Lead não encontrado"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.server_message(), Some("Lead não encontrado"));
    }

    #[test]
    fn error_body_message_is_extracted() {
        let err = client()
            .parse_create_lead(response(400, r#"{"message":"CNPJ já cadastrado"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
        assert_eq!(err.server_message(), Some("CNPJ já cadastrado"));
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        let err = client().parse_list_leads(response(500, "internal error")).unwrap_err();
        assert!(err.server_message().is_none());
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_leads_bad_json() {
        let err = client().parse_list_leads(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
