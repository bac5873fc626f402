//! Remote-procedure wrappers over the lead API.
//!
//! Each call builds the request with [`LeadClient`], runs it through the
//! [`Transport`] and parses the body. Failures are logged with whatever
//! message the server supplied and handed back unchanged.

use tracing::{debug, error};

use crate::cep::{CepClient, CepLookup};
use crate::client::LeadClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateLead, Lead, LeadId, UpdateLead};

pub struct LeadService<T> {
    client: LeadClient,
    cep: CepClient,
    transport: T,
}

impl<T: Transport> LeadService<T> {
    pub fn new(client: LeadClient, cep: CepClient, transport: T) -> Self {
        Self {
            client,
            cep,
            transport,
        }
    }

    pub fn get_all_leads(&self) -> Result<Vec<Lead>, ApiError> {
        let result = self
            .send(self.client.build_list_leads())
            .and_then(|r| self.client.parse_list_leads(r));
        logged(result, "fetching leads")
    }

    pub fn get_lead_by_id(&self, id: LeadId) -> Result<Lead, ApiError> {
        let result = self
            .send(self.client.build_get_lead(id))
            .and_then(|r| self.client.parse_get_lead(r));
        logged(result, &format!("fetching lead {id}"))
    }

    pub fn create_lead(&self, input: &CreateLead) -> Result<Lead, ApiError> {
        let result = self
            .client
            .build_create_lead(input)
            .and_then(|req| self.send(req))
            .and_then(|r| self.client.parse_create_lead(r));
        logged(result, "creating lead")
    }

    pub fn update_lead(&self, id: LeadId, input: &UpdateLead) -> Result<Lead, ApiError> {
        let result = self
            .client
            .build_update_lead(id, input)
            .and_then(|req| self.send(req))
            .and_then(|r| self.client.parse_update_lead(r));
        logged(result, &format!("updating lead {id}"))
    }

    pub fn delete_lead(&self, id: LeadId) -> Result<(), ApiError> {
        let result = self
            .send(self.client.build_delete_lead(id))
            .and_then(|r| self.client.parse_delete_lead(r));
        logged(result, &format!("deleting lead {id}"))
    }

    pub fn lookup_cep(&self, cep: &str) -> Result<CepLookup, ApiError> {
        let result = self
            .send(self.cep.build_lookup(cep))
            .and_then(|r| self.cep.parse_lookup(r));
        logged(result, &format!("looking up CEP {cep}"))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn logged<R>(result: Result<R, ApiError>, what: &str) -> Result<R, ApiError> {
    if let Err(err) = &result {
        match err.server_message() {
            Some(message) => error!(%err, server_message = message, "error {what}"),
            None => error!(%err, "error {what}"),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays canned responses and records the requests it saw.
    struct Canned {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("no canned response left")
        }
    }

    fn reply(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn service(transport: &Canned) -> LeadService<&Canned> {
        LeadService::new(LeadClient::new("http://api"), CepClient::new("http://cep"), transport)
    }

    #[test]
    fn get_all_leads_preserves_server_order() {
        let transport = Canned::new(vec![reply(
            200,
            r#"[{"id":2,"cnpj":"2","corporateReason":"B","cep":"2","address":"a","number":"1","neighborhood":"n","city":"c","state":"SP"},
                {"id":1,"cnpj":"1","corporateReason":"A","cep":"1","address":"a","number":"1","neighborhood":"n","city":"c","state":"SP"}]"#,
        )]);
        let leads = service(&transport).get_all_leads().unwrap();
        assert_eq!(leads.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(transport.seen.borrow()[0].path, "http://api/LeadCnpj/GetAllLeadCnpj");
    }

    #[test]
    fn transport_failure_is_returned_unchanged() {
        let transport = Canned::new(vec![Err(ApiError::TransportError("refused".to_string()))]);
        let err = service(&transport).delete_lead(3).unwrap_err();
        assert!(matches!(err, ApiError::TransportError(ref m) if m == "refused"));
        assert_eq!(transport.seen.borrow()[0].method, HttpMethod::Delete);
    }

    #[test]
    fn server_rejection_carries_message() {
        let transport = Canned::new(vec![reply(400, r#"{"Message":"CNPJ já cadastrado"}"#)]);
        let input = CreateLead {
            cnpj: "12345678000190".to_string(),
            corporate_reason: "Acme".to_string(),
            cep: "01310100".to_string(),
            address: "a".to_string(),
            number: "1".to_string(),
            complement: String::new(),
            neighborhood: "n".to_string(),
            city: "c".to_string(),
            state: "SP".to_string(),
        };
        let err = service(&transport).create_lead(&input).unwrap_err();
        assert_eq!(err.server_message(), Some("CNPJ já cadastrado"));
    }

    #[test]
    fn lookup_goes_to_the_cep_service() {
        let transport = Canned::new(vec![reply(200, r#"{"erro":true}"#)]);
        let lookup = service(&transport).lookup_cep("99999-999").unwrap();
        assert_eq!(lookup, CepLookup::NotFound);
        assert_eq!(transport.seen.borrow()[0].path, "http://cep/99999999/json/");
    }
}
