use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub cnpj: String,
    pub corporate_reason: String,
    pub cep: String,
    pub address: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLead {
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

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateLead {
    pub corporate_reason: Option<String>,
    pub cep: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Default)]
pub struct AppState {
    leads: RwLock<BTreeMap<i64, Lead>>,
    next_id: AtomicI64,
}

pub type Db = Arc<AppState>;

/// Error response in the `{"Message": ...}` shape the API uses.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(id: i64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Lead {id} não encontrado"),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "Message": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(AppState::default());
    let leads = Router::new()
        .route("/LeadCnpj/GetAllLeadCnpj", get(list_leads))
        .route("/LeadCnpj/GetLeadCnpjById/{id}", get(get_lead))
        .route("/LeadCnpj/CreateLeadCnpj", post(create_lead))
        .route("/LeadCnpj/UpdateLeadCnpj/{id}", put(update_lead))
        .route("/LeadCnpj/DeleteLeadCnpj/{id}", delete(delete_lead))
        .with_state(db);
    Router::new()
        .nest("/api", leads)
        .route("/ws/{cep}/json/", get(lookup_cep))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_leads(State(db): State<Db>) -> Json<Vec<Lead>> {
    let leads = db.leads.read().await;
    Json(leads.values().cloned().collect())
}

async fn get_lead(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Lead>, ApiFailure> {
    let leads = db.leads.read().await;
    leads.get(&id).cloned().map(Json).ok_or(ApiFailure::not_found(id))
}

async fn create_lead(
    State(db): State<Db>,
    Json(input): Json<CreateLead>,
) -> Result<(StatusCode, Json<Lead>), ApiFailure> {
    if !is_digits(&input.cnpj, 14) {
        return Err(ApiFailure::bad_request("CNPJ deve conter 14 dígitos"));
    }
    check_cep(&input.cep)?;
    for (name, value) in [
        ("CorporateReason", &input.corporate_reason),
        ("Address", &input.address),
        ("Number", &input.number),
        ("Neighborhood", &input.neighborhood),
        ("City", &input.city),
    ] {
        check_required(name, value)?;
    }
    check_state(&input.state)?;

    let mut leads = db.leads.write().await;
    if leads.values().any(|l| l.cnpj == input.cnpj) {
        return Err(ApiFailure::bad_request("CNPJ já cadastrado"));
    }
    let id = db.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let lead = Lead {
        id,
        cnpj: input.cnpj,
        corporate_reason: input.corporate_reason,
        cep: input.cep,
        address: input.address,
        number: input.number,
        complement: input.complement.filter(|c| !c.is_empty()),
        neighborhood: input.neighborhood,
        city: input.city,
        state: input.state,
    };
    leads.insert(id, lead.clone());
    tracing::info!(id, cnpj = %lead.cnpj, "lead created");
    Ok((StatusCode::CREATED, Json(lead)))
}

async fn update_lead(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateLead>,
) -> Result<Json<Lead>, ApiFailure> {
    if let Some(cep) = &input.cep {
        check_cep(cep)?;
    }
    if let Some(state) = &input.state {
        check_state(state)?;
    }
    for (name, value) in [
        ("CorporateReason", &input.corporate_reason),
        ("Address", &input.address),
        ("Number", &input.number),
        ("Neighborhood", &input.neighborhood),
        ("City", &input.city),
    ] {
        if let Some(value) = value {
            check_required(name, value)?;
        }
    }

    let mut leads = db.leads.write().await;
    let lead = leads.get_mut(&id).ok_or(ApiFailure::not_found(id))?;
    let slots = [
        (&mut lead.corporate_reason, input.corporate_reason),
        (&mut lead.cep, input.cep),
        (&mut lead.address, input.address),
        (&mut lead.number, input.number),
        (&mut lead.neighborhood, input.neighborhood),
        (&mut lead.city, input.city),
        (&mut lead.state, input.state),
    ];
    for (slot, value) in slots {
        if let Some(value) = value {
            *slot = value;
        }
    }
    if let Some(complement) = input.complement {
        lead.complement = Some(complement).filter(|c| !c.is_empty());
    }
    tracing::info!(id, "lead updated");
    Ok(Json(lead.clone()))
}

async fn delete_lead(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiFailure> {
    let mut leads = db.leads.write().await;
    leads
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ApiFailure::not_found(id))
}

/// ViaCEP stand-in: a few known codes, `{"erro": true}` for the rest.
async fn lookup_cep(Path(cep): Path<String>) -> Response {
    if !is_digits(&cep, 8) {
        return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
    }
    let known = match cep.as_str() {
        "01310100" => Some(("Avenida Paulista", "Bela Vista", "São Paulo", "SP")),
        "20040020" => Some(("Praça Pio X", "Centro", "Rio de Janeiro", "RJ")),
        "13300000" => Some(("", "", "Itu", "SP")),
        _ => None,
    };
    match known {
        Some((logradouro, bairro, localidade, uf)) => Json(json!({
            "cep": format!("{}-{}", &cep[..5], &cep[5..]),
            "logradouro": logradouro,
            "complemento": "",
            "bairro": bairro,
            "localidade": localidade,
            "uf": uf,
        }))
        .into_response(),
        None => Json(json!({ "erro": true })).into_response(),
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn check_cep(cep: &str) -> Result<(), ApiFailure> {
    if is_digits(cep, 8) {
        Ok(())
    } else {
        Err(ApiFailure::bad_request("CEP deve conter 8 dígitos"))
    }
}

fn check_state(state: &str) -> Result<(), ApiFailure> {
    if state.chars().count() == 2 {
        Ok(())
    } else {
        Err(ApiFailure::bad_request("State deve conter 2 caracteres"))
    }
}

fn check_required(name: &str, value: &str) -> Result<(), ApiFailure> {
    if value.trim().is_empty() {
        Err(ApiFailure::bad_request(format!("{name} é obrigatório")))
    } else {
        Ok(())
    }
}
