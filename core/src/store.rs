//! State container for the lead management screen.
//!
//! # Design
//! `LeadStore` is a reducer: user intents arrive through [`LeadStore::dispatch`]
//! and finished remote calls through [`LeadStore::resolve`]. Both mutate the
//! store and may hand back one [`Effect`], the next remote call to make. The
//! store performs no I/O, so every transition is testable with plain values.
//!
//! Modes: `List` (initial), `Form` (create when the working record has no id,
//! edit otherwise) and `View` (read-only detail). Opening a lead for view or
//! edit fetches it first; the mode only changes once the fetch succeeds.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::cep::CepLookup;
use crate::error::{ApiError, ValidationError};
use crate::format::{digits_only, format_cep, format_cnpj, CEP_DIGITS, CEP_FORMATTED_LEN, CNPJ_DIGITS};
use crate::search::filter_leads;
use crate::types::{CreateLead, Lead, LeadId, UpdateLead};

pub const LOAD_LIST_FAILED: &str = "Erro ao carregar lista de leads. Tente novamente.";
pub const LOAD_LEAD_FAILED: &str = "Erro ao carregar dados do lead. Tente novamente.";
pub const SAVE_FAILED: &str = "Erro ao salvar lead.";
pub const DELETE_FAILED: &str = "Erro ao excluir lead. Tente novamente.";
pub const CEP_LOOKUP_FAILED: &str = "Erro ao buscar endereço. Verifique o CEP e tente novamente.";

const STATE_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Form,
    View,
}

/// An editable field of the working record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Cnpj,
    CorporateReason,
    Cep,
    Address,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Cnpj,
        Field::CorporateReason,
        Field::Cep,
        Field::Address,
        Field::Number,
        Field::Complement,
        Field::Neighborhood,
        Field::City,
        Field::State,
    ];

    /// Name used in request payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Cnpj => "Cnpj",
            Field::CorporateReason => "CorporateReason",
            Field::Cep => "Cep",
            Field::Address => "Address",
            Field::Number => "Number",
            Field::Complement => "Complement",
            Field::Neighborhood => "Neighborhood",
            Field::City => "City",
            Field::State => "State",
        }
    }

    /// On-screen label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Cnpj => "CNPJ",
            Field::CorporateReason => "Razão Social",
            Field::Cep => "CEP",
            Field::Address => "Endereço",
            Field::Number => "Número",
            Field::Complement => "Complemento",
            Field::Neighborhood => "Bairro",
            Field::City => "Cidade",
            Field::State => "Estado",
        }
    }

    pub fn is_required(self) -> bool {
        self != Field::Complement
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("campo desconhecido: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the wire name, the on-screen label or a one-word alias, since
    /// the terminal splits the field name at the first space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.wire_name().to_lowercase() == wanted || f.label().to_lowercase() == wanted)
            .or(match wanted.as_str() {
                "razao" | "razão" | "razao_social" | "corporate_reason" | "name" => Some(Field::CorporateReason),
                "endereco" => Some(Field::Address),
                "numero" => Some(Field::Number),
                "uf" => Some(Field::State),
                _ => None,
            })
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The working record behind the form and the detail view. CNPJ and CEP
/// are kept formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub id: Option<LeadId>,
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

impl LeadForm {
    pub fn from_lead(lead: &Lead) -> Self {
        LeadForm {
            id: Some(lead.id),
            cnpj: format_cnpj(&lead.cnpj),
            corporate_reason: lead.corporate_reason.clone(),
            cep: format_cep(&lead.cep),
            address: lead.address.clone(),
            number: lead.number.clone(),
            complement: lead.complement.clone().unwrap_or_default(),
            neighborhood: lead.neighborhood.clone(),
            city: lead.city.clone(),
            state: lead.state.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Cnpj => &self.cnpj,
            Field::CorporateReason => &self.corporate_reason,
            Field::Cep => &self.cep,
            Field::Address => &self.address,
            Field::Number => &self.number,
            Field::Complement => &self.complement,
            Field::Neighborhood => &self.neighborhood,
            Field::City => &self.city,
            Field::State => &self.state,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Cnpj => &mut self.cnpj,
            Field::CorporateReason => &mut self.corporate_reason,
            Field::Cep => &mut self.cep,
            Field::Address => &mut self.address,
            Field::Number => &mut self.number,
            Field::Complement => &mut self.complement,
            Field::Neighborhood => &mut self.neighborhood,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
        }
    }

    /// Strip the masks and check the record before it goes out.
    pub fn to_payload(&self) -> Result<CreateLead, ValidationError> {
        let cnpj = digits_only(&self.cnpj);
        if cnpj.len() < CNPJ_DIGITS {
            return Err(ValidationError::InvalidCnpj);
        }
        if let Some(missing) = Field::ALL
            .into_iter()
            .filter(|f| f.is_required())
            .find(|f| self.get(*f).trim().is_empty())
        {
            return Err(ValidationError::MissingField(missing));
        }
        Ok(CreateLead {
            cnpj,
            corporate_reason: self.corporate_reason.trim().to_string(),
            cep: digits_only(&self.cep),
            address: self.address.trim().to_string(),
            number: self.number.trim().to_string(),
            complement: self.complement.trim().to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
        })
    }
}

/// Which screen to open once a fetched lead arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    View,
    Edit,
}

/// User intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reload,
    NewLead,
    ViewLead(LeadId),
    EditLead(LeadId),
    /// Edit the lead shown in the detail view.
    EditCurrent,
    DeleteLead(LeadId),
    Cancel,
    Back,
    Search(String),
    Input(Field, String),
    LookupCep,
    Submit,
}

/// Remote calls the store wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchAll,
    FetchLead { id: LeadId, intent: Intent },
    Create(CreateLead),
    Update { id: LeadId, input: UpdateLead },
    Delete(LeadId),
    /// Digits-only CEP.
    LookupCep(String),
}

/// Results of the calls described by [`Effect`].
#[derive(Debug)]
pub enum Outcome {
    LeadsLoaded(Result<Vec<Lead>, ApiError>),
    LeadLoaded {
        intent: Intent,
        result: Result<Lead, ApiError>,
    },
    LeadCreated(Result<Lead, ApiError>),
    LeadUpdated(Result<Lead, ApiError>),
    LeadDeleted(Result<(), ApiError>),
    CepResolved {
        cep: String,
        result: Result<CepLookup, ApiError>,
    },
}

#[derive(Debug, Clone)]
pub struct LeadStore {
    leads: Vec<Lead>,
    form: LeadForm,
    mode: Mode,
    search: String,
    is_loading: bool,
    is_saving: bool,
    error: Option<String>,
}

impl Default for LeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadStore {
    pub fn new() -> Self {
        Self {
            leads: Vec::new(),
            form: LeadForm::default(),
            mode: Mode::List,
            search: String::new(),
            is_loading: false,
            is_saving: false,
            error: None,
        }
    }

    /// Initial list load.
    pub fn start(&mut self) -> Option<Effect> {
        self.dispatch(Action::Reload)
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// The list as filtered by the current search term.
    pub fn visible_leads(&self) -> Vec<&Lead> {
        filter_leads(&self.leads, &self.search)
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match (self.mode, action) {
            (Mode::List, Action::Reload) => {
                self.is_loading = true;
                self.error = None;
                Some(Effect::FetchAll)
            }
            (Mode::List, Action::NewLead) => {
                self.form = LeadForm::default();
                self.mode = Mode::Form;
                None
            }
            (Mode::List, Action::ViewLead(id)) => self.fetch_lead(id, Intent::View),
            (Mode::List, Action::EditLead(id)) => self.fetch_lead(id, Intent::Edit),
            (Mode::View, Action::EditCurrent) => {
                let id = self.form.id?;
                self.fetch_lead(id, Intent::Edit)
            }
            (Mode::List, Action::DeleteLead(id)) => {
                self.is_loading = true;
                Some(Effect::Delete(id))
            }
            (Mode::Form, Action::Cancel) => {
                self.mode = Mode::List;
                self.form = LeadForm::default();
                self.error = None;
                None
            }
            (Mode::View, Action::Back) => {
                self.mode = Mode::List;
                self.form = LeadForm::default();
                None
            }
            (_, Action::Search(term)) => {
                self.search = term;
                None
            }
            (Mode::Form, Action::Input(field, value)) => self.input(field, &value),
            (Mode::Form, Action::LookupCep) => {
                let digits = digits_only(&self.form.cep);
                if digits.len() != CEP_DIGITS {
                    return None;
                }
                self.is_loading = true;
                Some(Effect::LookupCep(digits))
            }
            (Mode::Form, Action::Submit) => self.submit(),
            (mode, action) => {
                debug!(?mode, ?action, "action ignored in current mode");
                None
            }
        }
    }

    pub fn resolve(&mut self, outcome: Outcome) -> Option<Effect> {
        match outcome {
            Outcome::LeadsLoaded(result) => {
                self.is_loading = false;
                match result {
                    Ok(leads) => self.leads = leads,
                    Err(err) => self.fail(&err, LOAD_LIST_FAILED),
                }
                None
            }
            Outcome::LeadLoaded { intent, result } => {
                self.is_loading = false;
                match result {
                    Ok(lead) => {
                        self.form = LeadForm::from_lead(&lead);
                        self.mode = match intent {
                            Intent::View => Mode::View,
                            Intent::Edit => Mode::Form,
                        };
                    }
                    Err(err) => self.fail(&err, LOAD_LEAD_FAILED),
                }
                None
            }
            Outcome::LeadCreated(result) => {
                self.is_saving = false;
                match result {
                    Ok(lead) => {
                        self.leads.push(lead);
                        self.close_form();
                    }
                    Err(err) => self.fail(&err, SAVE_FAILED),
                }
                None
            }
            Outcome::LeadUpdated(result) => {
                self.is_saving = false;
                match result {
                    Ok(lead) => {
                        if let Some(slot) = self.leads.iter_mut().find(|l| l.id == lead.id) {
                            *slot = lead;
                        }
                        self.close_form();
                    }
                    Err(err) => self.fail(&err, SAVE_FAILED),
                }
                None
            }
            Outcome::LeadDeleted(result) => match result {
                Ok(()) => {
                    self.error = None;
                    Some(Effect::FetchAll)
                }
                Err(err) => {
                    self.is_loading = false;
                    self.fail(&err, DELETE_FAILED);
                    None
                }
            },
            Outcome::CepResolved { cep, result } => {
                self.is_loading = false;
                if self.mode != Mode::Form || digits_only(&self.form.cep) != cep {
                    debug!(%cep, "discarding stale CEP lookup");
                    return None;
                }
                match result {
                    Ok(CepLookup::Found(address)) => {
                        self.error = None;
                        self.form.cep = format_cep(&cep);
                        self.form.address = address.address;
                        self.form.neighborhood = address.neighborhood;
                        self.form.city = address.city;
                        self.form.state = address.state;
                    }
                    Ok(CepLookup::NotFound) | Err(_) => {
                        self.error = Some(CEP_LOOKUP_FAILED.to_string());
                    }
                }
                None
            }
        }
    }

    fn fetch_lead(&mut self, id: LeadId, intent: Intent) -> Option<Effect> {
        self.is_loading = true;
        self.error = None;
        Some(Effect::FetchLead { id, intent })
    }

    fn input(&mut self, field: Field, value: &str) -> Option<Effect> {
        match field {
            Field::Cnpj if self.form.is_edit() => None,
            Field::Cnpj => {
                self.form.cnpj = format_cnpj(value);
                None
            }
            Field::Cep => {
                self.form.cep = format_cep(value);
                if self.form.cep.len() != CEP_FORMATTED_LEN {
                    return None;
                }
                self.is_loading = true;
                Some(Effect::LookupCep(digits_only(&self.form.cep)))
            }
            Field::State => {
                self.form.state = value.chars().take(STATE_LEN).collect();
                None
            }
            other => {
                *self.form.slot_mut(other) = value.to_string();
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        self.error = None;
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(err.to_string());
                return None;
            }
        };
        self.is_saving = true;
        Some(match self.form.id {
            Some(id) => Effect::Update {
                id,
                input: payload.into(),
            },
            None => Effect::Create(payload),
        })
    }

    fn close_form(&mut self) {
        self.mode = Mode::List;
        self.form = LeadForm::default();
    }

    fn fail(&mut self, err: &ApiError, fallback: &str) {
        self.error = Some(err.server_message().unwrap_or(fallback).to_string());
    }
}
