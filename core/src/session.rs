//! Drives a [`LeadStore`] against a [`LeadService`].
//!
//! Effects run one at a time on the caller's thread. Each outcome is fed back
//! into the store until it stops asking for work, so a delete followed by
//! its list reload completes inside a single `dispatch`.

use crate::http::Transport;
use crate::service::LeadService;
use crate::store::{Action, Effect, LeadStore, Outcome};

pub struct Session<T> {
    service: LeadService<T>,
    store: LeadStore,
}

impl<T: Transport> Session<T> {
    pub fn new(service: LeadService<T>) -> Self {
        Self {
            service,
            store: LeadStore::new(),
        }
    }

    pub fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Load the initial list.
    pub fn start(&mut self) {
        let effect = self.store.start();
        self.run(effect);
    }

    pub fn dispatch(&mut self, action: Action) {
        let effect = self.store.dispatch(action);
        self.run(effect);
    }

    fn run(&mut self, mut effect: Option<Effect>) {
        while let Some(next) = effect.take() {
            let outcome = self.perform(next);
            effect = self.store.resolve(outcome);
        }
    }

    fn perform(&self, effect: Effect) -> Outcome {
        match effect {
            Effect::FetchAll => Outcome::LeadsLoaded(self.service.get_all_leads()),
            Effect::FetchLead { id, intent } => Outcome::LeadLoaded {
                intent,
                result: self.service.get_lead_by_id(id),
            },
            Effect::Create(input) => Outcome::LeadCreated(self.service.create_lead(&input)),
            Effect::Update { id, input } => Outcome::LeadUpdated(self.service.update_lead(id, &input)),
            Effect::Delete(id) => Outcome::LeadDeleted(self.service.delete_lead(id)),
            Effect::LookupCep(cep) => {
                let result = self.service.lookup_cep(&cep);
                Outcome::CepResolved { cep, result }
            }
        }
    }
}
