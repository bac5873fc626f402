//! In-memory lead search.
//!
//! Purely derived from the loaded list; the list itself is never reordered
//! or trimmed.

use crate::format::digits_only;
use crate::types::Lead;

/// Leads whose corporate name contains `term` (case-insensitive), or whose
/// CNPJ digits contain the digits of `term`. An empty term keeps everything.
pub fn filter_leads<'a>(leads: &'a [Lead], term: &str) -> Vec<&'a Lead> {
    let needle = term.to_lowercase();
    let needle_digits = digits_only(term);
    leads
        .iter()
        .filter(|lead| {
            lead.corporate_reason.to_lowercase().contains(&needle)
                || (!needle_digits.is_empty() && digits_only(&lead.cnpj).contains(&needle_digits))
        })
        .collect()
}
