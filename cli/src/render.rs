//! Text rendering of the lead screen.

use std::fmt::{self, Write};

use lead_core::{format_cep, format_cnpj, Field, LeadStore, Mode};

pub fn render(store: &LeadStore) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = write_screen(store, &mut out);
    out
}

fn write_screen(store: &LeadStore, out: &mut String) -> fmt::Result {
    if let Some(error) = store.error() {
        writeln!(out, "[erro] {error}")?;
    }
    match store.mode() {
        Mode::List => write_list(store, out),
        Mode::Form => write_form(store, out),
        Mode::View => write_view(store, out),
    }
}

fn write_list(store: &LeadStore, out: &mut String) -> fmt::Result {
    writeln!(out, "Cadastro de Leads")?;
    if !store.search().is_empty() {
        writeln!(out, "Pesquisa: {}", store.search())?;
    }
    let visible = store.visible_leads();
    if store.is_loading() && store.leads().is_empty() {
        return writeln!(out, "Carregando leads...");
    }
    if visible.is_empty() {
        let empty = if store.search().is_empty() {
            "Nenhum lead cadastrado"
        } else {
            "Nenhum lead encontrado"
        };
        return writeln!(out, "{empty}");
    }

    let header = ["ID", "CNPJ", "Razão Social", "CEP", "Estado"].map(str::to_string);
    let rows: Vec<[String; 5]> = visible
        .iter()
        .map(|lead| {
            [
                lead.id.to_string(),
                format_cnpj(&lead.cnpj),
                lead.corporate_reason.clone(),
                format_cep(&lead.cep),
                lead.state.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    for row in std::iter::once(&header).chain(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect();
        writeln!(out, "{}", cells.join(" | ").trim_end())?;
    }
    Ok(())
}

fn write_form(store: &LeadStore, out: &mut String) -> fmt::Result {
    let form = store.form();
    let title = if form.is_edit() { "Editar Lead" } else { "Cadastrar Lead" };
    writeln!(out, "{title}")?;
    for field in Field::ALL {
        let marker = if field.is_required() { " *" } else { "" };
        let locked = if field == Field::Cnpj && form.is_edit() {
            " (somente leitura)"
        } else {
            ""
        };
        writeln!(
            out,
            "  {:<16} {}{locked}",
            format!("{}{marker}:", field.label()),
            form.get(field)
        )?;
    }
    if store.is_saving() {
        writeln!(out, "Salvando...")?;
    }
    Ok(())
}

fn write_view(store: &LeadStore, out: &mut String) -> fmt::Result {
    let form = store.form();
    writeln!(out, "Detalhes do Lead")?;
    for field in Field::ALL {
        let value = match form.get(field) {
            "" if field == Field::Complement => "-",
            value => value,
        };
        writeln!(out, "  {:<14} {value}", format!("{}:", field.label()))?;
    }
    Ok(())
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_core::{Action, Intent, Lead, Outcome};

    fn lead(id: i64, name: &str, cnpj: &str) -> Lead {
        Lead {
            id,
            cnpj: cnpj.to_string(),
            corporate_reason: name.to_string(),
            cep: "01310100".to_string(),
            address: "Avenida Paulista".to_string(),
            number: "1000".to_string(),
            complement: None,
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }
    }

    fn store_with(leads: Vec<Lead>) -> LeadStore {
        let mut store = LeadStore::new();
        store.start();
        store.resolve(Outcome::LeadsLoaded(Ok(leads)));
        store
    }

    #[test]
    fn list_shows_formatted_columns() {
        let text = render(&store_with(vec![lead(1, "Acme", "12345678000190")]));
        assert!(text.starts_with("Cadastro de Leads\n"));
        assert!(text.contains("ID | CNPJ"));
        assert!(text.contains("1  | 12.345.678/0001-90 | Acme"));
        assert!(text.contains("01310-100 | SP"));
    }

    #[test]
    fn empty_list_messages() {
        let mut store = store_with(vec![]);
        assert!(render(&store).contains("Nenhum lead cadastrado"));
        store.dispatch(Action::Search("zzz".to_string()));
        let text = render(&store);
        assert!(text.contains("Pesquisa: zzz"));
        assert!(text.contains("Nenhum lead encontrado"));
    }

    #[test]
    fn banner_comes_first() {
        let mut store = LeadStore::new();
        store.start();
        store.resolve(Outcome::LeadsLoaded(Err(lead_core::ApiError::TransportError(
            "refused".to_string(),
        ))));
        assert!(render(&store).starts_with("[erro] Erro ao carregar lista de leads."));
    }

    #[test]
    fn edit_form_marks_cnpj_read_only() {
        let mut store = store_with(vec![lead(1, "Acme", "12345678000190")]);
        store.dispatch(Action::EditLead(1));
        store.resolve(Outcome::LeadLoaded {
            intent: Intent::Edit,
            result: Ok(lead(1, "Acme", "12345678000190")),
        });
        let text = render(&store);
        assert!(text.starts_with("Editar Lead\n"));
        assert!(text.contains("12.345.678/0001-90 (somente leitura)"));
        assert!(text.contains("Complemento:"));
        assert!(text.contains("Razão Social *:"));
    }

    #[test]
    fn new_form_title() {
        let mut store = store_with(vec![]);
        store.dispatch(Action::NewLead);
        let text = render(&store);
        assert!(text.starts_with("Cadastrar Lead\n"));
        assert!(!text.contains("somente leitura"));
    }

    #[test]
    fn pending_save_is_shown_under_the_form() {
        let mut store = store_with(vec![]);
        store.dispatch(Action::NewLead);
        for (field, value) in [
            (Field::Cnpj, "12345678000190"),
            (Field::CorporateReason, "Acme"),
            (Field::Cep, "01310100"),
            (Field::Address, "Avenida Paulista"),
            (Field::Number, "1000"),
            (Field::Neighborhood, "Bela Vista"),
            (Field::City, "São Paulo"),
            (Field::State, "SP"),
        ] {
            store.dispatch(Action::Input(field, value.to_string()));
        }
        store.dispatch(Action::Submit);
        assert!(store.is_saving());
        assert!(render(&store).trim_end().ends_with("Salvando..."));
    }

    #[test]
    fn detail_view_dashes_blank_complement() {
        let mut store = store_with(vec![lead(1, "Acme", "12345678000190")]);
        store.dispatch(Action::ViewLead(1));
        store.resolve(Outcome::LeadLoaded {
            intent: Intent::View,
            result: Ok(lead(1, "Acme", "12345678000190")),
        });
        let text = render(&store);
        assert!(text.starts_with("Detalhes do Lead\n"));
        assert!(text.contains("Complemento:   -"));
        assert!(text.contains("CEP:           01310-100"));
    }

    #[test]
    fn pad_counts_characters() {
        assert_eq!(pad("Razão", 7), "Razão  ");
        assert_eq!(pad("longer", 3), "longer");
    }
}
