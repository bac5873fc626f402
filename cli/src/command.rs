//! Terminal commands and their mapping onto store actions.
//!
//! Each keyword has an English and a Portuguese spelling. Whether a command
//! is available depends on the current screen; unavailable ones never reach
//! the store.

use std::str::FromStr;

use lead_core::store::UnknownField;
use lead_core::{Action, Field, LeadId, Mode};
use thiserror::Error;

pub const HELP: &str = "\
Comandos:
  list | listar                 recarrega a lista e limpa a pesquisa
  search | pesquisar <termo>    filtra por razão social ou CNPJ
  new | novo                    cadastra um novo lead
  view | ver <id>               mostra os detalhes de um lead
  edit | editar [<id>]          edita um lead (sem id: o lead em exibição)
  delete | excluir <id>         exclui um lead
  set <campo> <valor>           preenche um campo do formulário
  lookup | buscar               busca o endereço pelo CEP
  save | salvar                 salva o formulário
  cancel | cancelar             descarta o formulário
  back | voltar                 volta para a lista
  help | ajuda                  mostra esta ajuda
  quit | sair                   encerra";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    New,
    View(LeadId),
    Edit(Option<LeadId>),
    Delete(LeadId),
    Set(Field, String),
    Lookup,
    Save,
    Cancel,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("comando vazio")]
    Empty,

    #[error("comando desconhecido: {0} (digite 'help')")]
    Unknown(String),

    #[error("faltou o argumento: {0}")]
    MissingArgument(&'static str),

    #[error("id inválido: {0}")]
    InvalidId(String),

    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    #[error("'{0}' não está disponível nesta tela")]
    Unavailable(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let command = match keyword.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "list" | "listar" => Command::List,
            "search" | "pesquisar" => Command::Search(rest.to_string()),
            "new" | "novo" => Command::New,
            "view" | "ver" => Command::View(parse_id(rest)?),
            "edit" | "editar" if rest.is_empty() => Command::Edit(None),
            "edit" | "editar" => Command::Edit(Some(parse_id(rest)?)),
            "delete" | "excluir" => Command::Delete(parse_id(rest)?),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("campo"));
                }
                Command::Set(field.parse()?, value.trim().to_string())
            }
            "lookup" | "buscar" => Command::Lookup,
            "save" | "salvar" => Command::Save,
            "cancel" | "cancelar" => Command::Cancel,
            "back" | "voltar" => Command::Back,
            "help" | "ajuda" | "?" => Command::Help,
            "quit" | "exit" | "sair" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn parse_id(arg: &str) -> Result<LeadId, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument("id"));
    }
    arg.parse().map_err(|_| CommandError::InvalidId(arg.to_string()))
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Search(_) => "search",
            Command::New => "new",
            Command::View(_) => "view",
            Command::Edit(_) => "edit",
            Command::Delete(_) => "delete",
            Command::Set(..) => "set",
            Command::Lookup => "lookup",
            Command::Save => "save",
            Command::Cancel => "cancel",
            Command::Back => "back",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }

    /// Store actions for this command on the given screen. `Help` and `Quit`
    /// map to nothing; the caller handles them.
    pub fn actions(self, mode: Mode) -> Result<Vec<Action>, CommandError> {
        let name = self.name();
        let actions = match (mode, self) {
            (_, Command::Help | Command::Quit) => vec![],
            (Mode::List, Command::List) => vec![Action::Search(String::new()), Action::Reload],
            (Mode::List, Command::Search(term)) => vec![Action::Search(term)],
            (Mode::List, Command::New) => vec![Action::NewLead],
            (Mode::List, Command::View(id)) => vec![Action::ViewLead(id)],
            (Mode::List, Command::Edit(Some(id))) => vec![Action::EditLead(id)],
            (Mode::View, Command::Edit(None)) => vec![Action::EditCurrent],
            (Mode::List, Command::Delete(id)) => vec![Action::DeleteLead(id)],
            (Mode::Form, Command::Set(field, value)) => vec![Action::Input(field, value)],
            (Mode::Form, Command::Lookup) => vec![Action::LookupCep],
            (Mode::Form, Command::Save) => vec![Action::Submit],
            (Mode::Form, Command::Cancel) => vec![Action::Cancel],
            (Mode::View, Command::Back) => vec![Action::Back],
            _ => return Err(CommandError::Unavailable(name)),
        };
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_in_both_languages() {
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
        assert_eq!("NOVO".parse::<Command>().unwrap(), Command::New);
        assert_eq!("ver 3".parse::<Command>().unwrap(), Command::View(3));
        assert_eq!("edit".parse::<Command>().unwrap(), Command::Edit(None));
        assert_eq!("editar 7".parse::<Command>().unwrap(), Command::Edit(Some(7)));
        assert_eq!("sair".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn search_keeps_the_whole_term() {
        assert_eq!(
            "search  acme ltda ".parse::<Command>().unwrap(),
            Command::Search("acme ltda".to_string())
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn set_takes_field_and_rest_of_line() {
        assert_eq!(
            "set CorporateReason Acme Comércio Ltda".parse::<Command>().unwrap(),
            Command::Set(Field::CorporateReason, "Acme Comércio Ltda".to_string())
        );
        assert_eq!(
            "set razão Beta S.A.".parse::<Command>().unwrap(),
            Command::Set(Field::CorporateReason, "Beta S.A.".to_string())
        );
        assert_eq!(
            "set complemento".parse::<Command>().unwrap(),
            Command::Set(Field::Complement, String::new())
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("view".parse::<Command>(), Err(CommandError::MissingArgument("id")));
        assert_eq!("view x".parse::<Command>(), Err(CommandError::InvalidId("x".to_string())));
        assert_eq!("set".parse::<Command>(), Err(CommandError::MissingArgument("campo")));
        assert!(matches!("set foo 1".parse::<Command>(), Err(CommandError::UnknownField(_))));
        assert!(matches!("fly".parse::<Command>(), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn list_command_clears_search_and_reloads() {
        assert_eq!(
            Command::List.actions(Mode::List).unwrap(),
            vec![Action::Search(String::new()), Action::Reload]
        );
    }

    #[test]
    fn commands_are_bound_to_screens() {
        assert_eq!(Command::Save.actions(Mode::List), Err(CommandError::Unavailable("save")));
        assert_eq!(Command::Edit(None).actions(Mode::List), Err(CommandError::Unavailable("edit")));
        assert_eq!(Command::Edit(None).actions(Mode::View).unwrap(), vec![Action::EditCurrent]);
        assert_eq!(Command::Back.actions(Mode::Form), Err(CommandError::Unavailable("back")));
        assert_eq!(Command::Quit.actions(Mode::Form).unwrap(), vec![]);
    }
}
