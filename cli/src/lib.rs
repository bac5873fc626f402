//! Line-oriented terminal front end for the lead screen.
//!
//! Reads one command per line, maps it onto store actions for the current
//! screen, runs them through the [`Session`] and prints the resulting screen.

pub mod command;
pub mod config;
pub mod render;
pub mod transport;

use std::io::{self, BufRead, Write};

use lead_core::{Session, Transport};

use crate::command::{Command, HELP};
use crate::render::render;

pub use crate::config::Config;
pub use crate::transport::UreqTransport;

const PROMPT: &str = "> ";
const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este lead? (s/n) ";

/// Run the command loop until `quit` or end of input.
pub fn run<T, R, W>(session: &mut Session<T>, input: R, out: &mut W) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    session.start();
    write!(out, "{}", render(session.store()))?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        let is_delete = matches!(command, Command::Delete(_));
        let actions = match command.actions(session.store().mode()) {
            Ok(actions) => actions,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if is_delete {
            write!(out, "{CONFIRM_DELETE}")?;
            out.flush()?;
            let answer = lines.next().transpose()?.unwrap_or_default();
            if !matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes") {
                continue;
            }
        }

        for action in actions {
            tracing::debug!(?action, "dispatching");
            session.dispatch(action);
        }
        write!(out, "{}", render(session.store()))?;
    }
    Ok(())
}
