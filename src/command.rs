use std::str::FromStr;

use crate::admin::{FormKind, Mutation};

/// A user interaction with the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleStats(u64),
    ToggleScorers(u64),
    Search(String),
    SelectTeam(String),
    SetField { id: String, value: String },
    Submit(FormKind),
    Mutate(Mutation),
    Refresh,
    Show,
    Quit,
}

impl Command {
    /// Question the user must answer before this command may run.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            Command::Mutate(m) => m.confirmation(),
            _ => None,
        }
    }
}

/// A command together with the user's answer to its confirmation, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub command: Command,
    pub confirmed: bool,
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        Self {
            command,
            confirmed: false,
        }
    }
}

fn fixture_id(arg: &str) -> Result<u64, String> {
    arg.parse()
        .map_err(|_| format!("expected a fixture id, got `{arg}`"))
}

fn required<'a>(arg: &'a str, what: &str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!("missing {what}"))
    } else {
        Ok(arg)
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match verb {
            "toggle-stats" | "stats" => Ok(Command::ToggleStats(fixture_id(rest)?)),
            "toggle-scorers" | "scorers" => Ok(Command::ToggleScorers(fixture_id(rest)?)),
            "search" => Ok(Command::Search(rest.to_string())),
            "select-team" => Ok(Command::SelectTeam(rest.to_string())),
            "set" => {
                let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::SetField {
                    id: required(id, "field id")?.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "add-team" => Ok(Command::Submit(FormKind::Team)),
            "add-player" => Ok(Command::Submit(FormKind::Player)),
            "post-news" => Ok(Command::Submit(FormKind::News)),
            "delete-team" => Ok(Command::Mutate(Mutation::DeleteTeam {
                code: required(rest, "team code")?.to_string(),
            })),
            "delete-player" => {
                let (team, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::Mutate(Mutation::DeletePlayer {
                    team_code: required(team, "team code")?.to_string(),
                    name: required(name.trim(), "player name")?.to_string(),
                }))
            }
            "delete-news" => Ok(Command::Mutate(Mutation::DeleteNews {
                id: required(rest, "news id")?.to_string(),
            })),
            "refresh" => Ok(Command::Refresh),
            "show" => Ok(Command::Show),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}
