//! Parsing of shell input lines.

use thiserror::Error;

use crate::domain::{Location, TeamId, Token, Username, ValueObjectError, View};

pub const HELP: &str = "\
Commands:
  login <username> <token>      store the session
  logout                        clear the session
  admin <on|off>                toggle admin mode
  team new <name> <type>        create a team
  team join <id> <player>       add a player to a team
  team leave <id> <player>      remove a player from a team
  team select <id>              set the current team
  team list                     list teams
  go <login|teams|game>         navigate
  connect                       open the location channel
  location <lat> <lon>          send a location
  show                          print the application state
  help                          show this message
  quit                          exit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { username: Username, token: Token },
    Logout,
    Admin(bool),
    TeamNew { name: String, kind: String },
    TeamJoin { team: TeamId, player: String },
    TeamLeave { team: TeamId, player: String },
    TeamSelect(TeamId),
    TeamList,
    Go(View),
    Connect,
    Location(Location),
    Show,
    Help,
    Quit,
}

/// Errors produced while parsing a line
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a number: {0}")]
    Number(String),

    #[error("{0}")]
    View(String),

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),
}

impl Command {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        match (head, args) {
            ("login", [username, token]) => Ok(Command::Login {
                username: Username::new(username.to_string())?,
                token: Token::new(token.to_string())?,
            }),
            ("login", _) => Err(CommandError::Usage("login <username> <token>")),
            ("logout", []) => Ok(Command::Logout),
            ("admin", ["on"]) => Ok(Command::Admin(true)),
            ("admin", ["off"]) => Ok(Command::Admin(false)),
            ("admin", _) => Err(CommandError::Usage("admin <on|off>")),
            ("team", rest) => parse_team(rest),
            ("go", [view]) => view.parse().map(Command::Go).map_err(CommandError::View),
            ("go", _) => Err(CommandError::Usage("go <login|teams|game>")),
            ("connect", []) => Ok(Command::Connect),
            ("location", [lat, lon]) => {
                let latitude = parse_number(lat)?;
                let longitude = parse_number(lon)?;
                Ok(Command::Location(Location::new(latitude, longitude)?))
            }
            ("location", _) => Err(CommandError::Usage("location <lat> <lon>")),
            ("show", []) => Ok(Command::Show),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_team(args: &[&str]) -> Result<Command, CommandError> {
    match args {
        ["new", name, kind] => Ok(Command::TeamNew {
            name: name.to_string(),
            kind: kind.to_string(),
        }),
        ["join", id, player] => Ok(Command::TeamJoin {
            team: TeamId::new(id.to_string())?,
            player: player.to_string(),
        }),
        ["leave", id, player] => Ok(Command::TeamLeave {
            team: TeamId::new(id.to_string())?,
            player: player.to_string(),
        }),
        ["select", id] => Ok(Command::TeamSelect(TeamId::new(id.to_string())?)),
        ["list"] => Ok(Command::TeamList),
        _ => Err(CommandError::Usage(
            "team <new <name> <type> | join <id> <player> | leave <id> <player> | select <id> | list>",
        )),
    }
}

fn parse_number(word: &str) -> Result<f64, CommandError> {
    word.parse()
        .map_err(|_| CommandError::Number(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        // テスト項目: login コマンドを解釈できる
        // when (操作):
        let command = Command::parse("login alice tok-1").unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::Login {
                username: Username::new("alice".to_string()).unwrap(),
                token: Token::new("tok-1".to_string()).unwrap(),
            }
        );
    }

    #[test]
    fn test_parse_team_commands() {
        // テスト項目: team サブコマンドを解釈できる
        // then (期待する結果):
        assert_eq!(
            Command::parse("team new Red city").unwrap(),
            Command::TeamNew {
                name: "Red".to_string(),
                kind: "city".to_string()
            }
        );
        assert_eq!(
            Command::parse("team join t1 p1").unwrap(),
            Command::TeamJoin {
                team: TeamId::new("t1".to_string()).unwrap(),
                player: "p1".to_string()
            }
        );
        assert_eq!(Command::parse("team list").unwrap(), Command::TeamList);
        assert!(matches!(
            Command::parse("team"),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_location() {
        // テスト項目: location コマンドは座標を検証する
        // then (期待する結果):
        assert_eq!(
            Command::parse("location 37.5 -122.25").unwrap(),
            Command::Location(Location::new(37.5, -122.25).unwrap())
        );
        assert_eq!(
            Command::parse("location north 1"),
            Err(CommandError::Number("north".to_string()))
        );
        assert_eq!(
            Command::parse("location 100 0"),
            Err(CommandError::Invalid(ValueObjectError::LatitudeOutOfRange(
                100.0
            )))
        );
    }

    #[test]
    fn test_parse_go() {
        // テスト項目: go コマンドで画面を指定できる
        // then (期待する結果):
        assert_eq!(Command::parse("go game").unwrap(), Command::Go(View::Game));
        assert!(matches!(
            Command::parse("go lobby"),
            Err(CommandError::View(_))
        ));
    }

    #[test]
    fn test_parse_empty_and_unknown() {
        // テスト項目: 空行・未知のコマンドはエラー
        // then (期待する結果):
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn test_parse_admin() {
        // テスト項目: admin on/off を解釈できる
        // then (期待する結果):
        assert_eq!(Command::parse("admin on").unwrap(), Command::Admin(true));
        assert_eq!(Command::parse("admin off").unwrap(), Command::Admin(false));
        assert!(Command::parse("admin maybe").is_err());
    }
}
