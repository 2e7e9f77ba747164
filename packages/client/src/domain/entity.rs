//! Core domain models for the client application state.

use serde::{Deserialize, Serialize};

use super::value_object::{TeamId, Token, Username};

/// A group of players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique team identifier
    pub id: TeamId,
    /// Display name
    pub name: String,
    /// Player identifiers, in join order
    pub members: Vec<String>,
    /// Category tag (e.g. "city", "seeker")
    #[serde(rename = "type")]
    pub kind: String,
}

impl Team {
    /// Create a new team with no members
    pub fn new(id: TeamId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            kind: kind.into(),
        }
    }

    /// Append a player unless they are already on the team.
    ///
    /// Returns `true` if the member list changed.
    pub fn add_member(&mut self, player: impl Into<String>) -> bool {
        let player = player.into();
        if self.has_member(&player) {
            return false;
        }
        self.members.push(player);
        true
    }

    /// Remove a player from the team.
    ///
    /// Returns `true` if the member list changed.
    pub fn remove_member(&mut self, player: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|p| p != player);
        self.members.len() != before
    }

    /// Check whether a player is on the team
    pub fn has_member(&self, player: &str) -> bool {
        self.members.iter().any(|p| p == player)
    }
}

/// UI navigation target. Held in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Login,
    Teams,
    Game,
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(View::Login),
            "teams" => Ok(View::Teams),
            "game" => Ok(View::Game),
            other => Err(format!("unknown view '{}'", other)),
        }
    }
}

/// Fields of [`AppState`] that are mirrored to persistent storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedField {
    Username,
    Token,
    Admin,
    CurrentTeam,
    Teams,
}

impl TrackedField {
    /// Every tracked field, in the order they are read and written.
    pub const ALL: [TrackedField; 5] = [
        TrackedField::Username,
        TrackedField::Token,
        TrackedField::Admin,
        TrackedField::CurrentTeam,
        TrackedField::Teams,
    ];

    /// Storage key for this field
    pub fn key(self) -> &'static str {
        match self {
            TrackedField::Username => "username",
            TrackedField::Token => "token",
            TrackedField::Admin => "admin",
            TrackedField::CurrentTeam => "currentTeam",
            TrackedField::Teams => "teams",
        }
    }
}

/// Snapshot of the client application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub username: Option<Username>,
    pub token: Option<Token>,
    pub admin: bool,
    /// Reference into `teams`; not an owning pointer
    pub current_team: Option<TeamId>,
    pub teams: Vec<Team>,
    pub navigation: View,
}

impl AppState {
    /// Look up a team by id
    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    /// Mutable lookup of a team by id
    pub fn team_mut(&mut self, id: &TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| &t.id == id)
    }

    /// Whether a session token is present
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Tracked fields whose value differs between `self` and `other`
    pub fn changed_fields(&self, other: &AppState) -> Vec<TrackedField> {
        TrackedField::ALL
            .into_iter()
            .filter(|field| match field {
                TrackedField::Username => self.username != other.username,
                TrackedField::Token => self.token != other.token,
                TrackedField::Admin => self.admin != other.admin,
                TrackedField::CurrentTeam => self.current_team != other.current_team,
                TrackedField::Teams => self.teams != other.teams,
            })
            .collect()
    }
}
