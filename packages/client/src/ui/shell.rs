//! Execution of shell commands against the application context.

use std::fmt::Write;

use crate::{
    context::AppContext,
    domain::{AppState, Team, TeamIdFactory, View},
    error::ClientError,
};

use super::command::{Command, HELP};

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the message and keep reading
    Continue(String),
    /// Leave the shell
    Quit,
}

/// Run one command.
///
/// Mutations go through the observable store; the sync worker persists them.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<Outcome, ClientError> {
    let store = ctx.store();
    let message = match command {
        Command::Login { username, token } => {
            let name = username.to_string();
            store
                .update(|s| {
                    s.username = Some(username);
                    s.token = Some(token);
                    s.navigation = View::Teams;
                })
                .await;
            format!("logged in as {}", name)
        }
        Command::Logout => {
            store.logout().await;
            "logged out".to_string()
        }
        Command::Admin(admin) => {
            store.set_admin(admin).await;
            format!("admin {}", if admin { "on" } else { "off" })
        }
        Command::TeamNew { name, kind } => {
            let id = TeamIdFactory::generate();
            store.add_team(Team::new(id.clone(), name, kind)).await;
            format!("created team {}", id)
        }
        Command::TeamJoin { team, player } => {
            let change = store
                .update_team(&team, |t| {
                    t.add_member(player.clone());
                })
                .await?;
            match change {
                Some(_) => format!("{} joined {}", player, team),
                None => format!("{} is already on {}", player, team),
            }
        }
        Command::TeamLeave { team, player } => {
            let change = store
                .update_team(&team, |t| {
                    t.remove_member(&player);
                })
                .await?;
            match change {
                Some(_) => format!("{} left {}", player, team),
                None => format!("{} is not on {}", player, team),
            }
        }
        Command::TeamSelect(team) => {
            let message = format!("current team: {}", team);
            store.select_team(Some(team)).await;
            message
        }
        Command::TeamList => store.read(describe_teams).await,
        Command::Go(view) => {
            store.navigate(view).await;
            format!("now on {:?}", view)
        }
        Command::Connect => {
            ctx.channel().connect().await?;
            format!("channel {:?}", ctx.channel().state())
        }
        Command::Location(location) => {
            if ctx.channel().send(location) {
                format!("sent {}", location)
            } else {
                "channel not open, location dropped".to_string()
            }
        }
        Command::Show => store.read(describe_state).await,
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(message))
}

fn describe_teams(state: &AppState) -> String {
    if state.teams.is_empty() {
        return "no teams".to_string();
    }
    let mut out = String::new();
    for team in &state.teams {
        let marker = if state.current_team.as_ref() == Some(&team.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {} {} [{}] members: {}",
            marker,
            team.id,
            team.name,
            team.kind,
            team.members.join(", ")
        );
    }
    out.trim_end().to_string()
}

fn describe_state(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "username: {}",
        state
            .username
            .as_ref()
            .map_or("-".to_string(), |u| u.to_string())
    );
    let _ = writeln!(
        out,
        "session: {}",
        if state.is_logged_in() { "active" } else { "none" }
    );
    let _ = writeln!(out, "admin: {}", state.admin);
    let _ = writeln!(
        out,
        "current team: {}",
        state
            .current_team
            .as_ref()
            .map_or("-".to_string(), |t| t.to_string())
    );
    let _ = writeln!(out, "view: {:?}", state.navigation);
    out.push_str(&describe_teams(state));
    out
}
