//! Per-field conversion between [`AppState`] and stored JSON values.
//!
//! An absent key and an explicit `null` both decode to the field default.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{AppState, TrackedField};

pub(crate) fn encode(field: TrackedField, state: &AppState) -> Result<Value, serde_json::Error> {
    match field {
        TrackedField::Username => serde_json::to_value(&state.username),
        TrackedField::Token => serde_json::to_value(&state.token),
        TrackedField::Admin => Ok(Value::Bool(state.admin)),
        TrackedField::CurrentTeam => serde_json::to_value(&state.current_team),
        TrackedField::Teams => serde_json::to_value(&state.teams),
    }
}

pub(crate) fn decode(
    field: TrackedField,
    value: Option<Value>,
    state: &mut AppState,
) -> Result<(), serde_json::Error> {
    match field {
        TrackedField::Username => state.username = decode_or_default(value)?,
        TrackedField::Token => state.token = decode_or_default(value)?,
        TrackedField::Admin => state.admin = decode_or_default(value)?,
        TrackedField::CurrentTeam => state.current_team = decode_or_default(value)?,
        TrackedField::Teams => state.teams = decode_or_default(value)?,
    }
    Ok(())
}

fn decode_or_default<T: DeserializeOwned + Default>(
    value: Option<Value>,
) -> Result<T, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value),
    }
}
