// src/config/validate.rs
use serde_json::{Map, Value};

use super::Config;
use crate::error::{Error, Result};

/// Structurally check a raw JSON document and turn it into a [`Config`].
///
/// `aliases` and `servers` are optional. Errors name the offending key path.
pub fn validate(raw: &Value) -> Result<Config> {
	let Some(root) = raw.as_object() else {
		return Err(Error::config("Configuration must be a JSON object"));
	};

	if let Some(aliases) = root.get("aliases") {
		check_aliases(aliases)?;
	}
	if let Some(servers) = root.get("servers") {
		check_servers(servers)?;
	}

	serde_json::from_value(raw.clone()).map_err(|e| Error::config(format!("Invalid configuration: {e}")))
}

fn check_aliases(aliases: &Value) -> Result<()> {
	let Some(aliases) = aliases.as_object() else {
		return Err(Error::config("'aliases' must be an object"));
	};

	for (env, list) in aliases {
		let ok = list
			.as_array()
			.is_some_and(|items| items.iter().all(Value::is_string));
		if !ok {
			return Err(Error::config(format!(
				"aliases.{env}: must be a list of strings"
			)));
		}
	}
	Ok(())
}

fn check_servers(servers: &Value) -> Result<()> {
	let Some(servers) = servers.as_object() else {
		return Err(Error::config("'servers' must be an object"));
	};

	for (env, categories) in servers {
		let Some(categories) = categories.as_object() else {
			return Err(Error::config(format!(
				"servers.{env}: environment must map category names to server lists"
			)));
		};

		for (category, entries) in categories {
			let Some(entries) = entries.as_array() else {
				return Err(Error::config(format!(
					"servers.{env}.{category}: must be a list of servers"
				)));
			};

			for (idx, entry) in entries.iter().enumerate() {
				let at = format!("servers.{env}.{category}[{idx}]");
				let Some(entry) = entry.as_object() else {
					return Err(Error::config(format!("{at}: server entries must be objects")));
				};
				check_entry(&at, entry)?;
			}
		}
	}
	Ok(())
}

fn check_entry(at: &str, entry: &Map<String, Value>) -> Result<()> {
	for key in ["name", "host"] {
		match entry.get(key) {
			None | Some(Value::Null) => {
				return Err(Error::config(format!("{at}: missing '{key}'")));
			}
			Some(Value::String(s)) if s.trim().is_empty() => {
				return Err(Error::config(format!("{at}: '{key}' must not be empty")));
			}
			Some(Value::String(_)) => {}
			Some(_) => {
				return Err(Error::config(format!("{at}: '{key}' must be a string")));
			}
		}
	}

	match entry.get("user") {
		None | Some(Value::Null) | Some(Value::String(_)) => {}
		Some(_) => return Err(Error::config(format!("{at}: 'user' must be a string"))),
	}

	match entry.get("port") {
		None | Some(Value::Null) | Some(Value::String(_)) => {}
		Some(Value::Number(n)) if n.is_u64() => {}
		Some(_) => {
			return Err(Error::config(format!(
				"{at}: 'port' must be a string or a non-negative integer"
			)));
		}
	}

	Ok(())
}
