// src/config/mod.rs

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod store;
pub mod validate;

pub use defaults::default_config;
pub use store::{load, load_from_path, save, save_to_path};
pub use validate::validate;

/// Environment name → alias names.
pub type AliasTable = BTreeMap<String, Vec<String>>;

/// Category name → server entries, in file order.
pub type CategoryMap = BTreeMap<String, Vec<ServerEntry>>;

/// Environment name → categories.
pub type ServerTable = BTreeMap<String, CategoryMap>;

/// A validated joltic configuration.
///
/// Only built through [`validate`] (or directly in code), so every entry is
/// known to carry a name and a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub aliases: AliasTable,

	#[serde(default)]
	pub servers: ServerTable,
}

impl Config {
	/// Categories of `env`, if the environment has any servers.
	pub fn categories(&self, env: &str) -> Option<&CategoryMap> {
		self.servers.get(env)
	}

	pub fn entries(&self, env: &str, category: &str) -> Option<&[ServerEntry]> {
		self.servers
			.get(env)
			.and_then(|cats| cats.get(category))
			.map(Vec::as_slice)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
	pub name: String,
	pub host: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub port: Option<Port>,

	/// Keys joltic does not know about, kept so hand edits survive a re-save.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl ServerEntry {
	pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			host: host.into(),
			user: None,
			port: None,
			extra: BTreeMap::new(),
		}
	}

	pub fn with_user(mut self, user: impl Into<String>) -> Self {
		self.user = Some(user.into());
		self
	}

	pub fn with_port(mut self, port: Port) -> Self {
		self.port = Some(port);
		self
	}

	/// Label shown when picking between servers.
	pub fn label(&self) -> String {
		format!("{} ({})", self.name, self.host)
	}
}

/// An ssh port as written in the config: either `22` or `"22"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
	Number(u64),
	Text(String),
}

impl Port {
	/// Parse wizard input: all-digit strings become numbers.
	pub fn parse(raw: &str) -> Self {
		let raw = raw.trim();
		if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
			if let Ok(n) = raw.parse::<u64>() {
				return Port::Number(n);
			}
		}
		Port::Text(raw.to_string())
	}

	/// `0` and blank strings mean "no port".
	pub fn is_unset(&self) -> bool {
		match self {
			Port::Number(n) => *n == 0,
			Port::Text(s) => s.trim().is_empty(),
		}
	}
}

impl fmt::Display for Port {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Port::Number(n) => write!(f, "{n}"),
			Port::Text(s) => f.write_str(s),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn port_parse_coerces_digits_only() {
		assert_eq!(Port::parse("2222"), Port::Number(2222));
		assert_eq!(Port::parse(" 22 "), Port::Number(22));
		assert_eq!(Port::parse("ssh"), Port::Text("ssh".into()));
		assert_eq!(Port::parse("-1"), Port::Text("-1".into()));
	}

	#[test]
	fn unset_ports() {
		assert!(Port::Number(0).is_unset());
		assert!(Port::Text("  ".into()).is_unset());
		assert!(!Port::Number(22).is_unset());
		assert!(!Port::Text("22".into()).is_unset());
	}

	#[test]
	fn label_is_name_and_host() {
		let entry = ServerEntry::new("web1", "sit-web1.company.com");
		assert_eq!(entry.label(), "web1 (sit-web1.company.com)");
	}

	#[test]
	fn entries_lookup() {
		let cfg = default_config();
		assert_eq!(cfg.entries("SIT", "batches").map(<[_]>::len), Some(2));
		assert!(cfg.entries("SIT", "nope").is_none());
		assert!(cfg.entries("NOPE", "batches").is_none());
	}
}
