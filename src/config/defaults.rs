// src/config/defaults.rs
use super::{CategoryMap, Config, ServerEntry};

/// The configuration used when no `config.json` exists yet.
///
/// Returns a fresh value on every call.
pub fn default_config() -> Config {
	let mut cfg = Config::default();

	cfg.aliases.insert("SIT".into(), vec!["QA".into(), "TEST".into()]);
	cfg.aliases.insert("UAT".into(), vec!["STAGING".into()]);
	cfg.aliases.insert("PFIX".into(), Vec::new());

	let mut sit = CategoryMap::new();
	sit.insert(
		"batches".into(),
		vec![
			ServerEntry::new("batch1", "sit-batch1.company.com").with_user("ec2-user"),
			ServerEntry::new("batch2", "sit-batch2.company.com").with_user("ec2-user"),
		],
	);
	sit.insert(
		"webapps".into(),
		vec![ServerEntry::new("web1", "sit-web1.company.com").with_user("ec2-user")],
	);

	let mut uat = CategoryMap::new();
	uat.insert(
		"batches".into(),
		vec![ServerEntry::new("batch1", "uat-batch1.company.com").with_user("ubuntu")],
	);

	let mut pfix = CategoryMap::new();
	pfix.insert(
		"webapps".into(),
		vec![ServerEntry::new("web1", "pfix-web1.company.com").with_user("ubuntu")],
	);

	cfg.servers.insert("SIT".into(), sit);
	cfg.servers.insert("UAT".into(), uat);
	cfg.servers.insert("PFIX".into(), pfix);
	cfg
}
