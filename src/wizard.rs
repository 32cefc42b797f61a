// src/wizard.rs

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
	config::{self, CategoryMap, Config, Port, ServerEntry},
	context::AppContext,
	error::Result,
	prompt::Prompter,
};

/// Builds a fresh configuration by asking questions.
pub struct Wizard<'p> {
	prompter: &'p mut dyn Prompter,
}

impl<'p> Wizard<'p> {
	pub fn new(prompter: &'p mut dyn Prompter) -> Self {
		Self { prompter }
	}

	/// Collect, confirm and save. Returns where the config was written, or
	/// `None` when nothing was captured or the user declined to save.
	pub fn run(&mut self, ctx: &AppContext, path: Option<&Path>) -> Result<Option<PathBuf>> {
		info!("Starting configuration wizard");
		let cfg = self.collect()?;

		if cfg.servers.is_empty() {
			warn!("No environments captured; nothing to save");
			return Ok(None);
		}

		if !self.prompter.confirm("Save this configuration?", true)? {
			info!("Configuration wizard cancelled");
			return Ok(None);
		}

		config::save(&cfg, ctx, path).map(Some)
	}

	/// Ask for environments until a blank name is entered.
	pub fn collect(&mut self) -> Result<Config> {
		let mut cfg = Config::default();

		loop {
			let env = self.prompter.text("Environment name (blank to finish)", None)?;
			let env = env.trim();
			if env.is_empty() {
				break;
			}

			let alias_text = self
				.prompter
				.text(&format!("Aliases for '{env}' (comma separated)"), Some(""))?;
			let aliases = alias_text
				.split(',')
				.map(str::trim)
				.filter(|a| !a.is_empty())
				.map(String::from)
				.collect();

			let categories = self.collect_categories(env)?;
			cfg.aliases.insert(env.to_string(), aliases);
			cfg.servers.insert(env.to_string(), categories);
		}

		Ok(cfg)
	}

	fn collect_categories(&mut self, env: &str) -> Result<CategoryMap> {
		let mut categories = CategoryMap::new();
		loop {
			let category = self
				.prompter
				.text(&format!("Category for '{env}' (blank to finish)"), None)?;
			let category = category.trim();
			if category.is_empty() {
				break;
			}
			let entries = self.collect_servers(category)?;
			categories.insert(category.to_string(), entries);
		}
		Ok(categories)
	}

	fn collect_servers(&mut self, category: &str) -> Result<Vec<ServerEntry>> {
		let mut entries = Vec::new();
		loop {
			let name = self
				.prompter
				.text(&format!("  Server label for '{category}' (blank to finish)"), None)?;
			let name = name.trim();
			if name.is_empty() {
				break;
			}

			let host = self.ask_host(name)?;
			let user = self.prompter.text("    Username (optional)", Some(""))?;
			let port = self.prompter.text("    Port (optional)", Some(""))?;

			let mut entry = ServerEntry::new(name, host);
			if !user.trim().is_empty() {
				entry.user = Some(user.trim().to_string());
			}
			if !port.trim().is_empty() {
				entry.port = Some(Port::parse(&port));
			}
			entries.push(entry);
		}
		Ok(entries)
	}

	/// A server without a host would fail validation on save, so insist.
	fn ask_host(&mut self, name: &str) -> Result<String> {
		loop {
			let host = self.prompter.text("    Hostname or IP", None)?;
			let host = host.trim();
			if !host.is_empty() {
				return Ok(host.to_string());
			}
			warn!("Server '{name}' needs a hostname");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::prompt::ScriptedPrompter;
	use pretty_assertions::assert_eq;

	#[test]
	fn collects_nested_answers() {
		let mut p = ScriptedPrompter::new([
			"SIT",             // environment
			"QA, TEST ,,",     // aliases
			"batches",         // category
			"batch1",          // server name
			"sit-batch1.corp", // host
			"ec2-user",        // user
			"2222",            // port
			"batch2",
			"sit-batch2.corp",
			"",
			"ssh-alt",
			"",                // end servers
			"",                // end categories
			"",                // end environments
		]);

		let cfg = Wizard::new(&mut p).collect().unwrap();

		assert_eq!(cfg.aliases["SIT"], vec!["QA".to_string(), "TEST".to_string()]);
		let entries = cfg.entries("SIT", "batches").unwrap();
		assert_eq!(
			entries[0],
			ServerEntry::new("batch1", "sit-batch1.corp")
				.with_user("ec2-user")
				.with_port(Port::Number(2222))
		);
		assert_eq!(
			entries[1],
			ServerEntry::new("batch2", "sit-batch2.corp").with_port(Port::Text("ssh-alt".into()))
		);
		assert_eq!(p.remaining(), 0);
	}

	#[test]
	fn blank_host_is_asked_again() {
		let mut p = ScriptedPrompter::new(["DEV", "", "apps", "api", "", "api.dev", "", "", "", "", ""]);

		let cfg = Wizard::new(&mut p).collect().unwrap();

		assert_eq!(cfg.entries("DEV", "apps").unwrap()[0].host, "api.dev");
		let host_prompts = p.asked().iter().filter(|m| m.contains("Hostname")).count();
		assert_eq!(host_prompts, 2);
	}

	#[test]
	fn nothing_captured_saves_nothing() {
		let tmp = tempfile::tempdir().unwrap();
		let ctx = AppContext::at(tmp.path());
		let mut p = ScriptedPrompter::new([""]);

		let saved = Wizard::new(&mut p).run(&ctx, None).unwrap();

		assert_eq!(saved, None);
		assert!(!ctx.config_file().exists());
		assert!(!p.asked().iter().any(|m| m.contains("Save")));
	}

	#[test]
	fn declining_confirmation_saves_nothing() {
		let tmp = tempfile::tempdir().unwrap();
		let ctx = AppContext::at(tmp.path());
		let mut p = ScriptedPrompter::new(["DEV", "", "", "", "n"]);

		let saved = Wizard::new(&mut p).run(&ctx, None).unwrap();

		assert_eq!(saved, None);
		assert!(!ctx.config_file().exists());
	}

	#[test]
	fn confirmed_config_is_saved_and_loadable() {
		let tmp = tempfile::tempdir().unwrap();
		let ctx = AppContext::at(tmp.path());
		let mut p = ScriptedPrompter::new([
			"UAT", "STAGING", "web", "web1", "uat-web1", "", "", "", "", "", "y",
		]);

		let saved = Wizard::new(&mut p).run(&ctx, None).unwrap();

		assert_eq!(saved.as_deref(), Some(ctx.config_file().as_path()));
		let loaded = config::load(&ctx, None).unwrap();
		assert_eq!(loaded.aliases["UAT"], vec!["STAGING".to_string()]);
		assert_eq!(loaded.entries("UAT", "web").unwrap()[0].host, "uat-web1");
	}
}
