// src/config/store.rs
use std::{
	fs,
	io::Write,
	path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{default_config, validate, Config};
use crate::{
	context::{expand_tilde, AppContext},
	error::{Error, Result},
};

/// Load the configuration.
///
/// With `path`, that file must exist and validate. Without it, the app's
/// `config.json` is used, or the built-in default when that file is absent.
pub fn load(ctx: &AppContext, path: Option<&Path>) -> Result<Config> {
	if let Some(p) = path {
		return load_from_path(&expand_tilde(p));
	}

	let user_path = ctx.config_file();
	if user_path.exists() {
		return load_from_path(&user_path);
	}

	debug!("{} not found, using built-in defaults", user_path.display());
	Ok(default_config())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
	let text = fs::read_to_string(path)
		.map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
	let raw: serde_json::Value = serde_json::from_str(&text)
		.map_err(|e| Error::config(format!("{} is not valid JSON: {e}", path.display())))?;
	validate(&raw)
}

/// Validate and write `config`, returning the file it was written to.
///
/// Defaults to the app's `config.json`.
pub fn save(config: &Config, ctx: &AppContext, path: Option<&Path>) -> Result<PathBuf> {
	let target = match path {
		Some(p) => expand_tilde(p),
		None => ctx.config_file(),
	};
	save_to_path(config, &target)?;
	info!("Configuration saved to {}", target.display());
	Ok(target)
}

/// Nothing touches the disk unless the config validates. The file is
/// replaced by rename, so readers never see a half-written document.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
	let value = serde_json::to_value(config)
		.map_err(|e| Error::config(format!("failed to serialise configuration: {e}")))?;
	validate(&value)?;

	let mut text = serde_json::to_string_pretty(config)
		.map_err(|e| Error::config(format!("failed to serialise configuration: {e}")))?;
	text.push('\n');

	let io_err = |source: std::io::Error| Error::Io {
		path: path.to_path_buf(),
		source,
	};

	let parent = match path.parent() {
		Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
		_ => PathBuf::from("."),
	};
	fs::create_dir_all(&parent).map_err(io_err)?;

	let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(io_err)?;
	tmp.write_all(text.as_bytes()).map_err(io_err)?;
	tmp.persist(path).map_err(|e| io_err(e.error))?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{Port, ServerEntry};
	use pretty_assertions::assert_eq;

	#[test]
	fn missing_user_config_yields_default() {
		let tmp = tempfile::tempdir().unwrap();
		let ctx = AppContext::at(tmp.path());
		assert_eq!(load(&ctx, None).unwrap(), default_config());
	}

	#[test]
	fn save_then_load_round_trips() {
		let tmp = tempfile::tempdir().unwrap();
		let ctx = AppContext::at(tmp.path().join("app"));

		let mut cfg = default_config();
		cfg.servers
			.get_mut("UAT")
			.unwrap()
			.insert(
				"db".into(),
				vec![ServerEntry::new("db1", "10.0.0.5")
					.with_user("pg")
					.with_port(Port::Number(2222))],
			);

		let written = save(&cfg, &ctx, None).unwrap();
		assert_eq!(written, ctx.config_file());
		assert_eq!(load(&ctx, None).unwrap(), cfg);
	}

	#[test]
	fn saved_file_is_two_space_indented_with_trailing_newline() {
		let tmp = tempfile::tempdir().unwrap();
		let path = tmp.path().join("nested").join("out.json");

		let mut cfg = Config::default();
		cfg.aliases.insert("DEV".into(), vec!["D".into()]);
		save_to_path(&cfg, &path).unwrap();

		let text = fs::read_to_string(&path).unwrap();
		assert_eq!(text, "{\n  \"aliases\": {\n    \"DEV\": [\n      \"D\"\n    ]\n  },\n  \"servers\": {}\n}\n");
	}

	#[test]
	fn invalid_config_is_never_written() {
		let tmp = tempfile::tempdir().unwrap();
		let path = tmp.path().join("config.json");
		fs::write(&path, "{}\n").unwrap();

		let mut cfg = Config::default();
		cfg.servers
			.entry("SIT".into())
			.or_default()
			.insert("web".into(), vec![ServerEntry::new("web1", "")]);

		let err = save_to_path(&cfg, &path).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
		assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
	}

	#[test]
	fn load_reports_bad_json_as_config_error() {
		let tmp = tempfile::tempdir().unwrap();
		let path = tmp.path().join("broken.json");
		fs::write(&path, "{ not json").unwrap();

		let err = load(&AppContext::at(tmp.path()), Some(&path)).unwrap_err();
		assert!(matches!(err, Error::Config(ref m) if m.contains("not valid JSON")));
	}

	#[test]
	fn load_of_missing_explicit_path_fails() {
		let tmp = tempfile::tempdir().unwrap();
		let err = load_from_path(&tmp.path().join("absent.json")).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
