use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::{
    config::{Config, ServerEntry},
    error::{Error, Result},
    prompt::Prompter,
};

/// Lower-cased environment or alias name → canonical environment name.
///
/// Rebuilt for every resolution; never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasIndex {
    map: BTreeMap<String, String>,
}

impl AliasIndex {
    /// Environments map to themselves first, then aliases to their owner,
    /// so an alias wins over a same-named environment.
    pub fn build(config: &Config) -> Self {
        let mut map = BTreeMap::new();
        for env in config.servers.keys() {
            map.insert(env.to_lowercase(), env.clone());
        }
        for (env, aliases) in &config.aliases {
            for alias in aliases {
                map.insert(alias.to_lowercase(), env.clone());
            }
        }
        Self { map }
    }

    pub fn lookup(&self, hint: &str) -> Option<&str> {
        self.map.get(&hint.to_lowercase()).map(String::as_str)
    }

    /// Distinct canonical environment names, sorted.
    pub fn environments(&self) -> Vec<String> {
        self.map
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// The outcome of a full resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<'c> {
    pub environment: String,
    pub category: String,
    pub server: &'c ServerEntry,
}

/// Walks environment → category → server, prompting only where a hint is
/// missing and more than one answer is possible.
pub struct Resolver<'c, 'p> {
    config: &'c Config,
    prompter: &'p mut dyn Prompter,
}

impl<'c, 'p> Resolver<'c, 'p> {
    pub fn new(config: &'c Config, prompter: &'p mut dyn Prompter) -> Self {
        Self { config, prompter }
    }

    pub fn resolve(
        &mut self,
        env_hint: Option<&str>,
        category_hint: Option<&str>,
    ) -> Result<Target<'c>> {
        let environment = self.environment(env_hint)?;
        let category = self.category(&environment, category_hint)?;
        let server = self.server(&environment, &category)?;
        Ok(Target {
            environment,
            category,
            server,
        })
    }

    pub fn environment(&mut self, hint: Option<&str>) -> Result<String> {
        if self.config.servers.is_empty() {
            return Err(Error::resolution("No environments configured"));
        }

        let index = AliasIndex::build(self.config);

        if let Some(hint) = non_empty(hint) {
            let env = index
                .lookup(hint)
                .ok_or_else(|| Error::resolution(format!("Unknown environment '{hint}'")))?;
            debug!("environment hint '{hint}' resolved to {env}");
            return Ok(env.to_string());
        }

        self.prompter.select("Select environment", &index.environments())
    }

    pub fn category(&mut self, env: &str, hint: Option<&str>) -> Result<String> {
        let categories = self
            .config
            .categories(env)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::resolution(format!("Environment '{env}' has no categories")))?;

        if let Some(hint) = non_empty(hint) {
            if categories.contains_key(hint) {
                return Ok(hint.to_string());
            }
            return Err(Error::resolution(format!(
                "Category '{hint}' not available for environment '{env}'"
            )));
        }

        let names: Vec<String> = categories.keys().cloned().collect();
        if let [only] = names.as_slice() {
            return Ok(only.clone());
        }
        self.prompter
            .select(&format!("Select category for {env}"), &names)
    }

    pub fn server(&mut self, env: &str, category: &str) -> Result<&'c ServerEntry> {
        let config: &'c Config = self.config;
        let entries = config
            .entries(env, category)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| Error::resolution(format!("No servers for {env}/{category}")))?;

        if let [only] = entries {
            return Ok(only);
        }

        let labels: Vec<String> = entries.iter().map(ServerEntry::label).collect();
        if has_duplicates(&labels) {
            warn!("{env}/{category} has servers with identical labels; picking one selects the first match");
        }

        let selection = self
            .prompter
            .select(&format!("Select server from {env}/{category}"), &labels)?;

        labels
            .iter()
            .position(|l| *l == selection)
            .map(|idx| &entries[idx])
            .ok_or_else(|| Error::resolution(format!("Unknown server '{selection}'")))
    }
}

fn non_empty(hint: Option<&str>) -> Option<&str> {
    hint.filter(|h| !h.is_empty())
}

fn has_duplicates(labels: &[String]) -> bool {
    let mut seen = BTreeSet::new();
    labels.iter().any(|l| !seen.insert(l))
}
