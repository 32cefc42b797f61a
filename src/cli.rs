use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "joltic", version, about = "Joltic SSH launcher")]
pub struct Args {
    /// Environment or alias (e.g. SIT, QA)
    pub environment: Option<String>,

    /// Category within the environment (e.g. batches)
    pub category: Option<String>,

    /// Import config from PATH, or launch the interactive wizard if PATH is omitted
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub config: Option<Option<PathBuf>>,

    /// Extra argument to forward to ssh (repeatable)
    #[arg(long = "ssh-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub ssh_args: Vec<String>,

    /// Print the resolved ssh command instead of executing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// List configured environments and servers, then exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Use plain numbered prompts instead of the line editor
    #[arg(long, default_value_t = false)]
    pub plain: bool,

    /// Log at debug level
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Do not mirror log lines to the console
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

/// What the user asked for, decided from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<'a> {
    Wizard,
    Import(&'a std::path::Path),
    List,
    Connect,
}

impl Args {
    pub fn mode(&self) -> Mode<'_> {
        match &self.config {
            Some(None) => Mode::Wizard,
            Some(Some(path)) => Mode::Import(path),
            None if self.list => Mode::List,
            None => Mode::Connect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("joltic").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn positionals_are_optional() {
        let args = parse(&[]);
        assert_eq!(args.environment, None);
        assert_eq!(args.mode(), Mode::Connect);

        let args = parse(&["qa", "batches"]);
        assert_eq!(args.environment.as_deref(), Some("qa"));
        assert_eq!(args.category.as_deref(), Some("batches"));
    }

    #[test]
    fn bare_config_flag_means_wizard() {
        assert_eq!(parse(&["--config"]).mode(), Mode::Wizard);
    }

    #[test]
    fn config_with_path_means_import() {
        let args = parse(&["--config", "servers.json"]);
        assert_eq!(args.mode(), Mode::Import(Path::new("servers.json")));
    }

    #[test]
    fn ssh_args_repeat_and_accept_dashes() {
        let args = parse(&["--ssh-arg", "-A", "--ssh-arg", "-v", "sit", "--dry-run"]);
        assert_eq!(args.ssh_args, vec!["-A".to_string(), "-v".to_string()]);
        assert_eq!(args.environment.as_deref(), Some("sit"));
        assert!(args.dry_run);
    }

    #[test]
    fn list_mode() {
        assert_eq!(parse(&["--list"]).mode(), Mode::List);
    }
}
