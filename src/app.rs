use std::{io::Write, path::Path};

use anyhow::{Context as _, Result};
use tracing::info;

use crate::{
    cli::{Args, Mode},
    command::{self, build_command_with, program_from_env, render},
    config::{self, Config},
    context::AppContext,
    error::{Error, EXIT_FAILURE, EXIT_OK},
    prompt::Prompter,
    resolve::{AliasIndex, Resolver},
    wizard::Wizard,
};

/// Map a top-level failure to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>()
        .map(Error::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

/// One invocation of joltic, wired to its collaborators.
pub struct App<'a> {
    ctx: AppContext,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
    ssh_program: String,
}

impl<'a> App<'a> {
    pub fn new(ctx: AppContext, prompter: &'a mut dyn Prompter, out: &'a mut dyn Write) -> Self {
        Self {
            ctx,
            prompter,
            out,
            ssh_program: program_from_env(),
        }
    }

    pub fn with_ssh_program(mut self, program: impl Into<String>) -> Self {
        self.ssh_program = program.into();
        self
    }

    pub fn run(&mut self, args: &Args) -> Result<i32> {
        match args.mode() {
            Mode::Wizard => {
                Wizard::new(&mut *self.prompter).run(&self.ctx, None)?;
                Ok(EXIT_OK)
            }
            Mode::Import(source) => self.import(source),
            Mode::List => {
                let cfg = config::load(&self.ctx, None).context("Unable to load configuration")?;
                write_listing(&cfg, &mut *self.out)?;
                Ok(EXIT_OK)
            }
            Mode::Connect => self.connect(args),
        }
    }

    fn import(&mut self, source: &Path) -> Result<i32> {
        let imported = config::load(&self.ctx, Some(source))
            .with_context(|| format!("Unable to load configuration from {}", source.display()))?;
        let target = config::save(&imported, &self.ctx, None).context("Unable to persist configuration")?;

        let message = format!(
            "Configuration imported from {} and stored at {}",
            source.display(),
            target.display()
        );
        writeln!(self.out, "{message}")?;
        info!("{message}");
        Ok(EXIT_OK)
    }

    fn connect(&mut self, args: &Args) -> Result<i32> {
        let cfg = config::load(&self.ctx, None).context("Unable to load configuration")?;

        let target = Resolver::new(&cfg, &mut *self.prompter)
            .resolve(args.environment.as_deref(), args.category.as_deref())?;
        info!(
            "Selected {} from {}/{}",
            target.server.name, target.environment, target.category
        );

        let argv = build_command_with(&self.ssh_program, target.server, &args.ssh_args)?;
        let rendered = render(&argv);
        info!("Resolved SSH command: {rendered}");

        if args.dry_run {
            writeln!(self.out, "{rendered}")?;
            return Ok(EXIT_OK);
        }

        Ok(command::run(&argv))
    }
}

/// Human-readable overview of every environment.
pub fn write_listing(cfg: &Config, out: &mut dyn Write) -> std::io::Result<()> {
    for env in AliasIndex::build(cfg).environments() {
        let aliases = cfg.aliases.get(&env).filter(|a| !a.is_empty());
        match aliases {
            Some(a) => writeln!(out, "{env} (aliases: {})", a.join(", "))?,
            None => writeln!(out, "{env}")?,
        }

        let Some(categories) = cfg.categories(&env).filter(|c| !c.is_empty()) else {
            writeln!(out, "  (no servers)")?;
            continue;
        };
        for (category, entries) in categories {
            writeln!(out, "  {category}")?;
            for entry in entries {
                writeln!(out, "    {}", entry.label())?;
            }
        }
    }
    Ok(())
}
