use std::process::Command;

use tracing::{error, info};

use crate::{
    config::ServerEntry,
    context::SSH_ENV,
    error::{Error, Result, EXIT_FAILURE},
};

pub const DEFAULT_PROGRAM: &str = "ssh";

/// `ssh [-p PORT] [EXTRA...] [USER@]HOST`
pub fn build_command(server: &ServerEntry, extra_args: &[String]) -> Result<Vec<String>> {
    build_command_with(DEFAULT_PROGRAM, server, extra_args)
}

/// Same as [`build_command`] with a different program in front.
pub fn build_command_with(program: &str, server: &ServerEntry, extra_args: &[String]) -> Result<Vec<String>> {
    let host = &server.host;
    if host.is_empty() {
        return Err(Error::Validation(format!(
            "Server definition '{}' is missing 'host'",
            server.name
        )));
    }

    let destination = match server.user.as_deref() {
        Some(user) if !user.is_empty() => format!("{user}@{host}"),
        _ => host.clone(),
    };

    let mut command = Vec::with_capacity(extra_args.len() + 4);
    command.push(program.to_string());
    if let Some(port) = server.port.as_ref().filter(|p| !p.is_unset()) {
        command.push("-p".to_string());
        command.push(port.to_string());
    }
    command.extend(extra_args.iter().cloned());
    command.push(destination);
    Ok(command)
}

/// The ssh program to launch: `$JOLTIC_SSH` or `ssh`.
pub fn program_from_env() -> String {
    std::env::var(SSH_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

/// Render a command the way a POSIX shell would accept it back.
pub fn render(command: &[String]) -> String {
    command
        .iter()
        .map(String::as_str)
        .map(quote_arg)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `command` with inherited stdio and return its exit code.
pub fn run(command: &[String]) -> i32 {
    let Some((program, args)) = command.split_first() else {
        error!("Refusing to run an empty command");
        return EXIT_FAILURE;
    };

    info!("Launching SSH command: {}", render(command));

    let status = match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(e) => {
            error!("Failed to execute {program}: {e}");
            return EXIT_FAILURE;
        }
    };

    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    EXIT_FAILURE
}

fn quote_arg(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        return s.to_string();
    }

    let mut out = String::from("'");
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
