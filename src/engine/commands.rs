// src/engine/commands.rs

/// A routed line of console input.
///
/// Anything that does not start with a known command name is forwarded
/// verbatim to the server as a raw command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `start` — start the server process.
    Start,
    /// `restart` — stop then start the server process.
    Restart,
    /// `echo <msg>` — print `<msg>` back to the operator.
    Echo(String),
    /// `send <cmd>` or `> <cmd>` — send `<cmd>` to the server.
    Send(String),
    /// `load <path>` — pipe a file (or every file in a directory) to the
    /// server.
    Load(String),
    /// `run <name> [params]` — run a registered procedure.
    Run(String),
    /// Unrecognised input, forwarded as-is.
    Raw(String),
}

/// Route one line of console input.
///
/// The line is split on the first whitespace boundary; the first token
/// selects the command and the remainder is its argument. Empty lines yield
/// `None`. Exit tokens never reach this function; the console reader
/// handles them directly.
pub fn parse(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (first, rest) = match line.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (line, ""),
    };

    let command = match first {
        "start" => ConsoleCommand::Start,
        "restart" => ConsoleCommand::Restart,
        "echo" => ConsoleCommand::Echo(rest.to_string()),
        "send" | ">" => ConsoleCommand::Send(rest.to_string()),
        "load" => ConsoleCommand::Load(rest.to_string()),
        "run" => ConsoleCommand::Run(rest.to_string()),
        _ => ConsoleCommand::Raw(line.to_string()),
    };

    Some(command)
}
