//! Line-driven screen session
//!
//! Reads one event per line and writes the rendered screen after each:
//!
//! ```text
//! :submit                 press the submit button
//! :control <index> <val>  change control <index>
//! :state <name>           engine reported a state
//! :info <json object>     engine reported stream info
//! :render                 render without changing anything
//! <anything else>         replace the patch text box contents
//! ```

use serde_json::Value;
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::engine::{EngineEvent, StreamInfo, StreamState, StreamingEngine};
use crate::inputs::{Binding, InputError};
use crate::screen::{Screen, ScreenEvent};

/// A parsed session line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Event(ScreenEvent),
    Render,
}

/// Parse one input line against the screen's controls
pub fn parse_line(line: &str, controls: &[Binding]) -> Result<SessionCommand, SessionError> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(SessionCommand::Event(ScreenEvent::EditPatchText(line.to_string())));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "submit" => Ok(SessionCommand::Event(ScreenEvent::SubmitPatch)),
        "render" => Ok(SessionCommand::Render),
        "state" => {
            if rest.is_empty() {
                return Err(SessionError::Usage(":state <name>"));
            }
            let state = rest
                .parse::<StreamState>()
                .unwrap_or_else(|never| match never {});
            Ok(SessionCommand::Event(ScreenEvent::Engine(EngineEvent::StateChanged(state))))
        }
        "info" => {
            let info: StreamInfo = serde_json::from_str(rest)
                .map_err(|e| SessionError::InvalidInfo(e.to_string()))?;
            Ok(SessionCommand::Event(ScreenEvent::Engine(EngineEvent::StreamInfoChanged(info))))
        }
        "control" => {
            let (index, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let index: usize = index
                .parse()
                .map_err(|_| SessionError::Usage(":control <index> <value>"))?;
            let binding = controls.get(index).ok_or(InputError::UnknownControl(index))?;
            let value: Value = binding.parse_input(raw)?;
            Ok(SessionCommand::Event(ScreenEvent::Control { index, value }))
        }
        other => Err(SessionError::UnknownCommand(other.to_string())),
    }
}

/// Drive `screen` from `reader`, rendering to `writer` after each line.
///
/// Line errors are reported inline and the session continues.
pub fn run<E, R, W>(screen: &mut Screen<E>, reader: R, writer: &mut W) -> io::Result<()>
where
    E: StreamingEngine,
    R: BufRead,
    W: Write,
{
    writeln!(writer, "{}", screen.render())?;

    for line in reader.lines() {
        let line = line?;
        let result = parse_line(&line, screen.controls()).and_then(|command| match command {
            SessionCommand::Event(event) => screen.handle(event).map_err(SessionError::from),
            SessionCommand::Render => Ok(()),
        });

        if let Err(e) = result {
            warn!(error = %e, "session line rejected");
            writeln!(writer, "! {}", e)?;
            continue;
        }
        writeln!(writer, "{}", screen.render())?;
    }
    Ok(())
}

/// Errors for session input lines
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown command ':{0}'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("stream info must be a JSON object: {0}")]
    InvalidInfo(String),

    #[error(transparent)]
    Input(#[from] InputError),
}
