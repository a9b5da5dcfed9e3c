//! JSON-lines transport.
//!
//! Commands arrive one JSON object per line (tagged by `type`); events
//! leave one JSON object per line (tagged by `event`).

use std::io::{BufRead, Write};
use std::sync::mpsc::Sender;

use serde::Deserialize;

use fieldsim_core::commands::SimCommand;
use fieldsim_core::events::{EventSink, SimEvent};

use crate::state::LoopCommand;

/// Session-level requests that never reach the engine.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum SessionRequest {
    Sync,
    Shutdown,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IncomingMessage {
    Session(SessionRequest),
    Command(SimCommand),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<LoopCommand>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let command = match serde_json::from_str::<IncomingMessage>(line)? {
        IncomingMessage::Session(SessionRequest::Sync) => LoopCommand::Sync,
        IncomingMessage::Session(SessionRequest::Shutdown) => LoopCommand::Shutdown,
        IncomingMessage::Command(command) => LoopCommand::Sim(command),
    };
    Ok(Some(command))
}

/// Read commands from `reader` until EOF, a shutdown request, or the loop
/// going away. Malformed lines are logged and skipped.
///
/// Returns the number of commands forwarded.
pub fn forward_commands<R: BufRead>(reader: R, tx: &Sender<LoopCommand>) -> std::io::Result<usize> {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("skipping malformed command {line:?}: {err}");
                continue;
            }
        };
        let shutdown = command == LoopCommand::Shutdown;
        if tx.send(command).is_err() {
            log::warn!("simulation loop is gone, dropping input");
            break;
        }
        forwarded += 1;
        if shutdown {
            break;
        }
    }
    Ok(forwarded)
}

/// Event sink writing one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &SimEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn publish(&mut self, event: SimEvent) {
        if let Err(err) = self.write_event(&event) {
            log::error!("failed to write {} event: {err}", event.name());
        }
    }
}
