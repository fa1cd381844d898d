//! Trace domain: JSON-lines recording of player ticks for determinism checks.
//!
//! Press F9 to write the recorded ticks to `trace.jsonl`.

use std::collections::VecDeque;
use std::fs;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use serde::Serialize;

use crate::controller::TickReport;
use crate::game::{ControllerTicked, Player};

#[cfg(test)]
mod tests;

/// Ten minutes at 60 ticks per second.
const MAX_TRACE_LINES: usize = 36_000;
const TRACE_FILE: &str = "trace.jsonl";

#[derive(Debug, Serialize)]
struct TraceLine<'a> {
    tick: u64,
    #[serde(flatten)]
    report: &'a TickReport,
}

/// Rolling JSON-lines record of one controller's ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct TickTrace {
    lines: VecDeque<String>,
    ticks: u64,
}

impl TickTrace {
    pub fn record(&mut self, report: &TickReport) -> Result<(), serde_json::Error> {
        let line = serde_json::to_string(&TraceLine {
            tick: self.ticks,
            report,
        })?;
        self.ticks += 1;
        if self.lines.len() == MAX_TRACE_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.ticks = 0;
    }

    pub fn to_json_lines(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

pub struct TracePlugin;

impl Plugin for TracePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickTrace>()
            .add_systems(Update, (record_player_ticks, dump_trace).chain());
    }
}

fn record_player_ticks(
    mut ticks: MessageReader<ControllerTicked>,
    players: Query<(), With<Player>>,
    mut trace: ResMut<TickTrace>,
) {
    for ticked in ticks.read() {
        if !players.contains(ticked.entity) {
            continue;
        }
        if let Err(e) = trace.record(&ticked.report) {
            warn!("Failed to record tick: {}", e);
        }
    }
}

fn dump_trace(keyboard: Res<ButtonInput<KeyCode>>, trace: Res<TickTrace>) {
    if !keyboard.just_pressed(KeyCode::F9) {
        return;
    }
    match fs::write(TRACE_FILE, trace.to_json_lines()) {
        Ok(()) => info!("Wrote {} ticks to {}", trace.len(), TRACE_FILE),
        Err(e) => warn!("Failed to write {}: {}", TRACE_FILE, e),
    }
}
