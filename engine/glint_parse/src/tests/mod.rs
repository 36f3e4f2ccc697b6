#![allow(clippy::unwrap_used)]

//! Engine-level tests driving full parses over small grammars.


use glint_grammar::{Grammar, TerminalId, TerminalSet};
use glint_text::Lexicon;

use crate::{ConsumeOutcome, Engine, EventLog, ParseEvent};

struct Run {
    outcome: ConsumeOutcome,
    events: Vec<ParseEvent>,
    offset: usize,
}

/// Parse `text` against the grammar's entry rule with the standard lexicon.
fn run(grammar: &Grammar, text: &str) -> Run {
    let lexicon = Lexicon::standard();
    let mut engine = Engine::new(grammar, &lexicon, text);
    let mut log = EventLog::new();
    let outcome = engine.parse(&mut log);
    Run {
        outcome,
        events: log.into_events(),
        offset: engine.offset(),
    }
}

/// Hidden set containing only the whitespace terminal.
fn ws() -> TerminalSet {
    TerminalSet::single(TerminalId::new(0))
}

/// (offset, len) of every surviving token event, in order.
fn tokens(events: &[ParseEvent]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Token { offset, len, .. } => Some((*offset, *len)),
            _ => None,
        })
        .collect()
}

/// Offsets of every surviving error event, in order.
fn errors(events: &[ParseEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Error { offset, .. } => Some(*offset),
            _ => None,
        })
        .collect()
}

fn placeholders(events: &[ParseEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, ParseEvent::Placeholder { .. }))
        .count()
}
