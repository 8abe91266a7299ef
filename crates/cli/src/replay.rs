//! Recorded turns and their replay through the policy

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use moviebot_agent::{DialoguePolicy, RandomSource};
use moviebot_core::{format_turn, AgentDialogueAct, DialogueContext, DialogueStateSnapshot};

/// A document of recorded turns: `{ "turns": [...] }`
#[derive(Debug, Deserialize)]
pub struct TurnLog {
    pub turns: Vec<RecordedTurn>,
}

/// State handed to the policy for one turn
#[derive(Debug, Deserialize)]
pub struct RecordedTurn {
    pub state: DialogueStateSnapshot,
    #[serde(default)]
    pub context: Option<DialogueContext>,
    #[serde(default)]
    pub restart: bool,
}

impl TurnLog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse turns document")
    }

    /// Read from `path`, or from stdin when no path is given
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let json = match path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read turns file {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read turns from stdin")?;
                buf
            },
        };
        Self::from_json(&json)
    }
}

/// Run every turn through the policy, writing one JSON line of acts per turn
///
/// Stops at the first invalid state or policy error.
pub fn replay<R: RandomSource, W: Write>(
    policy: &DialoguePolicy<R>,
    log: &TurnLog,
    out: &mut W,
) -> Result<usize> {
    for (index, turn) in log.turns.iter().enumerate() {
        turn.state
            .validate()
            .with_context(|| format!("Turn {} has an invalid state", index))?;

        let acts = policy
            .next_action(&turn.state, turn.context.as_ref(), turn.restart)
            .with_context(|| format!("Policy failed on turn {}", index))?;
        tracing::info!(turn = index, acts = %format_turn(&acts), "Agent response");

        write_acts(out, &acts)?;
    }
    Ok(log.turns.len())
}

fn write_acts<W: Write>(out: &mut W, acts: &[AgentDialogueAct]) -> Result<()> {
    serde_json::to_writer(&mut *out, acts).context("Failed to serialize acts")?;
    writeln!(out).context("Failed to write output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviebot_agent::FixedOrder;
    use moviebot_config::Ontology;
    use moviebot_core::AgentIntent;
    use std::sync::Arc;

    const TURNS: &str = r#"{
        "turns": [
            { "state": { "agent_requestable": ["genres", "actors"] } },
            {
                "state": {
                    "last_user_dacts": [{ "intent": "ACKNOWLEDGE" }],
                    "last_agent_dacts": [{ "intent": "WELCOME" }],
                    "agent_requestable": ["genres", "actors"],
                    "frame_CIN": { "genres": false, "actors": false }
                }
            },
            {
                "state": {
                    "last_user_dacts": [{ "intent": "BYE" }],
                    "last_agent_dacts": [{ "intent": "RECOMMEND", "params": [{ "slot": "title", "value": "Heat" }] }],
                    "agent_requestable": ["genres"],
                    "at_terminal_state": true
                },
                "context": { "recommended_items": [{ "title": "Heat" }] }
            },
            { "state": { "agent_requestable": ["genres"] }, "restart": true }
        ]
    }"#;

    fn policy() -> DialoguePolicy<FixedOrder> {
        DialoguePolicy::with_random_source(Arc::new(Ontology::default()), false, true, FixedOrder)
    }

    #[test]
    fn test_parse_turns() {
        let log = TurnLog::from_json(TURNS).unwrap();
        assert_eq!(log.turns.len(), 4);
        assert!(log.turns[3].restart);
        assert!(!log.turns[0].restart);
        assert!(log.turns[2].context.as_ref().unwrap().is_recommended("Heat"));
    }

    #[test]
    fn test_replay_writes_one_line_per_turn() {
        let log = TurnLog::from_json(TURNS).unwrap();
        let mut out = Vec::new();
        assert_eq!(replay(&policy(), &log, &mut out).unwrap(), 4);

        let lines: Vec<Vec<AgentDialogueAct>> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0][0].is(AgentIntent::Welcome));
        assert_eq!(lines[1][0].to_string(), "ELICIT(genres='')");
        assert_eq!(lines[2], vec![AgentDialogueAct::new(AgentIntent::Bye)]);
        assert!(lines[3][0].is(AgentIntent::Restart));
    }

    #[test]
    fn test_replay_rejects_invalid_state() {
        let log = TurnLog::from_json(r#"{ "turns": [{ "state": {} }] }"#).unwrap();
        let mut out = Vec::new();
        let err = replay(&policy(), &log, &mut out).unwrap_err();
        assert!(err.to_string().contains("Turn 0"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TURNS.as_bytes()).unwrap();
        let log = TurnLog::read(Some(file.path())).unwrap();
        assert_eq!(log.turns.len(), 4);

        assert!(TurnLog::read(Some(Path::new("/nonexistent/turns.json"))).is_err());
    }
}
