//! Per-agent dialogue lines with a shared fallback.

use npc_core::AgentId;
use rustc_hash::FxHashMap;

/// Dialogue lines keyed by agent, falling back to a default set when an agent
/// has none of its own.
#[derive(Debug, Default)]
pub struct HintCatalog {
    per_agent: FxHashMap<AgentId, Vec<String>>,
    default_lines: Vec<String>,
}

impl HintCatalog {
    pub fn new(default_lines: Vec<String>) -> Self {
        HintCatalog { per_agent: FxHashMap::default(), default_lines }
    }

    /// Assign dedicated lines to one agent, replacing any previous set.
    pub fn set(&mut self, agent: AgentId, lines: Vec<String>) {
        self.per_agent.insert(agent, lines);
    }

    /// The lines to show for `agent`; the shared default when it has none.
    pub fn lines_for(&self, agent: AgentId) -> &[String] {
        self.per_agent
            .get(&agent)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_lines)
    }
}
