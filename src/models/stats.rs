use serde::{Deserialize, Serialize};

/// Number of runs recorded for one simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorUsage {
    #[serde(alias = "name", alias = "simulator_type")]
    pub simulator: String,
    #[serde(alias = "usage_count", alias = "total")]
    pub count: u64,
}
