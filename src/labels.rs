/// Default display name for the first diarized speaker (`spk_0`).
pub const DEFAULT_AGENT_LABEL: &str = "Agent";
/// Default display name for the second diarized speaker (`spk_1`).
pub const DEFAULT_CUSTOMER_LABEL: &str = "Customer";

/// Display-name overrides for the two call parties.
///
/// Read once at process start and injected into the resolver; nothing
/// else consults the environment.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    /// Display name for `spk_0` (SPEAKER_0_LABEL).
    pub agent: String,
    /// Display name for `spk_1` (SPEAKER_1_LABEL).
    pub customer: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT_LABEL.to_string(),
            customer: DEFAULT_CUSTOMER_LABEL.to_string(),
        }
    }
}

impl LabelConfig {
    /// Read the two overrides from the environment, falling back to the
    /// defaults. Never fails.
    pub fn from_env() -> Self {
        Self {
            agent: std::env::var("SPEAKER_0_LABEL")
                .unwrap_or_else(|_| DEFAULT_AGENT_LABEL.to_string()),
            customer: std::env::var("SPEAKER_1_LABEL")
                .unwrap_or_else(|_| DEFAULT_CUSTOMER_LABEL.to_string()),
        }
    }
}

/// Maps raw speaker and channel ids to display labels.
///
/// Total: every input resolves to something, unknown ids come back as
/// `[raw_id]` verbatim.
#[derive(Debug, Clone)]
pub struct NameResolver {
    config: LabelConfig,
}

impl NameResolver {
    pub fn new(config: LabelConfig) -> Self {
        Self { config }
    }

    /// Display label for a diarized speaker id (`spk_0`..`spk_9`).
    pub fn speaker_name(&self, label: &str) -> String {
        match label.strip_prefix("spk_").and_then(|n| n.parse::<u32>().ok()) {
            Some(0) => self.config.agent.clone(),
            Some(1) => self.config.customer.clone(),
            Some(n @ 2..=9) => format!("Speaker {}", n + 1),
            _ => format!("[{label}]"),
        }
    }

    /// Display label for an audio channel id (`ch_0`..`ch_3`). On call
    /// recordings channel 0 is conventionally the agent side.
    pub fn channel_name(&self, label: &str) -> String {
        match label {
            "ch_0" => "Channel 1 - Agent".to_string(),
            "ch_1" => "Channel 2 - Customer".to_string(),
            "ch_2" => "Channel 3".to_string(),
            "ch_3" => "Channel 4".to_string(),
            _ => format!("[{label}]"),
        }
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(LabelConfig::default())
    }
}
