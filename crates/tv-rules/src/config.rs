//! Engine configuration.

use tv_mechanics::RngDice;

/// Settings shared by every command invocation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Characters that mark a line as a command.
    pub prefixes: Vec<char>,
    /// Largest accepted number of bonus or penalty dice.
    pub max_bias: u32,
    /// Public notice sent when a roll's details are private.
    pub hidden_notice: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            prefixes: vec!['.', '。', '/'],
            max_bias: 10,
            hidden_notice: "进行了一次暗骰".to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the command prefixes.
    pub fn with_prefixes(mut self, prefixes: &[char]) -> Self {
        self.prefixes = prefixes.to_vec();
        self
    }

    /// Set the bonus/penalty dice cap.
    pub fn with_max_bias(mut self, max_bias: u32) -> Self {
        self.max_bias = max_bias;
        self
    }

    /// Set the notice shown for hidden rolls.
    pub fn with_hidden_notice(mut self, notice: impl Into<String>) -> Self {
        self.hidden_notice = notice.into();
        self
    }

    /// A dice source honoring the configured seed.
    pub fn dice(&self) -> RngDice {
        RngDice::from_seed_option(self.seed)
    }
}
