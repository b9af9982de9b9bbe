use fugit::TimerDurationU64;

use crate::{protocol, CommandSet};

/// Per-build settings of the engine.
#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig<const FREQ_HZ: u32> {
    pub command_set: CommandSet,
    /// Deadline from selector to response.
    pub command_timeout: TimerDurationU64<FREQ_HZ>,
    /// Reported by INFO.
    pub api_version: u8,
    /// Reported by INFO.
    pub firmware_version: u16,
}

impl<const FREQ_HZ: u32> BridgeConfig<FREQ_HZ> {
    pub const fn new(command_set: CommandSet) -> Self {
        Self {
            command_set,
            command_timeout: TimerDurationU64::<FREQ_HZ>::millis(protocol::COMMAND_TIMEOUT_MS),
            api_version: protocol::API_VERSION,
            firmware_version: protocol::FIRMWARE_VERSION,
        }
    }

    pub const fn with_versions(mut self, api_version: u8, firmware_version: u16) -> Self {
        self.api_version = api_version;
        self.firmware_version = firmware_version;
        self
    }
}

impl<const FREQ_HZ: u32> Default for BridgeConfig<FREQ_HZ> {
    fn default() -> Self {
        Self::new(CommandSet::Extended)
    }
}
