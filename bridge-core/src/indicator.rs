/// Status light states. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Off,
    /// Short flash while idle
    IdleBlinkOn,
    /// A command is running or has just finished
    ActiveOn,
}

/// Stays on this long after a command starts.
const ACTIVE_HOLD_MS: u64 = 200;

/// Idle flash: on while none of these bits of the elapsed time are set,
/// i.e. 4 ms every 2048 ms.
const IDLE_BLINK_MASK: u64 = 0b111_1111_1100;

impl IndicatorState {
    pub fn evaluate(command_active: bool, ms_since_command_start: u64) -> Self {
        if command_active || ms_since_command_start < ACTIVE_HOLD_MS {
            IndicatorState::ActiveOn
        } else if ms_since_command_start & IDLE_BLINK_MASK == 0 {
            IndicatorState::IdleBlinkOn
        } else {
            IndicatorState::Off
        }
    }
}

pub trait StatusIndicator {
    fn update(&mut self, state: IndicatorState);
}
