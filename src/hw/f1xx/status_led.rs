use bridge_core::{IndicatorState, StatusIndicator};
use stm32f1xx_hal::gpio::{Output, Pin, PushPull};

use crate::config;

/// Plain LED on PC13, lit for every state except `Off`.
pub struct StatusLed {
    pin: Pin<'C', 13, Output<PushPull>>,
    last: Option<IndicatorState>,
}

impl StatusLed {
    pub fn new(pin: Pin<'C', 13, Output<PushPull>>) -> Self {
        Self { pin, last: None }
    }
}

impl StatusIndicator for StatusLed {
    fn update(&mut self, state: IndicatorState) {
        if self.last == Some(state) {
            return;
        }
        self.last = Some(state);

        let on = state != IndicatorState::Off;
        if on == config::LED_ACTIVE_LEVEL {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
