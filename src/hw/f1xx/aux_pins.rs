use bridge_core::{AuxPins, PinMode};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use stm32f1xx_hal::gpio::{Cr, Dynamic, Pin};

/// PA0..PA7 switched to dynamic mode, in bit order.
pub type AuxPinsA = (
    Pin<'A', 0, Dynamic>,
    Pin<'A', 1, Dynamic>,
    Pin<'A', 2, Dynamic>,
    Pin<'A', 3, Dynamic>,
    Pin<'A', 4, Dynamic>,
    Pin<'A', 5, Dynamic>,
    Pin<'A', 6, Dynamic>,
    Pin<'A', 7, Dynamic>,
);

macro_rules! with_line {
    ($bank:expr, $index:expr, |$line:ident, $cr:ident| $body:expr, else $default:expr) => {
        match $index {
            0 => {
                let ($line, $cr) = (&mut $bank.pins.0, &mut $bank.crl);
                $body
            }
            1 => {
                let ($line, $cr) = (&mut $bank.pins.1, &mut $bank.crl);
                $body
            }
            2 => {
                let ($line, $cr) = (&mut $bank.pins.2, &mut $bank.crl);
                $body
            }
            3 => {
                let ($line, $cr) = (&mut $bank.pins.3, &mut $bank.crl);
                $body
            }
            4 => {
                let ($line, $cr) = (&mut $bank.pins.4, &mut $bank.crl);
                $body
            }
            5 => {
                let ($line, $cr) = (&mut $bank.pins.5, &mut $bank.crl);
                $body
            }
            6 => {
                let ($line, $cr) = (&mut $bank.pins.6, &mut $bank.crl);
                $body
            }
            7 => {
                let ($line, $cr) = (&mut $bank.pins.7, &mut $bank.crl);
                $body
            }
            _ => $default,
        }
    };
}

/// Auxiliary pin bank on the low half of GPIOA.
///
/// Dynamic pins refuse to report their level in output mode, so output levels
/// are kept in `latch`. A level written to a pin that is not an output is
/// remembered and driven once the pin is switched to output.
pub struct AuxPinBank {
    pins: AuxPinsA,
    crl: Cr<'A', false>,
    modes: [PinMode; 8],
    latch: u8,
}

impl AuxPinBank {
    pub fn new(pins: AuxPinsA, crl: Cr<'A', false>) -> Self {
        let mut bank = Self {
            pins,
            crl,
            modes: [PinMode::InputPullDown; 8],
            latch: 0,
        };

        for index in 0..8 {
            bank.apply(index);
        }
        bank
    }

    fn apply(&mut self, index: u8) {
        let mode = self.modes[index as usize];
        let level = self.latch & (1 << index) != 0;

        with_line!(self, index, |line, cr| match mode {
            PinMode::InputPullDown => line.make_pull_down_input(cr),
            PinMode::InputPullUp => line.make_pull_up_input(cr),
            PinMode::Output => {
                line.make_push_pull_output(cr);
                drive(line, level);
            }
        }, else ())
    }

    fn drive_latched(&mut self, index: u8) {
        let level = self.latch & (1 << index) != 0;
        with_line!(self, index, |line, _cr| drive(line, level), else ())
    }

    fn sample(&mut self, index: u8) -> bool {
        with_line!(self, index, |line, _cr| InputPin::is_high(line).unwrap_or(false), else false)
    }
}

fn drive<P: OutputPin>(line: &mut P, level: bool) {
    let _ = if level { line.set_high() } else { line.set_low() };
}

impl AuxPins for AuxPinBank {
    fn set_mode(&mut self, index: u8, mode: PinMode) {
        if let Some(slot) = self.modes.get_mut(index as usize) {
            *slot = mode;
            self.apply(index);
        }
    }

    fn read_all(&mut self) -> u8 {
        let mut levels = 0u8;
        for index in 0..8u8 {
            let high = match self.modes[index as usize] {
                PinMode::Output => self.latch & (1 << index) != 0,
                _ => self.sample(index),
            };
            if high {
                levels |= 1 << index;
            }
        }
        levels
    }

    fn write_masked(&mut self, values: u8, mask: u8) {
        self.latch = (self.latch & !mask) | (values & mask);

        for index in 0..8u8 {
            if mask & (1 << index) != 0 && self.modes[index as usize] == PinMode::Output {
                self.drive_latched(index);
            }
        }
    }
}
