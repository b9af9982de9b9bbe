mod i2c_error;
pub use i2c_error::HwError;

mod i2c_wraper;
pub use i2c_wraper::I2cWraper;

mod aux_pins;
pub use aux_pins::{AuxPinBank, AuxPinsA};

mod status_led;
pub use status_led::StatusLed;
