use bridge_core::BusReset;
use embedded_hal::blocking::i2c::{Read, Write};
use stm32f1xx_hal::afio::MAPR;
use stm32f1xx_hal::i2c::{BlockingI2c, DutyCycle, Mode, Pins};
use stm32f1xx_hal::pac::I2C1;
use stm32f1xx_hal::rcc::Clocks;
use stm32f1xx_hal::time::Hertz;

use super::HwError;
use crate::config;

/// Bridge side I2C port: the HAL blocking driver plus everything needed to
/// build it again on RESET.
pub struct I2cWraper<PINS> {
    i2c: Option<BlockingI2c<I2C1, PINS>>,
    mapr: MAPR,
    clocks: Clocks,
    speed: Hertz,
}

impl<PINS> I2cWraper<PINS>
where
    PINS: Pins<I2C1>,
{
    pub fn i2c1(i2c: I2C1, pins: PINS, mut mapr: MAPR, clocks: Clocks, speed: Hertz) -> Self {
        let i2c = Self::build(i2c, pins, &mut mapr, clocks, speed);
        Self {
            i2c: Some(i2c),
            mapr,
            clocks,
            speed,
        }
    }

    fn build(
        i2c: I2C1,
        pins: PINS,
        mapr: &mut MAPR,
        clocks: Clocks,
        speed: Hertz,
    ) -> BlockingI2c<I2C1, PINS> {
        // enables and resets the peripheral
        BlockingI2c::i2c1(
            i2c,
            pins,
            mapr,
            Mode::Fast {
                frequency: speed,
                duty_cycle: DutyCycle::Ratio2to1,
            },
            clocks,
            config::I2C_START_TIMEOUT_US,
            config::I2C_START_RETRIES,
            config::I2C_ADDR_TIMEOUT_US,
            config::I2C_DATA_TIMEOUT_US,
        )
    }
}

impl<PINS> Read for I2cWraper<PINS>
where
    BlockingI2c<I2C1, PINS>: Read<Error = stm32f1xx_hal::i2c::Error>,
{
    type Error = HwError;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let i2c = self.i2c.as_mut().ok_or(HwError::Unknown)?;
        i2c.read(addr, buffer).map_err(HwError::from)
    }
}

impl<PINS> Write for I2cWraper<PINS>
where
    BlockingI2c<I2C1, PINS>: Write<Error = stm32f1xx_hal::i2c::Error>,
{
    type Error = HwError;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let i2c = self.i2c.as_mut().ok_or(HwError::Unknown)?;
        i2c.write(addr, bytes).map_err(HwError::from)
    }
}

impl<PINS> BusReset for I2cWraper<PINS>
where
    PINS: Pins<I2C1>,
{
    fn reset(&mut self) {
        if let Some(i2c) = self.i2c.take() {
            let (dev, pins) = i2c.release();
            self.i2c = Some(Self::build(
                dev,
                pins,
                &mut self.mapr,
                self.clocks,
                self.speed,
            ));
            defmt::debug!("I2C1 re-initialized at {} kHz", self.speed.to_kHz());
        }
    }
}
