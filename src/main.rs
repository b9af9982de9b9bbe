#![no_main]
#![no_std]

mod config;
mod hw;
mod support;

use defmt_rtt as _; // global logger
use panic_probe as _;

use rtic::app;

use stm32f1xx_hal::afio::AfioExt;
use stm32f1xx_hal::flash::FlashExt;
use stm32f1xx_hal::gpio::{Alternate, GpioExt, OpenDrain, PinState, PB6, PB7};
use stm32f1xx_hal::rcc::RccExt;
use stm32f1xx_hal::time::Hertz;
use stm32f1xx_hal::usb::{Peripheral, UsbBus, UsbBusType};

use stm32f1xx_hal::pac::Interrupt;

use usb_device::prelude::{UsbDevice, UsbDeviceBuilder, UsbVidPid};

use usbd_serial::SerialPort;

use bridge_core::{BridgeConfig, Dispatcher, StatusIndicator};

//-----------------------------------------------------------------------------

type BridgeI2c = hw::I2cWraper<(PB6<Alternate<OpenDrain>>, PB7<Alternate<OpenDrain>>)>;

type HostLink = support::UsbLink<{ config::LINK_RX_QUEUE_SIZE }, { config::LINK_TX_QUEUE_SIZE }>;

type BridgeDispatcher = Dispatcher<{ config::SYSTICK_RATE_HZ }>;

//-----------------------------------------------------------------------------

#[app(device = stm32f1xx_hal::pac, peripherals = true)]
mod app {
    use systick_monotonic::*;

    use super::*;

    #[shared]
    struct Shared {
        usb_device: UsbDevice<'static, UsbBusType>,
        serial: SerialPort<'static, UsbBus<Peripheral>>,
    }

    #[local]
    struct Local {
        link: HostLink,
        dispatcher: BridgeDispatcher,
        i2c: BridgeI2c,
        pins: hw::AuxPinBank,
        led: hw::StatusLed,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<{ config::SYSTICK_RATE_HZ }>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        static mut USB_BUS: Option<usb_device::bus::UsbBusAllocator<UsbBusType>> = None;

        support::defmt_log::init();
        defmt::info!("Init...");

        let mut flash = ctx.device.FLASH.constrain();
        let rcc = ctx.device.RCC.constrain();

        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpiob = ctx.device.GPIOB.split();
        let mut gpioc = ctx.device.GPIOC.split();

        let afio = ctx.device.AFIO.constrain();

        let mut usb_pull_up = gpiob.pb8.into_push_pull_output_with_state(
            &mut gpiob.crh,
            if !config::USB_PULLUP_ACTVE_LEVEL {
                PinState::High
            } else {
                PinState::Low
            },
        );

        let clocks = rcc
            .cfgr
            .use_hse(Hertz::Hz(config::XTAL_FREQ))
            .sysclk(Hertz::Hz(config::SYSCLK_FREQ))
            .pclk1(Hertz::Hz(config::PCLK1_FREQ))
            .freeze(&mut flash.acr);
        defmt::info!("Clocks: {}", defmt::Debug2Format(&clocks));

        //---------------------------------------------------------------------

        let usb = Peripheral {
            usb: ctx.device.USB,
            pin_dm: gpioa.pa11,
            pin_dp: gpioa.pa12,
        };

        unsafe {
            USB_BUS.replace(UsbBus::new(usb));
        }

        let serial = SerialPort::new(unsafe { USB_BUS.as_ref().unwrap_unchecked() });

        let usb_dev = UsbDeviceBuilder::new(
            unsafe { USB_BUS.as_ref().unwrap_unchecked() },
            UsbVidPid(config::USB_VID, config::USB_PID),
        )
        .manufacturer(config::USB_MANUFACTURER)
        .product(config::USB_PRODUCT)
        .serial_number(stm32_device_signature::device_id_hex())
        .device_class(usbd_serial::USB_CLASS_CDC)
        .build();

        defmt::info!("USB CDC device");

        //---------------------------------------------------------------------

        let i2c = hw::I2cWraper::i2c1(
            ctx.device.I2C1,
            (
                gpiob.pb6.into_alternate_open_drain(&mut gpiob.crl),
                gpiob.pb7.into_alternate_open_drain(&mut gpiob.crl),
            ),
            afio.mapr,
            clocks,
            Hertz::kHz(config::I2C_SPEED_KHZ),
        );

        defmt::info!("I2C1 at {} kHz", config::I2C_SPEED_KHZ);

        //---------------------------------------------------------------------

        let pins = hw::AuxPinBank::new(
            (
                gpioa.pa0.into_dynamic(&mut gpioa.crl),
                gpioa.pa1.into_dynamic(&mut gpioa.crl),
                gpioa.pa2.into_dynamic(&mut gpioa.crl),
                gpioa.pa3.into_dynamic(&mut gpioa.crl),
                gpioa.pa4.into_dynamic(&mut gpioa.crl),
                gpioa.pa5.into_dynamic(&mut gpioa.crl),
                gpioa.pa6.into_dynamic(&mut gpioa.crl),
                gpioa.pa7.into_dynamic(&mut gpioa.crl),
            ),
            gpioa.crl,
        );

        let mut led = hw::StatusLed::new(gpioc.pc13.into_push_pull_output(&mut gpioc.crh));
        led.update(bridge_core::IndicatorState::Off);

        //---------------------------------------------------------------------

        let bridge_config = BridgeConfig::new(config::COMMAND_SET)
            .with_versions(config::API_VERSION, config::FIRMWARE_VERSION);

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());
        // systick counts from zero once started
        let dispatcher: BridgeDispatcher =
            Dispatcher::new(bridge_config, fugit::TimerInstantU64::from_ticks(0));

        let active = dispatcher.config();
        defmt::info!(
            "Bridge: {} command set, api {}, firmware 0x{:04X}, timeout {} ms",
            defmt::Debug2Format(&active.command_set),
            active.api_version,
            active.firmware_version,
            active.command_timeout.to_millis()
        );

        //---------------------------------------------------------------------

        usb_pull_up.toggle(); // enable USB
        defmt::info!("USB enabled");

        (
            Shared {
                usb_device: usb_dev,
                serial,
            },
            Local {
                link: HostLink::new(),
                dispatcher,
                i2c,
                pins,
                led,
            },
            init::Monotonics(mono),
        )
    }

    //-------------------------------------------------------------------------

    #[task(binds = USB_HP_CAN_TX, shared = [usb_device, serial], priority = 5)]
    fn usb_tx(ctx: usb_tx::Context) {
        let mut usb_device = ctx.shared.usb_device;
        let mut serial = ctx.shared.serial;

        if (&mut usb_device, &mut serial).lock(|usb_device, serial| usb_device.poll(&mut [serial]))
        {
            cortex_m::peripheral::NVIC::mask(Interrupt::USB_HP_CAN_TX);
        }
    }

    #[task(binds = USB_LP_CAN_RX0, shared = [usb_device, serial], priority = 5)]
    fn usb_rx0(ctx: usb_rx0::Context) {
        let mut usb_device = ctx.shared.usb_device;
        let mut serial = ctx.shared.serial;

        if (&mut usb_device, &mut serial).lock(|usb_device, serial| usb_device.poll(&mut [serial]))
        {
            cortex_m::peripheral::NVIC::mask(Interrupt::USB_LP_CAN_RX0);
        }
    }

    //-------------------------------------------------------------------------

    #[idle(shared = [serial], local = [link, dispatcher, i2c, pins, led])]
    fn idle(ctx: idle::Context) -> ! {
        let mut serial = ctx.shared.serial;

        let link = ctx.local.link;
        let dispatcher = ctx.local.dispatcher;
        let i2c = ctx.local.i2c;
        let pins = ctx.local.pins;
        let led = ctx.local.led;

        loop {
            cortex_m::interrupt::free(|_| unsafe {
                cortex_m::peripheral::NVIC::unmask(Interrupt::USB_HP_CAN_TX);
                cortex_m::peripheral::NVIC::unmask(Interrupt::USB_LP_CAN_RX0);

                cortex_m::asm::wfi();
            });

            serial.lock(|serial| {
                link.push_to(serial);
                link.pull_from(serial);
            });

            let now = monotonics::MonoTimer::now();
            led.update(dispatcher.indicator(now));

            dispatcher.poll(now, link, i2c, pins);

            if link.pending_tx() > 0 {
                serial.lock(|serial| link.push_to(serial));
            }
        }
    }
}
