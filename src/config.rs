//-----------------------------------------------------------------------------

pub const XTAL_FREQ: u32 = 8_000_000;
pub const SYSCLK_FREQ: u32 = 72_000_000;
pub const PCLK1_FREQ: u32 = 36_000_000;

//-----------------------------------------------------------------------------

// usb pull up
pub const USB_PULLUP_ACTVE_LEVEL: bool = false;

pub const USB_VID: u16 = 0x16c0;
pub const USB_PID: u16 = 0x27dd;
pub const USB_MANUFACTURER: &str = "SCTBElpa";
pub const USB_PRODUCT: &str = "I2C Adapter";

//-----------------------------------------------------------------------------

pub const SYSTICK_RATE_HZ: u32 = 1_000;

//-----------------------------------------------------------------------------

pub const I2C_SPEED_KHZ: u32 = 400;

// BlockingI2c timeouts, the whole transaction stays well below 50 ms
pub const I2C_START_TIMEOUT_US: u32 = 10_000;
pub const I2C_START_RETRIES: u8 = 5;
pub const I2C_ADDR_TIMEOUT_US: u32 = 10_000;
pub const I2C_DATA_TIMEOUT_US: u32 = 50_000;

//-----------------------------------------------------------------------------

// host link queues
pub const LINK_RX_QUEUE_SIZE: usize = 128;
pub const LINK_TX_QUEUE_SIZE: usize = 512;

//-----------------------------------------------------------------------------

// status led on PC13
pub const LED_ACTIVE_LEVEL: bool = false;

//-----------------------------------------------------------------------------

pub const API_VERSION: u8 = bridge_core::protocol::API_VERSION;
pub const FIRMWARE_VERSION: u16 = 0x0100;

#[cfg(feature = "aux-pins")]
pub const COMMAND_SET: bridge_core::CommandSet = bridge_core::CommandSet::Extended;
#[cfg(not(feature = "aux-pins"))]
pub const COMMAND_SET: bridge_core::CommandSet = bridge_core::CommandSet::Basic;

// the largest response must fit the tx queue in one piece
static_assertions::const_assert!(LINK_TX_QUEUE_SIZE >= bridge_core::protocol::READ_FRAME_MAX);
static_assertions::const_assert!(LINK_RX_QUEUE_SIZE >= 64);
