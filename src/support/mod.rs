pub mod defmt_log;

mod usb_link;
pub use usb_link::{LinkError, UsbLink};
