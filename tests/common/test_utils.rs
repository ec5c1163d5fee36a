//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use pcf8576::Pcf8576Driver;

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver() -> (Pcf8576Driver<MockInterface>, MockInterface) {
    let interface = MockInterface::new();
    let interface_clone = interface.clone();
    let driver = Pcf8576Driver::new(interface);
    (driver, interface_clone)
}

/// Mode-set command byte for a register value
#[allow(dead_code)]
pub fn command_for(register: u8) -> Vec<u8> {
    vec![0xC0 | (register & 0x3F)]
}
