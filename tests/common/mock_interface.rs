//! Mock interface implementation for testing the PCF8576 driver

#[cfg(feature = "async")]
use pcf8576::AsyncCommandInterface;
use pcf8576::{CommandInterface, I2C_ADDRESS_SA0_LOW};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Zero-length presence check
    Probe {
        /// Address that was probed
        address: u8,
        /// Whether a device acknowledged
        acknowledged: bool,
    },
    /// Write transaction
    Write {
        /// Address the bytes were sent to
        address: u8,
        /// Bytes of the transaction
        bytes: Vec<u8>,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Current device address
    address: u8,

    /// Addresses a simulated device answers on
    present: HashSet<u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_write: bool,
    fail_all_writes: bool,
}

impl MockState {
    fn new() -> Self {
        let mut present = HashSet::new();
        present.insert(I2C_ADDRESS_SA0_LOW);

        Self {
            address: I2C_ADDRESS_SA0_LOW,
            present,
            operations: Vec::new(),
            fail_next_write: false,
            fail_all_writes: false,
        }
    }

    fn probe(&mut self) -> Result<(), MockError> {
        let acknowledged = self.present.contains(&self.address);
        self.operations.push(Operation::Probe {
            address: self.address,
            acknowledged,
        });

        if acknowledged {
            Ok(())
        } else {
            Err(MockError::NoAcknowledge)
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), MockError> {
        if !self.present.contains(&self.address) {
            return Err(MockError::NoAcknowledge);
        }

        // Check for injected failure
        if self.fail_next_write || self.fail_all_writes {
            self.fail_next_write = false;
            return Err(MockError::Communication);
        }

        self.operations.push(Operation::Write {
            address: self.address,
            bytes: bytes.to_vec(),
        });

        Ok(())
    }
}

/// Mock interface for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock interface with a device present at 0x38
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Simulate a device answering (or not) at `address`
    #[allow(dead_code)]
    pub fn set_present(&self, address: u8, present: bool) {
        let mut state = self.state.borrow_mut();
        if present {
            state.present.insert(address);
        } else {
            state.present.remove(&address);
        }
    }

    /// Inject a write failure on the next write operation
    #[allow(dead_code)]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Fail every write until cleared
    #[allow(dead_code)]
    pub fn fail_all_writes(&self, enable: bool) {
        self.state.borrow_mut().fail_all_writes = enable;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    #[allow(dead_code)]
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Bytes of every write transaction, in order
    #[allow(dead_code)]
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Write { bytes, .. } => Some(bytes.clone()),
                Operation::Probe { .. } => None,
            })
            .collect()
    }

    /// Count probe operations
    #[allow(dead_code)]
    pub fn probe_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::Probe { .. }))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockError {
    /// No device acknowledged the address
    NoAcknowledge,
    /// Simulated communication error
    Communication,
}

impl CommandInterface for MockInterface {
    type Error = MockError;

    fn probe(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().probe()
    }

    fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.state.borrow_mut().write(bytes)
    }

    fn address(&self) -> u8 {
        self.state.borrow().address
    }

    fn set_address(&mut self, address: u8) {
        self.state.borrow_mut().address = address;
    }
}

#[cfg(feature = "async")]
impl AsyncCommandInterface for MockInterface {
    type Error = MockError;

    async fn probe(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().probe()
    }

    async fn write_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.state.borrow_mut().write(bytes)
    }

    fn address(&self) -> u8 {
        self.state.borrow().address
    }

    fn set_address(&mut self, address: u8) {
        self.state.borrow_mut().address = address;
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
