use std::cell::RefCell;

use led_control::bsp::gpio::{Gpio, Level};

const PIN_COUNT: usize = 64;

/// Pin bank which resides in memory, for simulation or testing
pub struct DummyGpio {
    levels: RefCell<[Level; PIN_COUNT]>,
}

impl DummyGpio {
    /// Factory function to create a dummy pin bank
    pub fn create() -> Self {
        return DummyGpio {
            levels: RefCell::new([Level::Low; PIN_COUNT]),
        };
    }

    pub fn level(&self, pin: u8) -> Level {
        return self.levels.borrow()[pin as usize];
    }
}

impl Gpio for DummyGpio {
    fn configure_output(&self, pin: u8) {
        self.levels.borrow_mut()[pin as usize] = Level::Low;
    }

    fn write(&self, pin: u8, level: Level) {
        self.levels.borrow_mut()[pin as usize] = level;
    }
}
