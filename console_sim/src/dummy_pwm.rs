use std::cell::{Cell, RefCell};

use led_control::bsp::pwm::Pwm;

const PIN_COUNT: usize = 64;

/// PWM bank which resides in memory, for simulation or testing.
/// The bring-up only flips a flag, so repeated calls from sibling
/// behaviors leave earlier configured pins intact.
pub struct DummyPwm {
    initialized: Cell<bool>,
    duties: RefCell<[u8; PIN_COUNT]>,
}

impl DummyPwm {
    /// Factory function to create a dummy PWM bank
    pub fn create() -> Self {
        return DummyPwm {
            initialized: Cell::new(false),
            duties: RefCell::new([0; PIN_COUNT]),
        };
    }

    pub fn duty(&self, pin: u8) -> u8 {
        return self.duties.borrow()[pin as usize];
    }
}

impl Pwm for DummyPwm {
    fn init(&self) {
        if self.initialized.get() {
            return;
        }
        self.initialized.set(true);
    }

    fn set_duty(&self, pin: u8, duty: u8) {
        self.duties.borrow_mut()[pin as usize] = duty;
    }
}
