use no_std_compat::cell::Cell;

use crate::armable::Armable;
use crate::bsp::clock::Clock;
use crate::bsp::gpio::{Gpio, Level};

/// Led which blinks with a fixed period while armed.
///
/// [Armable::update] toggles the pin every period_ms / 2 milliseconds,
/// which makes a square wave with half the period on and half off. The
/// control loop has to call it at least twice per period, a slower loop
/// stretches the on and off time instead of failing.
pub struct BlinkLed<'a> {
    pin: u8,
    period_ms: Cell<u32>,
    armed: Cell<bool>,
    lit: Cell<bool>,
    last_toggle_ms: Cell<u32>,
    gpio: &'a dyn Gpio,
    clock: &'a dyn Clock,
}

impl<'a> BlinkLed<'a> {
    pub fn new(gpio: &'a dyn Gpio, clock: &'a dyn Clock, pin: u8, period_ms: u32) -> Self {
        return BlinkLed {
            pin,
            period_ms: Cell::new(period_ms),
            armed: Cell::new(false),
            lit: Cell::new(false),
            last_toggle_ms: Cell::new(0),
            gpio,
            clock,
        };
    }

    /// Disarms and configures the pin as an output. Must be called once
    /// before the control loop starts.
    pub fn init(&self) {
        self.armed.set(false);
        self.gpio.configure_output(self.pin);
    }

    /// Takes effect on the next elapsed time check, the toggle reference
    /// point is kept.
    pub fn set_period_ms(&self, period_ms: u32) {
        self.period_ms.set(period_ms);
    }

    pub fn get_period_ms(&self) -> u32 {
        return self.period_ms.get();
    }
}

impl<'a> Armable for BlinkLed<'a> {
    fn on(&self) {
        self.armed.set(true);
    }

    fn off(&self) {
        self.armed.set(false);
    }

    fn update(&self) {
        let now = self.clock.now_millis();
        if self.armed.get() {
            // wrapping_sub keeps the comparison correct across the overflow
            // of the millisecond counter
            let elapsed = now.wrapping_sub(self.last_toggle_ms.get());
            if elapsed >= self.period_ms.get() / 2 {
                let lit = !self.lit.get();
                self.lit.set(lit);
                self.gpio
                    .write(self.pin, if lit { Level::High } else { Level::Low });
                self.last_toggle_ms.set(now);
            }
        } else if self.lit.get() {
            // led is not already low
            self.lit.set(false);
            self.gpio.write(self.pin, Level::Low);
        }
    }
}
