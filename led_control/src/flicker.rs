use no_std_compat::cell::Cell;

use crate::armable::Armable;
use crate::bsp::clock::Clock;
use crate::bsp::gpio::Gpio;
use crate::bsp::pwm::Pwm;
use crate::bsp::rng::Rng;

/// Led which flickers with a random brightness while armed, like a candle.
///
/// Shares the timing model of [crate::blink::BlinkLed]: every
/// period_ms / 2 milliseconds [Armable::update] draws a duty cycle between
/// duty_min and duty_max, both inclusive, and writes it to the PWM output.
/// A range with duty_min >= duty_max collapses to the single value
/// duty_min and the random source is not consulted.
pub struct FlickerLed<'a> {
    pin: u8,
    period_ms: Cell<u32>,
    armed: Cell<bool>,
    duty: Cell<u8>,
    last_toggle_ms: Cell<u32>,
    duty_min: Cell<u8>,
    duty_max: Cell<u8>,
    gpio: &'a dyn Gpio,
    pwm: &'a dyn Pwm,
    clock: &'a dyn Clock,
    rng: &'a dyn Rng,
}

impl<'a> FlickerLed<'a> {
    pub fn new(
        gpio: &'a dyn Gpio,
        pwm: &'a dyn Pwm,
        clock: &'a dyn Clock,
        rng: &'a dyn Rng,
        pin: u8,
        duty_min: u8,
        duty_max: u8,
        period_ms: u32,
    ) -> Self {
        return FlickerLed {
            pin,
            period_ms: Cell::new(period_ms),
            armed: Cell::new(false),
            duty: Cell::new(0),
            last_toggle_ms: Cell::new(0),
            duty_min: Cell::new(duty_min),
            duty_max: Cell::new(duty_max),
            gpio,
            pwm,
            clock,
            rng,
        };
    }

    /// Disarms, configures the pin, brings the PWM subsystem up and drives
    /// the output to 0. The subsystem bring-up is shared with sibling
    /// instances. Must be called once before the control loop starts.
    pub fn init(&self) {
        self.armed.set(false);
        self.duty.set(0);
        self.gpio.configure_output(self.pin);
        self.pwm.init();
        self.pwm.set_duty(self.pin, 0);
    }

    /// Takes effect on the next elapsed time check, the toggle reference
    /// point is kept.
    pub fn set_period_ms(&self, period_ms: u32) {
        self.period_ms.set(period_ms);
    }

    pub fn get_period_ms(&self) -> u32 {
        return self.period_ms.get();
    }

    /// Takes effect on the next draw, no validation against duty_max.
    pub fn set_duty_min(&self, duty_min: u8) {
        self.duty_min.set(duty_min);
    }

    pub fn get_duty_min(&self) -> u8 {
        return self.duty_min.get();
    }

    /// Takes effect on the next draw, no validation against duty_min.
    pub fn set_duty_max(&self, duty_max: u8) {
        self.duty_max.set(duty_max);
    }

    pub fn get_duty_max(&self) -> u8 {
        return self.duty_max.get();
    }
}

impl<'a> Armable for FlickerLed<'a> {
    fn on(&self) {
        self.armed.set(true);
    }

    fn off(&self) {
        self.armed.set(false);
    }

    fn update(&self) {
        let now = self.clock.now_millis();
        if self.armed.get() {
            let elapsed = now.wrapping_sub(self.last_toggle_ms.get());
            if elapsed >= self.period_ms.get() / 2 {
                let min = self.duty_min.get();
                let max = self.duty_max.get();
                // a backwards range collapses to duty_min
                let duty = if min < max {
                    self.rng.random_in_range(min, max)
                } else {
                    min
                };
                self.duty.set(duty);
                self.pwm.set_duty(self.pin, duty);
                self.last_toggle_ms.set(now);
            }
        } else if self.duty.get() != 0 {
            // output is not already off
            self.duty.set(0);
            self.pwm.set_duty(self.pin, 0);
        }
    }
}
