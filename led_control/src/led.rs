use no_std_compat::cell::Cell;

use crate::bsp::gpio::{Gpio, Level};
use crate::bsp::pwm::Pwm;

/// Led which is switched on and off directly, without dimming.
pub struct SimpleLed<'a> {
    pin: u8,
    gpio: &'a dyn Gpio,
}

impl<'a> SimpleLed<'a> {
    pub fn new(gpio: &'a dyn Gpio, pin: u8) -> Self {
        return SimpleLed { pin, gpio };
    }

    /// Configures the pin as an output. Must be called once before [SimpleLed::on]
    /// or [SimpleLed::off].
    pub fn init(&self) {
        self.gpio.configure_output(self.pin);
    }

    pub fn on(&self) {
        self.gpio.write(self.pin, Level::High);
    }

    pub fn off(&self) {
        self.gpio.write(self.pin, Level::Low);
    }
}

/// Led with a configurable brightness. [PwmLed::on] outputs the stored duty
/// cycle, [PwmLed::off] outputs 0 and keeps the stored value for the next on.
pub struct PwmLed<'a> {
    pin: u8,
    duty: Cell<u8>,
    gpio: &'a dyn Gpio,
    pwm: &'a dyn Pwm,
}

impl<'a> PwmLed<'a> {
    pub fn new(gpio: &'a dyn Gpio, pwm: &'a dyn Pwm, pin: u8, duty: u8) -> Self {
        return PwmLed {
            pin,
            duty: Cell::new(duty),
            gpio,
            pwm,
        };
    }

    /// Configures the pin, brings the PWM subsystem up and drives the pin
    /// to 0. The subsystem bring-up is shared with sibling instances.
    pub fn init(&self) {
        self.gpio.configure_output(self.pin);
        self.pwm.init();
        self.pwm.set_duty(self.pin, 0);
    }

    pub fn on(&self) {
        self.pwm.set_duty(self.pin, self.duty.get());
    }

    pub fn off(&self) {
        self.pwm.set_duty(self.pin, 0);
    }

    /// Takes effect on the next [PwmLed::on], the output is not touched here.
    pub fn set_duty(&self, duty: u8) {
        self.duty.set(duty);
    }

    pub fn get_duty(&self) -> u8 {
        return self.duty.get();
    }
}
