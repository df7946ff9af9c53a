#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use led_control::armable::Armable;
    use led_control::bsp::clock::Clock;
    use led_control::bsp::gpio::{Gpio, Level};
    use led_control::bsp::pwm::Pwm;
    use led_control::bsp::rng::Rng;
    use led_control::flicker::FlickerLed;

    const PIN: u8 = 5;
    const PERIOD: u32 = 100;

    #[test]
    fn init_brings_the_subsystem_up_and_drives_the_output_to_zero() {
        with_bench(10, 20, &|bench| {
            assert_eq!(bench.pwm.init_calls.get(), 1);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0)]);
        });
    }

    #[test]
    fn draws_within_the_configured_range() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(17);
            bench.led.on();

            bench.clock.set(PERIOD / 2);
            bench.led.update();

            // the collaborator was asked for the configured bounds
            assert_eq!(bench.rng.requests(), vec![(10, 20)]);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 17)]);
        });
    }

    #[test]
    fn nothing_is_drawn_before_half_a_period_elapsed() {
        with_bench(10, 20, &|bench| {
            bench.led.on();

            bench.clock.set(PERIOD / 2 - 1);
            bench.led.update();

            assert_eq!(bench.rng.requests(), vec![]);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0)]);
        });
    }

    #[test]
    fn redraws_once_per_half_period_not_once_per_update() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(12);
            bench.rng.queue(19);
            bench.led.on();

            bench.clock.set(50);
            bench.led.update();
            // polls between two boundaries draw nothing
            bench.clock.set(60);
            bench.led.update();
            bench.clock.set(70);
            bench.led.update();
            bench.clock.set(100);
            bench.led.update();

            assert_eq!(bench.rng.requests().len(), 2);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 12), (PIN, 19)]);
        });
    }

    #[test]
    fn a_fixed_range_skips_the_random_draw() {
        with_bench(33, 33, &|bench| {
            bench.led.on();

            bench.clock.set(50);
            bench.led.update();

            assert_eq!(bench.rng.requests(), vec![]);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 33)]);
        });
    }

    #[test]
    fn a_backwards_range_collapses_to_the_minimum() {
        with_bench(200, 100, &|bench| {
            bench.led.on();

            bench.clock.set(50);
            bench.led.update();

            assert_eq!(bench.rng.requests(), vec![]);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 200)]);
        });
    }

    #[test]
    fn off_converges_to_zero_on_the_next_update() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(12);
            bench.led.on();
            bench.clock.set(50);
            bench.led.update();

            bench.led.off();
            bench.clock.set(60);
            bench.led.update();

            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 12), (PIN, 0)]);
        });
    }

    #[test]
    fn converged_output_is_not_written_again() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(12);
            bench.led.on();
            bench.clock.set(50);
            bench.led.update();
            bench.led.off();
            bench.clock.set(60);
            bench.led.update();

            bench.clock.set(70);
            bench.led.update();
            bench.clock.set(5000);
            bench.led.update();

            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 12), (PIN, 0)]);
        });
    }

    #[test]
    fn rearming_draws_a_fresh_value_in_range() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(12);
            bench.rng.queue(14);
            bench.led.on();
            bench.clock.set(50);
            bench.led.update();
            bench.led.off();
            bench.clock.set(60);
            bench.led.update();

            // when armed again, the next boundary draws from the range
            bench.led.on();
            bench.clock.set(120);
            bench.led.update();

            assert_eq!(bench.rng.requests(), vec![(10, 20), (10, 20)]);
            assert_eq!(
                bench.pwm.writes(),
                vec![(PIN, 0), (PIN, 12), (PIN, 0), (PIN, 14)]
            );
        });
    }

    #[test]
    fn changing_the_bounds_applies_to_the_next_draw() {
        with_bench(10, 20, &|bench| {
            bench.rng.queue(17);
            bench.rng.queue(99);
            bench.led.on();
            bench.clock.set(50);
            bench.led.update();
            assert_eq!(bench.rng.requests(), vec![(10, 20)]);

            bench.led.set_duty_min(90);
            bench.led.set_duty_max(110);
            assert_eq!(bench.led.get_duty_min(), 90);
            assert_eq!(bench.led.get_duty_max(), 110);

            bench.clock.set(100);
            bench.led.update();

            assert_eq!(bench.rng.requests(), vec![(10, 20), (90, 110)]);
            assert_eq!(bench.pwm.writes(), vec![(PIN, 0), (PIN, 17), (PIN, 99)]);
        });
    }

    struct Bench<'a> {
        pwm: &'a FakePwm,
        clock: &'a FakeClock,
        rng: &'a FakeRng,
        led: &'a FlickerLed<'a>,
    }

    fn with_bench(duty_min: u8, duty_max: u8, block: &dyn Fn(&Bench)) {
        let gpio = FakeGpio::create();
        let pwm = FakePwm::create();
        let clock = FakeClock::create();
        let rng = FakeRng::create();
        let led = FlickerLed::new(&gpio, &pwm, &clock, &rng, PIN, duty_min, duty_max, PERIOD);
        led.init();
        block(&Bench {
            pwm: &pwm,
            clock: &clock,
            rng: &rng,
            led: &led,
        });
    }

    struct FakeGpio;

    impl FakeGpio {
        fn create() -> Self {
            return FakeGpio;
        }
    }

    impl Gpio for FakeGpio {
        fn configure_output(&self, _pin: u8) {}

        fn write(&self, _pin: u8, _level: Level) {}
    }

    struct FakePwm {
        init_calls: Cell<u32>,
        writes: RefCell<Vec<(u8, u8)>>,
    }

    impl FakePwm {
        fn create() -> Self {
            return FakePwm {
                init_calls: Cell::new(0),
                writes: RefCell::new(vec![]),
            };
        }

        fn writes(&self) -> Vec<(u8, u8)> {
            return self.writes.borrow().clone();
        }
    }

    impl Pwm for FakePwm {
        fn init(&self) {
            self.init_calls.set(self.init_calls.get() + 1);
        }

        fn set_duty(&self, pin: u8, duty: u8) {
            self.writes.borrow_mut().push((pin, duty));
        }
    }

    struct FakeClock {
        now: Cell<u32>,
    }

    impl FakeClock {
        fn create() -> Self {
            return FakeClock { now: Cell::new(0) };
        }

        fn set(&self, now_millis: u32) {
            self.now.set(now_millis);
        }
    }

    impl Clock for FakeClock {
        fn now_millis(&self) -> u32 {
            return self.now.get();
        }
    }

    /// Rng which replays queued values and records the requested bounds
    struct FakeRng {
        queued: RefCell<Vec<u8>>,
        requests: RefCell<Vec<(u8, u8)>>,
    }

    impl FakeRng {
        fn create() -> Self {
            return FakeRng {
                queued: RefCell::new(vec![]),
                requests: RefCell::new(vec![]),
            };
        }

        fn queue(&self, value: u8) {
            self.queued.borrow_mut().push(value);
        }

        fn requests(&self) -> Vec<(u8, u8)> {
            return self.requests.borrow().clone();
        }
    }

    impl Rng for FakeRng {
        fn random_in_range(&self, min: u8, max: u8) -> u8 {
            self.requests.borrow_mut().push((min, max));
            assert!(
                !self.queued.borrow().is_empty(),
                "no queued random values left"
            );
            return self.queued.borrow_mut().remove(0);
        }
    }
}
