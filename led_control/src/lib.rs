#![no_std]
pub mod blink;
pub mod bsp;
pub mod flicker;
pub mod led;

pub mod armable {
    /// A behavior which is armed and disarmed rather than switched directly.
    /// While armed, [Armable::update] drives the output; it never blocks and
    /// is meant to be called on every iteration of the control loop.
    pub trait Armable {
        fn on(&self);
        fn off(&self);
        fn update(&self);
    }
}
