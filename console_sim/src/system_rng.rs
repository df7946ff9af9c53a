use led_control::bsp::rng::Rng;
use rand::Rng as _;

/// Uniform random numbers from the thread local generator of [rand]
pub struct SystemRng;

impl SystemRng {
    /// Factory function to create a random source
    pub fn create() -> Self {
        return SystemRng;
    }
}

impl Rng for SystemRng {
    fn random_in_range(&self, min: u8, max: u8) -> u8 {
        return rand::thread_rng().gen_range(min..=max);
    }
}
