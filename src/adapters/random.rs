//! Random source adapter.
//!
//! A [`SmallRng`] behind [`RandomSource`].  On device it is seeded from the
//! ESP32 hardware RNG (`esp_random()`, which draws from RF noise once the
//! radio or the bootloader entropy source has run); on the host from the
//! system clock.  Tests use [`SmallRngSource::seeded`] for reproducibility.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::RandomSource;

pub struct SmallRngSource {
    rng: SmallRng,
}

impl SmallRngSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[cfg(target_os = "espidf")]
    pub fn from_hardware() -> Self {
        let hi = u64::from(unsafe { esp_idf_svc::sys::esp_random() });
        let lo = u64::from(unsafe { esp_idf_svc::sys::esp_random() });
        Self::seeded((hi << 32) | lo)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn from_hardware() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::seeded(nanos)
    }
}

impl RandomSource for SmallRngSource {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }
}
