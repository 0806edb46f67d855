use crate::core::errors::ChannelError;
use rand::Rng;

/// Classical channel noise applied to a measured bit.
///
/// Models the physical channel as a binary symmetric channel: each bit is
/// flipped independently with probability `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitFlipChannel {
    p: f64,
}

impl BitFlipChannel {
    /// Bit Flip Channel -> X with probability `p`
    pub fn new(p: f64) -> Result<Self, ChannelError> {
        validate_prob(p)?;
        Ok(Self { p })
    }

    /// A channel that never flips.
    pub fn noiseless() -> Self {
        Self { p: 0.0 }
    }

    pub fn probability(&self) -> f64 {
        self.p
    }

    /// Passes `bit` through the channel.
    ///
    /// A noiseless channel draws nothing from `rng`.
    pub fn transmit<R: Rng + ?Sized>(&self, bit: u8, rng: &mut R) -> u8 {
        if self.p > 0.0 && rng.random_bool(self.p) {
            bit ^ 1
        } else {
            bit
        }
    }
}

/// Validate probability parameter
fn validate_prob(p: f64) -> Result<(), ChannelError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ChannelError::InvalidProbability(p));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_invalid_probability() {
        assert_eq!(
            BitFlipChannel::new(1.5),
            Err(ChannelError::InvalidProbability(1.5))
        );
        assert!(BitFlipChannel::new(-0.1).is_err());
        assert!(BitFlipChannel::new(f64::NAN).is_err());
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let never = BitFlipChannel::noiseless();
        let always = BitFlipChannel::new(1.0).unwrap();
        for bit in [0u8, 1] {
            assert_eq!(never.transmit(bit, &mut rng), bit);
            assert_eq!(always.transmit(bit, &mut rng), bit ^ 1);
        }
    }

    #[test]
    fn flip_rate_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(99);
        let channel = BitFlipChannel::new(0.1).unwrap();
        let flips = (0..20_000)
            .filter(|_| channel.transmit(0, &mut rng) == 1)
            .count();
        let rate = flips as f64 / 20_000.0;
        assert!((rate - 0.1).abs() < 0.01, "flip rate {rate}");
    }
}
