//! BB84 transmission over a quantum channel with an optional intercept-resend
//! eavesdropper.

use crate::core::errors::InputError;
use crate::{Basis, BitFlipChannel, SymbolState};
use rand::Rng;
use tracing::debug;

/// Channel conditions for a single transmission run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransmissionParams {
    /// Whether an eavesdropper sits on the channel.
    pub eve_present: bool,
    /// Probability that Eve intercepts any given symbol.
    pub eve_intercept_prob: f64,
    /// Probability that channel noise flips Bob's measured bit.
    pub noise_prob: f64,
}

impl TransmissionParams {
    /// Noiseless channel with no eavesdropper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places Eve on the channel, intercepting each symbol with `intercept_prob`.
    pub fn with_eve(mut self, intercept_prob: f64) -> Self {
        self.eve_present = true;
        self.eve_intercept_prob = intercept_prob;
        self
    }

    /// Sets the post-measurement bit flip probability.
    pub fn with_noise(mut self, noise_prob: f64) -> Self {
        self.noise_prob = noise_prob;
        self
    }

    pub fn validate(&self) -> Result<(), InputError> {
        validate_probability("eve_intercept_prob", self.eve_intercept_prob)?;
        validate_probability("noise_prob", self.noise_prob)
    }
}

/// What Eve did with an intercepted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interception {
    /// Basis Eve measured in and re-prepared with.
    pub basis: Basis,
    /// Eve's measured bit, which is also the bit she resent.
    pub result: u8,
}

/// Output of a transmission run, index-aligned with the inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    pub bob_results: Vec<u8>,
    /// Eve's measured bits, `None` when no eavesdropper was present.
    /// Indices she let through read `0`.
    pub eve_results: Option<Vec<u8>>,
    /// Per-index interception details.
    pub interceptions: Vec<Option<Interception>>,
}

impl Transmission {
    pub fn len(&self) -> usize {
        self.bob_results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bob_results.is_empty()
    }

    /// Number of symbols Eve measured and resent.
    pub fn intercept_count(&self) -> usize {
        self.interceptions.iter().filter(|i| i.is_some()).count()
    }
}

/// Draws `n` uniformly random bits.
pub fn random_bits<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<u8> {
    (0..n).map(|_| u8::from(rng.random_bool(0.5))).collect()
}

/// Draws `n` uniformly random bases in their integer encoding.
pub fn random_bases<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<u8> {
    (0..n).map(|_| Basis::random(rng).as_u8()).collect()
}

/// Runs the BB84 quantum stage over every index.
///
/// Per index: Alice encodes her bit, Eve (if present) intercepts with
/// probability `eve_intercept_prob`, measures in a random basis and resends her
/// result in that basis, Bob measures in his basis, and channel noise flips his
/// bit with probability `noise_prob`.
///
/// # Errors
///
/// Returns an `InputError` if the sequences are empty or of different lengths,
/// contain values other than 0/1, or a probability lies outside `[0, 1]`.
pub fn simulate_transmission<R: Rng + ?Sized>(
    alice_bits: &[u8],
    alice_bases: &[u8],
    bob_bases: &[u8],
    params: &TransmissionParams,
    rng: &mut R,
) -> Result<Transmission, InputError> {
    let n = alice_bits.len();
    if n == 0 {
        return Err(InputError::Empty);
    }
    validate_bits("alice_bits", alice_bits, n)?;
    let alice_bases = decode_bases("alice_bases", alice_bases, n)?;
    let bob_bases = decode_bases("bob_bases", bob_bases, n)?;
    params.validate()?;

    let noise = BitFlipChannel::new(params.noise_prob)?;

    let mut bob_results = Vec::with_capacity(n);
    let mut interceptions = Vec::with_capacity(n);

    for i in 0..n {
        // Alice prepares the symbol
        let mut state = SymbolState::encode(alice_bits[i], alice_bases[i])?;

        // Eavesdropper intercepts, measures and resends
        let mut interception = None;
        if params.eve_present
            && params.eve_intercept_prob > 0.0
            && rng.random_bool(params.eve_intercept_prob)
        {
            let e_basis = Basis::random(rng);
            let e_bit = state.measure(e_basis, rng).value;
            state = SymbolState::encode(e_bit, e_basis)?;
            interception = Some(Interception {
                basis: e_basis,
                result: e_bit,
            });
        }

        // Bob measures, then the channel may flip his bit
        let b_bit = state.measure(bob_bases[i], rng).value;
        bob_results.push(noise.transmit(b_bit, rng));
        interceptions.push(interception);
    }

    let eve_results: Option<Vec<u8>> = params.eve_present.then(|| {
        interceptions
            .iter()
            .map(|i| i.map_or(0, |i| i.result))
            .collect()
    });

    let transmission = Transmission {
        bob_results,
        eve_results,
        interceptions,
    };

    debug!(
        symbols = n,
        eve_present = params.eve_present,
        eve_intercept_prob = params.eve_intercept_prob,
        noise_prob = params.noise_prob,
        intercepted = transmission.intercept_count(),
        "simulated transmission"
    );

    Ok(transmission)
}

pub(crate) fn validate_probability(name: &'static str, value: f64) -> Result<(), InputError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(InputError::InvalidProbability { name, value });
    }
    Ok(())
}

pub(crate) fn validate_bits(
    field: &'static str,
    bits: &[u8],
    expected: usize,
) -> Result<(), InputError> {
    if bits.len() != expected {
        return Err(InputError::LengthMismatch {
            field,
            expected,
            got: bits.len(),
        });
    }
    if let Some((index, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
        return Err(InputError::InvalidBit { field, index, value });
    }
    Ok(())
}

pub(crate) fn decode_bases(
    field: &'static str,
    bases: &[u8],
    expected: usize,
) -> Result<Vec<Basis>, InputError> {
    if bases.len() != expected {
        return Err(InputError::LengthMismatch {
            field,
            expected,
            got: bases.len(),
        });
    }
    bases
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            Basis::from_u8(value).ok_or(InputError::InvalidBasis {
                field,
                index,
                value,
            })
        })
        .collect()
}
