//! Privacy amplification: compress the sifted key to the length an
//! intercept-resend eavesdropper can have no information about.

use crate::core::errors::InputError;
use crate::core::utils;
use crate::protocols::qkd::bb84::validate_bits;
use sha2::{Digest, Sha256, Sha512};
use tracing::{debug, warn};

/// Default security parameter: failure probability `ε = 2^-128`.
pub const DEFAULT_SECURITY_BITS: u32 = 128;

/// Binary Shannon entropy `H(e)` in bits.
///
/// `H(0) = H(1) = 0` by continuity.
pub fn binary_entropy(e: f64) -> f64 {
    if e <= 0.0 || e >= 1.0 {
        return 0.0;
    }
    -e * e.log2() - (1.0 - e) * (1.0 - e).log2()
}

/// Number of extractable secure bits from `sifted_len` sifted bits.
///
/// `floor(n·(1 - H(e)) - 2·log2(1/ε))` with `ε = 2^-security_bits`, floored at 0.
/// `error_rate` is clamped to `[0, 1]`.
pub fn secure_key_length(sifted_len: usize, error_rate: f64, security_bits: u32) -> usize {
    let e = error_rate.clamp(0.0, 1.0);
    let h = binary_entropy(e);
    let margin = 2.0 * f64::from(security_bits);

    let raw = (sifted_len as f64 * (1.0 - h) - margin).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(sifted_len)
    }
}

/// Distills the final key from the sifted key.
///
/// The sifted key is serialized as ASCII `'0'`/`'1'` characters. The first 256
/// output bits are the SHA-256 digest of that string, the next 512 its SHA-512
/// digest, and any further bits come from SHA-512 over the string followed by
/// a big-endian `u32` block counter starting at 1. Bits are taken most
/// significant first. The result is truncated to
/// [`secure_key_length`] bits and is empty when that length is 0.
///
/// # Errors
///
/// Returns an `InputError` if the key holds values other than 0/1 or the error
/// rate is NaN.
pub fn privacy_amplification(
    sifted_key: &[u8],
    error_rate: f64,
    target_security_bits: u32,
) -> Result<Vec<u8>, InputError> {
    if error_rate.is_nan() {
        return Err(InputError::InvalidProbability {
            name: "error_rate",
            value: error_rate,
        });
    }
    validate_bits("sifted_key", sifted_key, sifted_key.len())?;

    let len = secure_key_length(sifted_key.len(), error_rate, target_security_bits);
    debug!(
        sifted = sifted_key.len(),
        error_rate,
        entropy = binary_entropy(error_rate.clamp(0.0, 1.0)),
        secure_length = len,
        "computed secure key length"
    );
    if len == 0 {
        warn!(
            sifted = sifted_key.len(),
            error_rate, "no securely extractable key material"
        );
        return Ok(Vec::new());
    }

    let canonical = utils::bits_to_ascii(sifted_key);
    let mut bits = Vec::with_capacity(len);

    bits.extend(utils::bytes_to_bits(&Sha256::digest(&canonical)).take(len));

    if bits.len() < len {
        bits.extend(utils::bytes_to_bits(&Sha512::digest(&canonical)).take(len - bits.len()));
    }

    let mut counter: u32 = 1;
    while bits.len() < len {
        let mut hasher = Sha512::new();
        hasher.update(&canonical);
        hasher.update(counter.to_be_bytes());
        bits.extend(utils::bytes_to_bits(&hasher.finalize()).take(len - bits.len()));
        counter += 1;
    }

    Ok(bits)
}
