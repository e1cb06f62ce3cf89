//! Generate the 6-digit one-time codes used by authenticator apps: HOTP per
//! [rfc-4226](https://tools.ietf.org/html/rfc4226) over an HMAC-SHA1 digest,
//! with the counter usually derived from the current 30-second time step
//! ([rfc-6238](https://tools.ietf.org/html/rfc6238) TOTP).
//!
//! Secrets are the base32 strings services hand out during enrollment, and
//! they are decoded leniently: spaces, trailing `=` padding and stray
//! characters are tolerated the way common OTP tools tolerate them. See
//! [`base32`] for the exact policy.
//!
//! # Examples
//!
//! ```rust
//! // The moving factor is any 64-bit counter.
//! assert_eq!(oathcode::generate_otp("MZXW6YTBOJUWU23MNU", 52276810), "487656");
//! ```
//!
//! ```rust
//! use oathcode::{Secret, Totp, DEFAULT_STEP};
//!
//! let secret = Secret::Encoded("MZXW 6YTB OJUW U23M NU".to_string());
//! let totp = Totp::new(DEFAULT_STEP, secret.to_bytes());
//! let code = totp.generate_current().unwrap();
//! assert_eq!(code.len(), 6);
//! ```

pub mod base32;
mod secret;

pub use secret::Secret;

use constant_time_eq::constant_time_eq;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use hmac::Mac;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

type HmacSha1 = hmac::Hmac<sha1::Sha1>;

/// Codes are always 6 decimal digits, the width every authenticator accepts.
const MODULUS: u32 = 1_000_000;

/// The 30-second step recommended by [rfc-6238](https://tools.ietf.org/html/rfc6238#section-5.2).
pub const DEFAULT_STEP: u64 = 30;

fn sign(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC-SHA1 accepts keys of any length, so this cannot fail.
    let mut mac = HmacSha1::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Dynamic truncation per [rfc-4226](https://tools.ietf.org/html/rfc4226#section-5.3):
/// the low nibble of the last digest byte picks a 4-byte window, read
/// big-endian with the sign bit cleared.
fn truncate(digest: &[u8]) -> u32 {
    let offset = (digest.last().unwrap() & 15) as usize;
    let value = u32::from_be_bytes(digest[offset..offset + 4].try_into().unwrap()) & 0x7fff_ffff;
    value % MODULUS
}

/// Compute the HOTP code for a raw key and counter.
///
/// The counter is signed as 8 bytes, most significant first.
///
/// ```rust
/// // RFC 4226 appendix D, first test vector.
/// assert_eq!(oathcode::hotp(b"12345678901234567890", 0), "755224");
/// ```
pub fn hotp(key: &[u8], counter: u64) -> String {
    let digest = sign(key, &counter.to_be_bytes());
    format!("{:06}", truncate(&digest))
}

/// Compute the HOTP code for a base32 secret and counter.
///
/// The secret goes through the lenient [`base32::decode`]; the same
/// `(secret, counter)` pair always yields the same 6-digit string.
pub fn generate_otp(secret: &str, counter: u64) -> String {
    hotp(&base32::decode(secret), counter)
}

fn system_time() -> Result<u64, SystemTimeError> {
    let t = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    Ok(t)
}

/// Time-based code generation: the counter is the number of whole `step`
/// intervals elapsed since the Unix epoch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Totp<T = Vec<u8>> {
    /// Duration in seconds of a step; authenticator apps use [`DEFAULT_STEP`].
    pub step: u64,
    /// Decoded key bytes; see [`Secret`] to get them from a base32 string.
    pub secret: T,
}

impl<T: AsRef<[u8]>> PartialEq for Totp<T> {
    /// Secrets are compared in constant time.
    fn eq(&self, other: &Self) -> bool {
        self.step == other.step && constant_time_eq(self.secret.as_ref(), other.secret.as_ref())
    }
}

impl<T: AsRef<[u8]>> Totp<T> {
    /// Any key length is accepted; HMAC tolerates variable-length keys.
    pub fn new(step: u64, secret: T) -> Totp<T> {
        Totp { step, secret }
    }

    /// Generate the code for the given Unix timestamp in seconds.
    pub fn generate(&self, time: u64) -> String {
        hotp(self.secret.as_ref(), time / self.step)
    }

    /// Generate the code for the current system time.
    pub fn generate_current(&self) -> Result<String, SystemTimeError> {
        let t = system_time()?;
        Ok(self.generate(t))
    }

    /// Seconds the current code remains valid.
    pub fn ttl(&self) -> Result<u64, SystemTimeError> {
        let t = system_time()?;
        Ok(self.step - (t % self.step))
    }
}
