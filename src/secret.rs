//! Representation of a shared secret, either raw bytes or a base32 String.
//!
//! # Examples
//!
//! - Generate a code from a base32 encoded secret
//! ```rust
//! use oathcode::{Secret, Totp, DEFAULT_STEP};
//!
//! let secret = Secret::Encoded("MZXW6YTBOJUWU23MNU".to_string());
//! let totp = Totp::new(DEFAULT_STEP, secret.to_bytes());
//!
//! println!("code from base32:\t{}", totp.generate_current().unwrap());
//! ```
//!
//! - Generate a code from a "raw" secret
//! ```rust
//! use oathcode::{Secret, Totp, DEFAULT_STEP};
//!
//! let secret = Secret::Raw(b"supersecret".to_vec());
//! let totp = Totp::new(DEFAULT_STEP, secret.to_bytes());
//!
//! println!("code from raw secret:\t{}", totp.generate_current().unwrap());
//! ```

use base32::{self, Alphabet};

use constant_time_eq::constant_time_eq;

/// Shared secret to generate codes from.
///
/// `Encoded` holds the base32 form users copy out of an enrollment screen;
/// [`Secret::to_bytes`] decodes it leniently, so spaces, `=` padding and
/// stray characters are tolerated rather than rejected.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "zeroize", derive(zeroize::Zeroize, zeroize::ZeroizeOnDrop))]
pub enum Secret {
    /// Non-encoded "raw" secret.
    Raw(Vec<u8>),
    /// Base32 encoded secret.
    Encoded(String),
}

impl PartialEq for Secret {
    /// Compares decoded bytes in constant time; a `Raw` and an `Encoded`
    /// secret are equal when they carry the same key.
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.to_bytes(), &other.to_bytes())
    }
}

#[cfg(feature = "gen_secret")]
#[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
impl Default for Secret {
    fn default() -> Self {
        Secret::generate_secret()
    }
}

impl Secret {
    /// Key bytes of the secret.
    ///
    /// Never fails: an `Encoded` secret goes through the lenient decoder in
    /// [`base32`](crate::base32), so malformed input yields fewer bytes
    /// instead of an error.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Secret::Raw(bytes) => bytes.clone(),
            Secret::Encoded(s) => crate::base32::decode(s),
        }
    }

    /// Transform into a `Secret::Raw`.
    pub fn to_raw(&self) -> Self {
        Secret::Raw(self.to_bytes())
    }

    /// Transform into a `Secret::Encoded`, without `=` padding.
    pub fn to_encoded(&self) -> Self {
        match self {
            Secret::Raw(bytes) => {
                Secret::Encoded(base32::encode(Alphabet::Rfc4648 { padding: false }, bytes))
            }
            Secret::Encoded(_) => self.clone(),
        }
    }

    /// Generate a CSPRNG binary value of 160 bits,
    /// the recommended size from [rfc-4226](https://www.rfc-editor.org/rfc/rfc4226#section-4).
    ///
    /// > The length of the shared secret MUST be at least 128 bits.
    /// > This document RECOMMENDs a shared secret length of 160 bits.
    #[cfg(feature = "gen_secret")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gen_secret")))]
    pub fn generate_secret() -> Secret {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut secret: [u8; 20] = Default::default();
        rng.fill(&mut secret[..]);
        Secret::Raw(secret.to_vec())
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Secret::Raw(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            Secret::Encoded(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Secret;

    const BASE32: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";
    const BYTES: &[u8] = b"12345678901234567890";
    const BYTES_DISPLAY: &str = "3132333435363738393031323334353637383930";

    #[test]
    fn secret_display() {
        assert_eq!(Secret::Raw(BYTES.to_vec()).to_string(), BYTES_DISPLAY);
        assert_eq!(Secret::Encoded(BASE32.to_string()).to_string(), BASE32);
    }

    #[test]
    fn secret_convert_base32_raw() {
        let raw = Secret::Raw(BYTES.to_vec());
        let encoded = Secret::Encoded(BASE32.to_string());

        assert_eq!(&raw.to_encoded(), &encoded);
        assert_eq!(&raw.to_raw(), &raw);

        assert_eq!(&encoded.to_raw(), &raw);
        assert_eq!(&encoded.to_encoded(), &encoded);
    }

    #[test]
    fn secret_as_bytes() {
        assert_eq!(Secret::Raw(BYTES.to_vec()).to_bytes(), BYTES.to_vec());
        assert_eq!(Secret::Encoded(BASE32.to_string()).to_bytes(), BYTES.to_vec());
    }

    #[test]
    fn secret_equality_across_forms() {
        let raw = Secret::Raw(BYTES.to_vec());
        let encoded = Secret::Encoded(BASE32.to_string());
        assert_eq!(raw, encoded);
        assert_ne!(raw, Secret::Raw(b"different".to_vec()));
    }

    #[test]
    fn encoded_secret_is_decoded_leniently() {
        let spaced = Secret::Encoded("GEZD GNBV GY3T QOJQ GEZD GNBV GY3T QOJQ".to_string());
        let padded = Secret::Encoded(format!("{}====", BASE32));
        assert_eq!(spaced.to_bytes(), BYTES.to_vec());
        assert_eq!(padded.to_bytes(), BYTES.to_vec());
    }

    #[test]
    #[cfg(feature = "gen_secret")]
    fn secret_gen_secret() {
        let sec = Secret::generate_secret();

        assert!(matches!(sec, Secret::Raw(_)));
        assert_eq!(sec.to_bytes().len(), 20);
    }

    #[test]
    #[cfg(feature = "gen_secret")]
    fn secret_gen_default() {
        let sec = Secret::default();

        assert!(matches!(sec, Secret::Raw(_)));
        assert_eq!(sec.to_bytes().len(), 20);
    }
}
