//! Lenient RFC 4648 base32 decoding for human-typed secrets.
//!
//! Enrollment screens hand secrets to users as text, often grouped with
//! spaces (`"MZXW 6YTB"`) and sometimes carrying trailing `=` padding. The
//! decoder here accepts all of that: spaces are stripped, decoding stops at
//! the first `=`, and any other byte outside the base32 alphabet is skipped
//! instead of rejected. Malformed input degrades to fewer decoded bytes
//! (and therefore a different code), never an error.
//!
//! Encoding is not this module's job; [`Secret::to_encoded`] uses the
//! `base32` crate for that direction.
//!
//! [`Secret::to_encoded`]: crate::Secret::to_encoded

/// Base32 works in blocks of 8 characters (40 bits).
const BLOCK: usize = 8;

/// Decode `secret`, tolerating spaces, `=` padding and stray characters.
///
/// Never fails: the result is however many whole bytes the valid characters
/// yield. Trailing bits that do not fill a byte are discarded. The alphabet
/// is the uppercase `A-Z` / `2-7` set; lowercase input is skipped like any
/// other foreign character.
///
/// ```
/// assert_eq!(oathcode::base32::decode("MZXW6YTB"), b"fooba");
/// assert_eq!(oathcode::base32::decode("MZXW 6YTB"), b"fooba");
/// assert_eq!(oathcode::base32::decode("MZXW6YTB===="), b"fooba");
/// ```
pub fn decode(secret: &str) -> Vec<u8> {
    let cleaned: String = secret.chars().filter(|c| *c != ' ').collect();
    let padded = pad(cleaned);

    let mut out = Vec::with_capacity(padded.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;
    for byte in padded.bytes() {
        if byte == b'=' {
            break;
        }
        let value = match base32_value(byte) {
            Some(value) => value,
            None => continue,
        };
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            out.push((buffer >> (bits - 8)) as u8);
            bits -= 8;
        }
    }
    out
}

/// 5-bit value of a base32 alphabet character, `None` for anything else.
fn base32_value(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'2'..=b'7' => Some(byte - b'2' + 26),
        _ => None,
    }
}

/// Right-pad with `=` to a whole number of base32 blocks.
fn pad(input: String) -> String {
    match input.len() % BLOCK {
        0 => input,
        rem => input + &"=".repeat(BLOCK - rem),
    }
}
