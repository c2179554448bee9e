//! Match share-code codec
//!
//! A share code packs `match_id` (u64), `reservation_id` (u64) and `tv_port`
//! (u16) little-endian into 18 bytes. Those bytes are read as one big-endian
//! 144-bit integer and written as 25 base-57 digits, least significant first,
//! grouped as `CSGO-xxxxx-xxxxx-xxxxx-xxxxx-xxxxx`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ALPHABET: &[u8; 57] = b"ABCDEFGHJKLMNOPQRSTUVWXYZabcdefhijkmnopqrstuvwxyz23456789";
const BASE: u32 = 57;
const DIGITS: usize = 25;
const PAYLOAD_LEN: usize = 18;
const PREFIX: &str = "CSGO";

/// The triple that addresses one match on the game coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCoordinates {
    /// Match identifier
    pub match_id: u64,
    /// Reservation (outcome) identifier
    pub reservation_id: u64,
    /// GOTV port of the match server
    pub tv_port: u16,
}

/// Codec failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareCodeError {
    /// Wrong prefix, length, or a symbol outside the alphabet
    #[error("share code has an invalid format")]
    InvalidFormat,

    /// Well-formed, but the encoded value does not fit in 18 bytes
    #[error("share code value exceeds 144 bits")]
    Overflow,
}

/// Decode a share code into its match coordinates
///
/// The `CSGO-` prefix and the dashes are optional; surrounding whitespace is
/// ignored.
///
/// # Examples
///
/// ```
/// use cs_sharecode::sharecode::decode;
///
/// let coords = decode("CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK").unwrap();
/// assert_eq!(coords.match_id, 3230642215713767580);
/// assert_eq!(coords.reservation_id, 3230647599455273103);
/// assert_eq!(coords.tv_port, 55788);
/// ```
pub fn decode(share_code: &str) -> Result<MatchCoordinates, ShareCodeError> {
    let trimmed = share_code.trim();
    let body = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);

    let symbols: Vec<u8> = body.bytes().filter(|&b| b != b'-').collect();
    if symbols.len() != DIGITS {
        return Err(ShareCodeError::InvalidFormat);
    }

    let mut value = [0u8; PAYLOAD_LEN];
    for &symbol in symbols.iter().rev() {
        let digit = ALPHABET
            .iter()
            .position(|&a| a == symbol)
            .ok_or(ShareCodeError::InvalidFormat)?;
        mul_add(&mut value, digit as u32)?;
    }

    Ok(MatchCoordinates {
        match_id: le_u64(&value[..8]),
        reservation_id: le_u64(&value[8..16]),
        tv_port: le_u64(&value[16..]) as u16,
    })
}

/// Encode match coordinates into a canonical share code
///
/// # Examples
///
/// ```
/// use cs_sharecode::sharecode::{MatchCoordinates, encode};
///
/// let code = encode(&MatchCoordinates {
///     match_id: 3230642215713767580,
///     reservation_id: 3230647599455273103,
///     tv_port: 55788,
/// });
/// assert_eq!(code, "CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK");
/// ```
pub fn encode(coordinates: &MatchCoordinates) -> String {
    let mut value = [0u8; PAYLOAD_LEN];
    value[..8].copy_from_slice(&coordinates.match_id.to_le_bytes());
    value[8..16].copy_from_slice(&coordinates.reservation_id.to_le_bytes());
    value[16..].copy_from_slice(&coordinates.tv_port.to_le_bytes());

    let mut code = String::with_capacity(PREFIX.len() + DIGITS + 5);
    code.push_str(PREFIX);
    for i in 0..DIGITS {
        if i % 5 == 0 {
            code.push('-');
        }
        let digit = div_rem(&mut value);
        code.push(char::from(ALPHABET[digit as usize]));
    }
    code
}

/// `value = value * BASE + digit` over a big-endian byte string
fn mul_add(value: &mut [u8; PAYLOAD_LEN], digit: u32) -> Result<(), ShareCodeError> {
    let mut carry = digit;
    for byte in value.iter_mut().rev() {
        let acc = u32::from(*byte) * BASE + carry;
        *byte = (acc & 0xff) as u8;
        carry = acc >> 8;
    }
    if carry != 0 {
        return Err(ShareCodeError::Overflow);
    }
    Ok(())
}

/// `value /= BASE`, returning the remainder
fn div_rem(value: &mut [u8; PAYLOAD_LEN]) -> u32 {
    let mut rem = 0u32;
    for byte in value.iter_mut() {
        let acc = (rem << 8) | u32::from(*byte);
        *byte = (acc / BASE) as u8;
        rem = acc % BASE;
    }
    rem
}

fn le_u64(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}
