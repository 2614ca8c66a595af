//! Just enough of the Solidity ABI for static calls: 4-byte selectors,
//! 32-byte argument words and word-indexed return decoding.

use crate::SourceError;
use primitive_types::U256;

/// Size of an ABI word in bytes.
pub const WORD: usize = 32;

/// `balanceOf(address)`
pub const BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// `tokenOfOwnerByIndex(address,uint256)`
pub const TOKEN_OF_OWNER_BY_INDEX: [u8; 4] = [0x2f, 0x74, 0x5c, 0x59];
/// `positions(uint256)`
pub const POSITIONS: [u8; 4] = [0x99, 0xfb, 0xab, 0x88];
/// `factory()`
pub const FACTORY: [u8; 4] = [0xc4, 0x5a, 0x01, 0x55];
/// `getPool(address,address,uint24)`
pub const GET_POOL: [u8; 4] = [0x16, 0x98, 0xee, 0x82];
/// `slot0()`
pub const SLOT0: [u8; 4] = [0x38, 0x50, 0xc7, 0xbd];
/// `symbol()`
pub const SYMBOL: [u8; 4] = [0x95, 0xd8, 0x9b, 0x41];
/// `decimals()`
pub const DECIMALS: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];

/// A static call argument.
#[derive(Debug, Clone)]
pub enum AbiArg<'a> {
    /// 20-byte address as 40 hex digits, with or without `0x`.
    Address(&'a str),
    /// Unsigned integer.
    Uint(U256),
}

fn encode_arg(arg: &AbiArg<'_>) -> Result<[u8; WORD], SourceError> {
    let mut word = [0u8; WORD];
    match arg {
        AbiArg::Address(address) => {
            let digits = address.strip_prefix("0x").unwrap_or(address);
            let bytes = hex::decode(digits)
                .ok()
                .filter(|b| b.len() == 20)
                .ok_or_else(|| SourceError::Malformed(format!("invalid address `{address}`")))?;
            word[12..].copy_from_slice(&bytes);
        }
        AbiArg::Uint(value) => {
            // U256 limbs are little-endian u64s.
            for (i, limb) in value.0.iter().enumerate() {
                let end = WORD - i * 8;
                word[end - 8..end].copy_from_slice(&limb.to_be_bytes());
            }
        }
    }
    Ok(word)
}

/// Encodes `selector` followed by the static arguments.
pub fn encode_call(selector: [u8; 4], args: &[AbiArg<'_>]) -> Result<Vec<u8>, SourceError> {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector);
    for arg in args {
        data.extend_from_slice(&encode_arg(arg)?);
    }
    Ok(data)
}

/// Word-indexed view over call return data.
#[derive(Debug, Clone, Copy)]
pub struct Words<'a> {
    data: &'a [u8],
}

impl<'a> Words<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of complete words.
    pub fn len(&self) -> usize {
        self.data.len() / WORD
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn word(&self, index: usize) -> Result<&'a [u8], SourceError> {
        let start = index * WORD;
        self.data.get(start..start + WORD).ok_or_else(|| {
            SourceError::Malformed(format!(
                "return data has {} bytes, word {index} requested",
                self.data.len()
            ))
        })
    }

    pub fn uint(&self, index: usize) -> Result<U256, SourceError> {
        Ok(U256::from_big_endian(self.word(index)?))
    }

    pub fn uint128(&self, index: usize) -> Result<u128, SourceError> {
        let value = self.uint(index)?;
        if value.bits() > 128 {
            return Err(SourceError::Malformed(format!(
                "word {index} overflows uint128"
            )));
        }
        Ok(value.low_u128())
    }

    pub fn uint64(&self, index: usize) -> Result<u64, SourceError> {
        let value = self.uint(index)?;
        if value.bits() > 64 {
            return Err(SourceError::Malformed(format!("word {index} overflows uint64")));
        }
        Ok(value.low_u64())
    }

    /// Reads a signed integer of at most 32 bits (e.g. `int24`), which the
    /// ABI sign-extends to the full word.
    pub fn int32(&self, index: usize) -> Result<i32, SourceError> {
        let word = self.word(index)?;
        let mut tail = [0u8; 4];
        tail.copy_from_slice(&word[WORD - 4..]);
        Ok(i32::from_be_bytes(tail))
    }

    /// Reads an address as lowercase `0x`-prefixed hex.
    pub fn address(&self, index: usize) -> Result<String, SourceError> {
        let word = self.word(index)?;
        Ok(format!("0x{}", hex::encode(&word[12..])))
    }
}

/// Decodes a `symbol()` return: a dynamic `string`, or a `bytes32` on
/// older tokens.
pub fn decode_string(data: &[u8]) -> Result<String, SourceError> {
    if data.len() == WORD {
        let end = data.iter().position(|b| *b == 0).unwrap_or(WORD);
        return Ok(String::from_utf8_lossy(&data[..end]).into_owned());
    }

    let words = Words::new(data);
    let offset = usize::try_from(words.uint64(0)?)
        .map_err(|_| SourceError::Malformed("string offset too large".to_string()))?;
    let start = offset
        .checked_add(WORD)
        .ok_or_else(|| SourceError::Malformed("string offset too large".to_string()))?;
    let length_bytes = data
        .get(offset..start)
        .ok_or_else(|| SourceError::Malformed("string length out of bounds".to_string()))?;
    let length = usize::try_from(Words::new(length_bytes).uint64(0)?)
        .map_err(|_| SourceError::Malformed("string length too large".to_string()))?;
    let end = start
        .checked_add(length)
        .ok_or_else(|| SourceError::Malformed("string length too large".to_string()))?;
    let bytes = data
        .get(start..end)
        .ok_or_else(|| SourceError::Malformed("string data out of bounds".to_string()))?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_hex(hex_digits: &str) -> Vec<u8> {
        hex::decode(format!("{hex_digits:0>64}")).unwrap()
    }

    #[test]
    fn test_encode_balance_of() {
        let data = encode_call(
            BALANCE_OF,
            &[AbiArg::Address("0x1111111111111111111111111111111111111111")],
        )
        .unwrap();
        assert_eq!(data.len(), 4 + WORD);
        assert_eq!(
            hex::encode(&data),
            "70a08231\
             0000000000000000000000001111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_encode_uint() {
        let data = encode_call(POSITIONS, &[AbiArg::Uint(U256::from(0x0102u64))]).unwrap();
        assert_eq!(&data[..4], &POSITIONS);
        assert_eq!(&data[4..], word_hex("0102").as_slice());

        let high = U256::from(1u64) << 192;
        let data = encode_call(POSITIONS, &[AbiArg::Uint(high)]).unwrap();
        assert_eq!(data[4 + 7], 1);
        assert!(data[4 + 8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_rejects_bad_address() {
        assert!(encode_call(BALANCE_OF, &[AbiArg::Address("0x1234")]).is_err());
    }

    #[test]
    fn test_decode_words() {
        let mut data = word_hex("2a");
        data.extend(hex::decode("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff9c").unwrap());
        data.extend(word_hex("46a15b0b27311cedf172ab29e4f4766fbe7f4364"));

        let words = Words::new(&data);
        assert_eq!(words.len(), 3);
        assert_eq!(words.uint64(0).unwrap(), 42);
        assert_eq!(words.uint128(0).unwrap(), 42);
        assert_eq!(words.int32(1).unwrap(), -100);
        assert_eq!(
            words.address(2).unwrap(),
            "0x46a15b0b27311cedf172ab29e4f4766fbe7f4364"
        );
        assert!(words.word(3).is_err());
    }

    #[test]
    fn test_uint128_overflow() {
        let data = word_hex("1000000000000000000000000000000000");
        assert!(Words::new(&data).uint128(0).is_err());
    }

    #[test]
    fn test_decode_dynamic_string() {
        let mut data = word_hex("20");
        data.extend(word_hex("4"));
        let mut text = b"CAKE".to_vec();
        text.resize(WORD, 0);
        data.extend(text);
        assert_eq!(decode_string(&data).unwrap(), "CAKE");
    }

    #[test]
    fn test_decode_bytes32_string() {
        let mut data = b"MKR".to_vec();
        data.resize(WORD, 0);
        assert_eq!(decode_string(&data).unwrap(), "MKR");
    }

    #[test]
    fn test_decode_string_out_of_bounds() {
        let mut data = word_hex("20");
        data.extend(word_hex("ff"));
        assert!(decode_string(&data).is_err());
    }

    #[test]
    fn test_decode_string_huge_length() {
        let mut data = word_hex("20");
        data.extend(word_hex("ffffffffffffffff"));
        let err = decode_string(&data).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn test_decode_string_huge_offset() {
        let mut data = word_hex("ffffffffffffffff");
        data.extend(word_hex("4"));
        let err = decode_string(&data).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
