use crate::err::ValueError;

/// Decodes the `OverflowAlert` buffer wire form: two hex digits per byte, read as signed bytes.
pub fn decode_buffer(text: &str) -> Result<Vec<i8>, ValueError> {
    if text.len() % 2 != 0 {
        return Err(ValueError::OddLengthHex { len: text.len() });
    }

    let bytes = hex::decode(text).map_err(|_| ValueError::InvalidHex {
        value: text.to_owned(),
    })?;

    Ok(bytes.into_iter().map(|b| b as i8).collect())
}

/// Encodes a buffer as contiguous lowercase hex.
pub fn encode_buffer(buffer: &[i8]) -> String {
    let bytes: Vec<u8> = buffer.iter().map(|b| *b as u8).collect();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffer_is_signed_bytewise() {
        assert_eq!(decode_buffer("00ff10").unwrap(), vec![0, -1, 16]);
        assert_eq!(decode_buffer("7F80").unwrap(), vec![127, -128]);
        assert_eq!(encode_buffer(&[0, -1, 16]), "00ff10");
    }

    #[test]
    fn test_odd_length_is_rejected() {
        assert_eq!(
            decode_buffer("abc").unwrap_err(),
            ValueError::OddLengthHex { len: 3 }
        );
    }

    #[test]
    fn test_non_hex_is_rejected() {
        assert!(matches!(
            decode_buffer("zz"),
            Err(ValueError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(decode_buffer("").unwrap(), Vec::<i8>::new());
        assert_eq!(encode_buffer(&[]), "");
    }
}
