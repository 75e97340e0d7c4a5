//! Byte-level helpers for checking containers.

/// Encodes bytes as lowercase hexadecimal.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hexadecimal, ignoring whitespace.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

/// Reads the little-endian `u32` at `offset`.
pub fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    let field: [u8; 4] = bytes[offset..offset + 4]
        .try_into()
        .expect("Field out of range");
    u32::from_le_bytes(field)
}

/// Reads the little-endian `i32` at `offset`.
pub fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    let field: [u8; 4] = bytes[offset..offset + 4]
        .try_into()
        .expect("Field out of range");
    i32::from_le_bytes(field)
}

/// Asserts that `actual` equals the hex string `expected`, showing both in hex.
#[track_caller]
pub fn assert_hex_eq(actual: &[u8], expected: &str) {
    let expected = hex_decode(expected);
    assert_eq!(
        hex_encode(actual),
        hex_encode(&expected),
        "container bytes differ"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(hex_encode(b"\x00\xffA"), "00ff41");
        assert_eq!(hex_decode("00 ff\n41"), b"\x00\xffA");
    }

    #[test]
    fn reads_fields() {
        let bytes = [0xaa, 0x03, 0x00, 0x00, 0x00, 0xfc, 0xff, 0xff, 0xff];
        assert_eq!(read_u32_le(&bytes, 1), 3);
        assert_eq!(read_i32_le(&bytes, 5), -4);
    }
}
