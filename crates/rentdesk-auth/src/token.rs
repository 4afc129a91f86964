//! Opaque bearer token minting.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Raw entropy per token, before encoding. 32 bytes = 256 bits.
pub const TOKEN_BYTES: usize = 32;

/// Mint a new session token.
///
/// The value has no structure: it is not derived from the user id, a
/// counter, or anything else public. 256 bits of OS-seeded randomness,
/// URL-safe base64 without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn token_encodes_full_entropy() {
        let token = generate_token();
        // 32 bytes in unpadded base64.
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
