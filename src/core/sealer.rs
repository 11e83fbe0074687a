//! AES-ECB sealing of scanner tokens.
//!
//! The venue scanner decrypts `SK01` tokens with AES in ECB mode and PKCS#7
//! padding, so identical plaintext blocks produce identical ciphertext
//! blocks. The construction is fixed by the scanner and must not change.

use crate::utils::error::{BookingError, Result};
use aes::{Aes128, Aes192, Aes256};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ecb::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};

/// Protocol marker the scanner expects in front of the ciphertext.
pub const TOKEN_MARKER: &str = "SK01";

/// Longest prefix of the configured secret used as key material.
pub const MAX_KEY_BYTES: usize = 32;

/// Key material after the truncation rule has been applied. The variant
/// follows from the key length.
#[derive(Clone)]
pub enum SealingKey {
    Aes128([u8; 16]),
    Aes192([u8; 24]),
    Aes256([u8; 32]),
}

impl SealingKey {
    /// Takes the first [`MAX_KEY_BYTES`] bytes of the UTF-8 secret. What
    /// remains must be exactly 16, 24 or 32 bytes long.
    pub fn from_secret(secret: &str) -> Result<Self> {
        let bytes = secret.as_bytes();
        let key = &bytes[..bytes.len().min(MAX_KEY_BYTES)];

        match key.len() {
            16 => Ok(SealingKey::Aes128(copy_key(key))),
            24 => Ok(SealingKey::Aes192(copy_key(key))),
            32 => Ok(SealingKey::Aes256(copy_key(key))),
            actual => Err(BookingError::KeyLengthError { actual }),
        }
    }

    pub fn bits(&self) -> usize {
        match self {
            SealingKey::Aes128(_) => 128,
            SealingKey::Aes192(_) => 192,
            SealingKey::Aes256(_) => 256,
        }
    }
}

impl std::fmt::Debug for SealingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SealingKey(AES-{}, [REDACTED])", self.bits())
    }
}

fn copy_key<const N: usize>(key: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(key);
    out
}

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes192EcbEnc = ecb::Encryptor<Aes192>;
type Aes256EcbEnc = ecb::Encryptor<Aes256>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;
type Aes192EcbDec = ecb::Decryptor<Aes192>;
type Aes256EcbDec = ecb::Decryptor<Aes256>;

/// Seals plaintext tokens. Holds only immutable key material, so one
/// instance can be shared across invocations.
#[derive(Debug, Clone)]
pub struct TokenSealer {
    key: SealingKey,
}

impl TokenSealer {
    pub fn new(key: SealingKey) -> Self {
        Self { key }
    }

    pub fn from_secret(secret: &str) -> Result<Self> {
        Ok(Self::new(SealingKey::from_secret(secret)?))
    }

    pub fn key_bits(&self) -> usize {
        self.key.bits()
    }

    /// PKCS#7-pads the UTF-8 plaintext, encrypts each block independently
    /// and base64-encodes the result.
    pub fn seal(&self, plaintext: &str) -> String {
        let data = plaintext.as_bytes();
        let ciphertext = match &self.key {
            SealingKey::Aes128(key) => {
                Aes128EcbEnc::new(key.into()).encrypt_padded_vec_mut::<Pkcs7>(data)
            }
            SealingKey::Aes192(key) => {
                Aes192EcbEnc::new(key.into()).encrypt_padded_vec_mut::<Pkcs7>(data)
            }
            SealingKey::Aes256(key) => {
                Aes256EcbEnc::new(key.into()).encrypt_padded_vec_mut::<Pkcs7>(data)
            }
        };
        STANDARD.encode(ciphertext)
    }

    /// [`TOKEN_MARKER`] followed by the sealed plaintext.
    pub fn seal_token(&self, plaintext: &str) -> String {
        format!("{}{}", TOKEN_MARKER, self.seal(plaintext))
    }

    /// Inverse of [`TokenSealer::seal`].
    pub fn open(&self, sealed: &str) -> Result<String> {
        let ciphertext = STANDARD.decode(sealed.trim())?;
        let plaintext = match &self.key {
            SealingKey::Aes128(key) => {
                Aes128EcbDec::new(key.into()).decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            }
            SealingKey::Aes192(key) => {
                Aes192EcbDec::new(key.into()).decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            }
            SealingKey::Aes256(key) => {
                Aes256EcbDec::new(key.into()).decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            }
        }
        .map_err(|_| BookingError::DecryptError {
            message: "invalid padding or ciphertext length".to_string(),
        })?;

        String::from_utf8(plaintext).map_err(|e| BookingError::DecryptError {
            message: format!("plaintext is not UTF-8: {}", e),
        })
    }

    /// Inverse of [`TokenSealer::seal_token`].
    pub fn open_token(&self, token: &str) -> Result<String> {
        let sealed = token
            .trim()
            .strip_prefix(TOKEN_MARKER)
            .ok_or_else(|| BookingError::DecryptError {
                message: format!("token does not start with {}", TOKEN_MARKER),
            })?;
        self.open(sealed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_128: &str = "0123456789abcdef";
    const KEY_192: &str = "0123456789abcdef01234567";
    const KEY_256: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_key_length_selects_variant() {
        assert_eq!(SealingKey::from_secret(KEY_128).unwrap().bits(), 128);
        assert_eq!(SealingKey::from_secret(KEY_192).unwrap().bits(), 192);
        assert_eq!(SealingKey::from_secret(KEY_256).unwrap().bits(), 256);
    }

    #[test]
    fn test_long_secret_truncated_to_32_bytes() {
        let long = format!("{}trailing-material", KEY_256);
        let truncated = TokenSealer::from_secret(KEY_256).unwrap();
        let sealer = TokenSealer::from_secret(&long).unwrap();

        assert_eq!(sealer.key_bits(), 256);
        assert_eq!(sealer.seal("abc"), truncated.seal("abc"));
    }

    #[test]
    fn test_bad_key_lengths_rejected() {
        for secret in ["", "short", "0123456789abcdef0123", "0123456789abcdef012345678"] {
            match SealingKey::from_secret(secret) {
                Err(BookingError::KeyLengthError { actual }) => assert_eq!(actual, secret.len()),
                other => panic!("expected key length error for {:?}, got {:?}", secret, other),
            }
        }
    }

    #[test]
    fn test_debug_hides_key_material() {
        let key = SealingKey::from_secret(KEY_128).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(KEY_128));
        assert!(rendered.contains("AES-128"));
    }

    #[test]
    fn test_known_ciphertexts() {
        let plaintext = "[,,20250101100000,20250101120000,,,,,]";
        let cases = [
            (KEY_128, "4Q8tEYko5Mts0oCZS9Ter1uIRRDdGlU0JfXU/rVUnutZe9LMrnqZZEFz5T28vvFH"),
            (KEY_192, "e5AqM36Rf2InnW+fMQezJGiIlhnYdRGINueyq4Uc/VtIcWc6grPhKBz6fLzcXbRy"),
            (KEY_256, "jNIEUQSMpK1qPp7L9+Pqm7Jcgm87XLFGeO4oUeBs+Omab/dMm5JuKykkVG7i5HvZ"),
        ];

        for (secret, expected) in cases {
            let sealer = TokenSealer::from_secret(secret).unwrap();
            assert_eq!(sealer.seal(plaintext), expected);
        }
    }

    #[test]
    fn test_block_aligned_input_gets_full_padding_block() {
        let sealer = TokenSealer::from_secret(KEY_128).unwrap();
        let sealed = sealer.seal("0123456789abcdef");
        assert_eq!(STANDARD.decode(sealed).unwrap().len(), 32);
        assert_eq!(STANDARD.decode(sealer.seal("")).unwrap().len(), 16);
    }

    #[test]
    fn test_seal_is_deterministic() {
        let sealer = TokenSealer::from_secret(KEY_256).unwrap();
        let plaintext = "[,,20250615143000,20250615160000,,,,,]";
        assert_eq!(sealer.seal(plaintext), sealer.seal(plaintext));
    }

    #[test]
    fn test_shared_leading_block_shares_ciphertext_block() {
        let sealer = TokenSealer::from_secret(KEY_256).unwrap();
        let a = STANDARD
            .decode(sealer.seal("[,,2025061514300099999999"))
            .unwrap();
        let b = STANDARD
            .decode(sealer.seal("[,,2025061514300011111111"))
            .unwrap();

        assert_eq!(a[..16], b[..16]);
        assert_ne!(a[16..], b[16..]);
    }

    #[test]
    fn test_round_trip_for_each_key_size() {
        let plaintext = "[,,20250615143000,20250615160000,,,,,]";
        for secret in [KEY_128, KEY_192, KEY_256] {
            let sealer = TokenSealer::from_secret(secret).unwrap();
            let token = sealer.seal_token(plaintext);
            assert!(token.starts_with(TOKEN_MARKER));
            assert_eq!(sealer.open_token(&token).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_open_with_wrong_key_fails() {
        let sealer = TokenSealer::from_secret(KEY_128).unwrap();
        let other = TokenSealer::from_secret("fedcba9876543210").unwrap();
        let token = sealer.seal_token("[,,20250615143000,20250615160000,,,,,]");

        // A wrong key can still produce valid-looking padding by chance, but
        // never the sealed plaintext.
        match other.open_token(&token) {
            Ok(text) => assert_ne!(text, "[,,20250615143000,20250615160000,,,,,]"),
            Err(e) => assert!(matches!(e, BookingError::DecryptError { .. })),
        }
    }

    #[test]
    fn test_open_token_requires_marker() {
        let sealer = TokenSealer::from_secret(KEY_128).unwrap();
        let sealed = sealer.seal("payload");
        assert!(matches!(
            sealer.open_token(&sealed),
            Err(BookingError::DecryptError { .. })
        ));
        assert!(matches!(sealer.open("not base64!"), Err(BookingError::Base64Error(_))));
    }
}
