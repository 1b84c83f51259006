//! # Cryptographic Primitives
//!
//! Everything the login sequence and the chat chain need from cryptography:
//!
//! - **Shared secret**: 16 random bytes, zeroized on drop
//! - **Stream cipher**: AES-128 in CFB8 mode, the shared secret doubling as IV,
//!   one independent state per direction
//! - **Key exchange**: RSA PKCS#1 v1.5 encryption with the server's DER public key
//! - **Server hash**: SHA-1 rendered as a signed two's-complement hex number
//! - **Signatures**: SHA256withRSA (PKCS#1 v1.5) for chat and login salts

use crate::error::{constants, ProtocolError, Result};
use aes::Aes128;
use cfb8::cipher::{inout::InOutBuf, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};
use sha2::Sha256;
use tracing::{debug, instrument};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Outbound half of the stream cipher.
pub type CipherEncryptor = cfb8::Encryptor<Aes128>;

/// Inbound half of the stream cipher.
pub type CipherDecryptor = cfb8::Decryptor<Aes128>;

/// The symmetric key negotiated during login.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 16]);

impl SharedSecret {
    /// Draw a fresh secret from the OS RNG.
    pub fn generate() -> Result<Self> {
        let mut key = [0u8; 16];
        getrandom::fill(&mut key)
            .map_err(|e| ProtocolError::Crypto(format!("random source failed: {e}")))?;
        Ok(Self(key))
    }

    pub fn from_bytes(key: [u8; 16]) -> Self {
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Build both cipher directions keyed (and IV'd) by this secret.
    pub fn ciphers(&self) -> Result<(CipherEncryptor, CipherDecryptor)> {
        let enc = CipherEncryptor::new_from_slices(&self.0, &self.0)
            .map_err(|e| ProtocolError::Crypto(format!("cipher init: {e}")))?;
        let dec = CipherDecryptor::new_from_slices(&self.0, &self.0)
            .map_err(|e| ProtocolError::Crypto(format!("cipher init: {e}")))?;
        Ok((enc, dec))
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Encrypt `data` in place, advancing the cipher state.
pub fn encrypt_in_place(cipher: &mut CipherEncryptor, data: &mut [u8]) {
    let (blocks, _tail) = InOutBuf::from(data).into_chunks();
    cipher.encrypt_blocks_inout_mut(blocks);
}

/// Decrypt `data` in place, advancing the cipher state.
pub fn decrypt_in_place(cipher: &mut CipherDecryptor, data: &mut [u8]) {
    let (blocks, _tail) = InOutBuf::from(data).into_chunks();
    cipher.decrypt_blocks_inout_mut(blocks);
}

/// Parse a DER-encoded SubjectPublicKeyInfo RSA key.
pub fn parse_public_key(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| ProtocolError::Crypto(format!("{}: {e}", constants::ERR_INVALID_PUBLIC_KEY)))
}

/// DER-encode a public key as SubjectPublicKeyInfo.
pub fn public_key_der(key: &RsaPublicKey) -> Result<Vec<u8>> {
    key.to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| ProtocolError::Crypto(format!("{}: {e}", constants::ERR_INVALID_PUBLIC_KEY)))
}

/// RSA PKCS#1 v1.5 encryption with the server's key.
pub fn rsa_encrypt(key: &RsaPublicKey, data: &[u8]) -> Result<Vec<u8>> {
    key.encrypt(&mut OsRng, Pkcs1v15Encrypt, data)
        .map_err(|e| ProtocolError::Crypto(format!("{}: {e}", constants::ERR_ENCRYPTION_FAILED)))
}

/// Server identity hash sent to the session service.
///
/// SHA-1 over `server_id || secret || public_key`, printed as a signed big-endian
/// integer in lowercase hex with no leading zeros.
#[instrument(skip(secret, public_key), level = "debug")]
pub fn server_hash(server_id: &str, secret: &[u8], public_key: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(server_id.as_bytes());
    hasher.update(secret);
    hasher.update(public_key);
    let mut digest = hasher.finalize().to_vec();

    let negative = digest[0] & 0x80 != 0;
    if negative {
        let mut carry = true;
        for byte in digest.iter_mut().rev() {
            *byte = !*byte;
            if carry {
                let (v, overflow) = byte.overflowing_add(1);
                *byte = v;
                carry = overflow;
            }
        }
    }

    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    let trimmed = hex.trim_start_matches('0');
    let hash = match (negative, trimmed.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{trimmed}"),
        (false, false) => trimmed.to_string(),
    };
    debug!(hash = %hash, "Computed server hash");
    hash
}

/// SHA256withRSA signature.
pub fn sign_sha256(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    let signer = SigningKey::<Sha256>::new(key.clone());
    signer
        .try_sign(data)
        .map(|sig| sig.to_vec())
        .map_err(|e| ProtocolError::Crypto(format!("{}: {e}", constants::ERR_SIGNING_FAILED)))
}

/// Check a SHA256withRSA signature. Malformed signatures simply fail.
pub fn verify_sha256(key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> bool {
    let Ok(sig) = Signature::try_from(signature) else {
        return false;
    };
    VerifyingKey::<Sha256>::new(key.clone())
        .verify(data, &sig)
        .is_ok()
}

/// SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Random 64-bit salt for signed chat and login.
pub fn random_salt() -> i64 {
    OsRng.next_u64() as i64
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use std::sync::OnceLock;

    pub(crate) fn test_key() -> &'static RsaPrivateKey {
        static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
        KEY.get_or_init(|| RsaPrivateKey::new(&mut OsRng, 1024).unwrap())
    }

    #[test]
    fn test_server_hash_known_values() {
        assert_eq!(
            server_hash("Notch", &[], &[]),
            "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06a48"
        );
        assert_eq!(
            server_hash("jeb_", &[], &[]),
            "-7c9d5b0044c130109a5d7b5fb5c317c02b4e28c1"
        );
        assert_eq!(
            server_hash("simon", &[], &[]),
            "88e16a1019277b15d58faf0541e11910eb756f6"
        );
    }

    #[test]
    fn test_cfb8_streaming_matches_one_shot() {
        let secret = SharedSecret::from_bytes([7u8; 16]);
        let plain = b"The quick brown fox jumps over the lazy dog".to_vec();

        let (mut enc_a, _) = secret.ciphers().unwrap();
        let mut one_shot = plain.clone();
        encrypt_in_place(&mut enc_a, &mut one_shot);

        let (mut enc_b, mut dec) = secret.ciphers().unwrap();
        let mut pieces = plain.clone();
        let (head, tail) = pieces.split_at_mut(5);
        encrypt_in_place(&mut enc_b, head);
        encrypt_in_place(&mut enc_b, tail);
        assert_eq!(pieces, one_shot);
        assert_ne!(pieces, plain);

        decrypt_in_place(&mut dec, &mut pieces[..17]);
        decrypt_in_place(&mut dec, &mut pieces[17..]);
        assert_eq!(pieces, plain);
    }

    #[test]
    fn test_rsa_encrypt_decrypts_with_private_key() {
        let key = test_key();
        let der = public_key_der(&key.to_public_key()).unwrap();
        let public = parse_public_key(&der).unwrap();
        let secret = SharedSecret::generate().unwrap();
        let sealed = rsa_encrypt(&public, secret.as_bytes()).unwrap();
        let opened = key.decrypt(Pkcs1v15Encrypt, &sealed).unwrap();
        assert_eq!(&opened[..], secret.as_bytes());
    }

    #[test]
    fn test_sign_and_verify() {
        let key = test_key();
        let public = key.to_public_key();
        let sig = sign_sha256(key, b"payload").unwrap();
        assert!(verify_sha256(&public, b"payload", &sig));
        assert!(!verify_sha256(&public, b"payloae", &sig));
        assert!(!verify_sha256(&public, b"payload", &sig[1..]));
    }

    #[test]
    fn test_bad_der_is_rejected() {
        assert!(parse_public_key(&[0x30, 0x03, 0x01]).is_err());
    }
}
