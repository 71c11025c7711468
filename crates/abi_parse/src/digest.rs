//! Signature digests for selectors and topic hashes.
//!
//! The parser never depends on a particular hash: anything implementing
//! [`SignatureDigest`] can be passed to the `*_with` methods. [`Keccak256`] is
//! what the convenience methods use.

use sha3::Digest;

/// A 32-byte digest over a signature's UTF-8 bytes.
pub trait SignatureDigest {
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// Keccak-256, the digest used by EVM selectors and event topics.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256;

impl SignatureDigest for Keccak256 {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&<sha3::Keccak256 as Digest>::digest(data));
        out
    }
}

impl<F> SignatureDigest for F
where
    F: Fn(&[u8]) -> [u8; 32],
{
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        self(data)
    }
}

/// `0x`-prefixed first four bytes of the digest of `signature`.
pub(crate) fn selector(signature: &str, hasher: &impl SignatureDigest) -> String {
    let hash = hasher.digest(signature.as_bytes());
    format!("0x{}", hex::encode(&hash[..4]))
}

/// `0x`-prefixed full digest of `signature`.
pub(crate) fn topic(signature: &str, hasher: &impl SignatureDigest) -> String {
    let hash = hasher.digest(signature.as_bytes());
    format!("0x{}", hex::encode(hash))
}
