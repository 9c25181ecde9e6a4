//! BIP-32 hierarchical deterministic key derivation.
//!
//! [`Xprv`] is a full derivation node: it can derive both normal and
//! hardened children. [`Xpub`] is its watch-only counterpart holding only
//! the public key; hardened derivation is not available on it at all,
//! so a public-key-only caller cannot reach hardened subtrees.

use hmac::{Hmac, Mac};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, Scalar, U256};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::hash::hash160;
use crate::hdpath::{ChildIndex, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

/// HMAC key for master node derivation, fixed by BIP-32.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// BIP-32 extended private key.
///
/// Keys are zeroized on drop.
#[derive(Clone)]
pub struct Xprv {
    /// The underlying private key
    key: SigningKey,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// Parent key fingerprint (first 4 bytes of hash160 of parent public key)
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: u32,
}

impl Zeroize for Xprv {
    fn zeroize(&mut self) {
        // SigningKey zeroizes its scalar on drop; swap in a dummy key.
        let zeroed = SigningKey::from_slice(&[1u8; 32]).expect("constant key is valid");
        let _ = core::mem::replace(&mut self.key, zeroed);
        self.chain_code.zeroize();
        self.depth = 0;
        self.parent_fingerprint.zeroize();
    }
}

impl Drop for Xprv {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Xprv {
    /// Create the master node from a seed (BIP-32).
    ///
    /// The seed must be 16 to 64 bytes long.
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(Error::InvalidLength {
                expected: 64,
                actual: seed.len(),
            });
        }

        let mut mac =
            HmacSha512::new_from_slice(MASTER_HMAC_KEY).map_err(|_| Error::CryptoError)?;
        mac.update(seed);
        let result = mac.finalize().into_bytes();

        // First 32 bytes are the private key, last 32 are the chain code
        let key = SigningKey::from_slice(&result[..32]).map_err(|_| Error::InvalidPrivateKey)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&result[32..]);

        Ok(Self {
            key,
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
        })
    }

    /// Derive a child node at the given index.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        if self.depth == 255 {
            return Err(Error::MaxDepthExceeded);
        }

        let mut mac =
            HmacSha512::new_from_slice(&self.chain_code).map_err(|_| Error::CryptoError)?;

        match index {
            ChildIndex::Normal(_) => {
                // Normal derivation: HMAC-SHA512(chainCode, serP(point(kpar)) || ser32(i))
                mac.update(&self.public_key_compressed());
            }
            ChildIndex::Hardened(_) => {
                // Hardened derivation: HMAC-SHA512(chainCode, 0x00 || ser256(kpar) || ser32(i))
                let parent_secret: [u8; 32] = self.key.to_bytes().into();
                mac.update(&[0u8]);
                mac.update(&parent_secret);
            }
        }

        mac.update(&index.to_u32().to_be_bytes());
        let result = mac.finalize().into_bytes();

        let il = &result[..32];
        let ir = &result[32..];

        // Child key: child = parse256(IL) + parent (mod n)
        let parent_bytes: [u8; 32] = self.key.to_bytes().into();
        let parent_uint = U256::from_be_slice(&parent_bytes);
        let parent_scalar: Scalar = <Scalar as Reduce<U256>>::reduce(parent_uint);

        let il_uint = U256::from_be_slice(il);
        let il_scalar: Scalar = <Scalar as Reduce<U256>>::reduce(il_uint);

        let child_scalar = parent_scalar + il_scalar;
        let child_bytes: [u8; 32] = child_scalar.to_bytes().into();
        // Rejects the (astronomically unlikely) zero scalar.
        let child_key =
            SigningKey::from_slice(&child_bytes).map_err(|_| Error::InvalidPrivateKey)?;

        let parent_hash = hash160(&self.public_key_compressed());
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&parent_hash[..4]);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            key: child_key,
            chain_code,
            depth: self.depth + 1,
            parent_fingerprint,
            child_index: index.to_u32(),
        })
    }

    /// Derive a node by walking a full derivation path from this node.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for &index in path.indices() {
            current = current.derive_child(index)?;
        }
        Ok(current)
    }

    /// Get the raw private key bytes.
    ///
    /// **Security Warning**: handle with care; the returned buffer is
    /// zeroized on drop.
    pub fn private_key_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.key.to_bytes().into())
    }

    /// Get the compressed public key (33 bytes).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.key.verifying_key().to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the uncompressed public key (65 bytes, 0x04 prefix).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let point = self.key.verifying_key().to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the watch-only counterpart of this node.
    pub fn to_public(&self) -> Xpub {
        Xpub {
            key: *self.key.verifying_key(),
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
        }
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth in the derivation tree.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the raw child index that produced this node.
    pub const fn child_index(&self) -> u32 {
        self.child_index
    }
}

impl core::fmt::Debug for Xprv {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Xprv")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// BIP-32 extended public key (watch-only).
///
/// Supports exclusively non-hardened child derivation; a hardened step
/// needs the parent private key and therefore an [`Xprv`].
#[derive(Clone)]
pub struct Xpub {
    /// The underlying public key
    key: VerifyingKey,
    /// Chain code for key derivation
    chain_code: [u8; 32],
    /// Depth in the derivation tree (0 for master)
    depth: u8,
    /// Parent key fingerprint
    parent_fingerprint: [u8; 4],
    /// Child index that produced this key
    child_index: u32,
}

impl Xpub {
    /// Derive a child node at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardenedDerivationFromPublic`] for a hardened
    /// index.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self> {
        if index.is_hardened() {
            return Err(Error::HardenedDerivationFromPublic);
        }
        if self.depth == 255 {
            return Err(Error::MaxDepthExceeded);
        }

        let mut mac =
            HmacSha512::new_from_slice(&self.chain_code).map_err(|_| Error::CryptoError)?;
        mac.update(&self.public_key_compressed());
        mac.update(&index.to_u32().to_be_bytes());

        let result = mac.finalize().into_bytes();
        let il = &result[..32];
        let ir = &result[32..];

        // Child public key: Ki = point(parse256(IL)) + Kpar
        let il_uint = U256::from_be_slice(il);
        let il_scalar: Scalar = <Scalar as Reduce<U256>>::reduce(il_uint);
        let il_point = ProjectivePoint::GENERATOR * il_scalar;

        let parent_point = ProjectivePoint::from(self.key.as_affine());
        let child_point = il_point + parent_point;
        let child_encoded = child_point.to_affine().to_encoded_point(true);

        let child_key = VerifyingKey::from_sec1_bytes(child_encoded.as_bytes())
            .map_err(|_| Error::InvalidPublicKey)?;

        let parent_hash = hash160(&self.public_key_compressed());
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&parent_hash[..4]);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            key: child_key,
            chain_code,
            depth: self.depth + 1,
            parent_fingerprint,
            child_index: index.to_u32(),
        })
    }

    /// Derive a node by walking a non-hardened derivation path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HardenedDerivationFromPublic`] if the path
    /// contains any hardened segment.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for &index in path.indices() {
            current = current.derive_child(index)?;
        }
        Ok(current)
    }

    /// Get the compressed public key (33 bytes).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = self.key.to_encoded_point(true);
        let mut result = [0u8; 33];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the uncompressed public key (65 bytes, 0x04 prefix).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let point = self.key.to_encoded_point(false);
        let mut result = [0u8; 65];
        result.copy_from_slice(point.as_bytes());
        result
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Get the depth in the derivation tree.
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the parent fingerprint.
    pub const fn parent_fingerprint(&self) -> &[u8; 4] {
        &self.parent_fingerprint
    }

    /// Get the raw child index that produced this node.
    pub const fn child_index(&self) -> u32 {
        self.child_index
    }
}

impl core::fmt::Debug for Xpub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Xpub")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP-32 test vector 1
    const TEST_SEED_1: &[u8] = &hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

    #[test]
    fn test_master_key_from_seed() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        assert_eq!(master.depth(), 0);
        assert_eq!(
            hex::encode(*master.private_key_bytes()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }

    #[test]
    fn test_vector1_chain_m_0h() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let child = master.derive_child(ChildIndex::Hardened(0)).unwrap();
        assert_eq!(child.depth(), 1);
        assert_eq!(
            hex::encode(*child.private_key_bytes()),
            "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "47fdacbd0f1097043b78c63c20c34ef4ed9a111d980047ad16282c7ae6236141"
        );
    }

    #[test]
    fn test_vector1_chain_m_0h_1() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let node = master
            .derive_child(ChildIndex::Hardened(0))
            .unwrap()
            .derive_child(ChildIndex::Normal(1))
            .unwrap();
        assert_eq!(
            hex::encode(*node.private_key_bytes()),
            "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368"
        );
    }

    #[test]
    fn test_rejects_short_seed() {
        assert!(Xprv::from_seed(&[0u8; 8]).is_err());
    }

    #[test]
    fn test_derive_path() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        let node = master.derive_path(&path).unwrap();
        assert_eq!(node.depth(), 5);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let path: DerivationPath = "m/49'/1'/0'/0/0".parse().unwrap();
        let a = master.derive_path(&path).unwrap();
        let b = master.derive_path(&path).unwrap();
        assert_eq!(*a.private_key_bytes(), *b.private_key_bytes());
        assert_eq!(a.chain_code(), b.chain_code());
    }

    #[test]
    fn test_xpub_matches_xprv_derivation() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let account = master.derive_child(ChildIndex::Hardened(44)).unwrap();

        // Derive the same non-hardened child on both sides.
        let via_prv = account.derive_child(ChildIndex::Normal(2)).unwrap();
        let via_pub = account.to_public().derive_child(ChildIndex::Normal(2)).unwrap();

        assert_eq!(
            via_prv.public_key_compressed(),
            via_pub.public_key_compressed()
        );
        assert_eq!(via_prv.chain_code(), via_pub.chain_code());
    }

    #[test]
    fn test_xpub_rejects_hardened() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let xpub = master.to_public();
        let result = xpub.derive_child(ChildIndex::Hardened(0));
        assert!(matches!(result, Err(Error::HardenedDerivationFromPublic)));
    }

    #[test]
    fn test_xpub_rejects_hardened_path() {
        let master = Xprv::from_seed(TEST_SEED_1).unwrap();
        let xpub = master.to_public();
        let path: DerivationPath = "m/0/1'/2".parse().unwrap();
        assert!(xpub.derive_path(&path).is_err());
    }
}
