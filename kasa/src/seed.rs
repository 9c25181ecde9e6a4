//! BIP-39 seed stretching.
//!
//! Converts a mnemonic phrase (plus optional passphrase) into the 64-byte
//! binary seed that roots all hierarchical key derivation.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// Number of PBKDF2 rounds for seed derivation.
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Length of the derived seed in bytes.
pub const SEED_LEN: usize = 64;

/// Derive the 64-byte seed from a mnemonic phrase and passphrase.
///
/// Applies PBKDF2-HMAC-SHA512 over the phrase with the salt
/// `"mnemonic" + passphrase`. The stretch operates on the phrase text
/// itself, so it is total over any input phrase and deterministic:
/// identical inputs always produce identical seeds.
pub fn phrase_to_seed(phrase: &str, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    let salt = format!("mnemonic{passphrase}");

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        phrase.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        seed.as_mut(),
    );

    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn known_trezor_vector() {
        let seed = phrase_to_seed(PHRASE, "TREZOR");
        let expected = hex_literal::hex!(
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
        assert_eq!(*seed, expected);
    }

    #[test]
    fn deterministic() {
        let a = phrase_to_seed(PHRASE, "pass");
        let b = phrase_to_seed(PHRASE, "pass");
        assert_eq!(*a, *b);
    }

    #[test]
    fn passphrase_changes_seed() {
        let a = phrase_to_seed(PHRASE, "");
        let b = phrase_to_seed(PHRASE, "x");
        assert_ne!(*a, *b);
    }
}
