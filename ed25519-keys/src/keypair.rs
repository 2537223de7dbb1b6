// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Ed25519 key pairs derived from 32-byte seeds.

use core::fmt::Debug;

use curve25519_arith::edwards::{CompressedEdwardsY, EdwardsPoint};

#[cfg(feature = "getrandom")]
use rand_core::OsRng;
use rand_core::{CryptoRng, RngCore};

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::KeyError;
use crate::expanded::ExpandedSeed;
use crate::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH};

/// An Ed25519 public key: the compressed encoding of \\(aB\\).
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PublicKey(pub(crate) [u8; PUBLIC_KEY_LENGTH]);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?})", &self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> PublicKey {
        PublicKey(bytes)
    }
}

impl PublicKey {
    /// Wrap 32 bytes as a public key.
    ///
    /// No validation is done here; [`crate::pk_to_curve25519`] checks
    /// the encoding when the key is converted.
    #[inline]
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> PublicKey {
        PublicKey(bytes)
    }

    /// Convert this public key to a byte array.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0
    }

    /// View this public key as a byte array.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// View this public key as a `CompressedEdwardsY`.
    pub const fn as_compressed(&self) -> CompressedEdwardsY {
        CompressedEdwardsY(self.0)
    }
}

/// An Ed25519 secret key: the 32-byte seed followed by the 32-byte
/// public key derived from it.
///
/// Instances of this secret are automatically overwritten with zeroes when they
/// fall out of scope.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Wrap 64 bytes (seed followed by public key) as a secret key.
    ///
    /// The public half is taken as given.  Use [`seed_keypair`] to build
    /// a secret key whose halves are known to agree.
    #[inline]
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> SecretKey {
        SecretKey(*bytes)
    }

    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// The seed this key was derived from (the first 32 bytes).
    pub fn seed(&self) -> [u8; SEED_LENGTH] {
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(&self.0[..SEED_LENGTH]);
        seed
    }

    /// The cached public key (the last 32 bytes).
    pub fn public_key(&self) -> PublicKey {
        let mut pk = [0u8; PUBLIC_KEY_LENGTH];
        pk.copy_from_slice(&self.0[SEED_LENGTH..]);
        PublicKey(pk)
    }
}

/// An Ed25519 key pair.
#[derive(Clone)]
pub struct Keypair {
    /// The secret half of this key pair.
    pub secret: SecretKey,
    /// The public half of this key pair.
    pub public: PublicKey,
}

impl Debug for Keypair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl Keypair {
    /// Convert this key pair to bytes: the 64-byte secret key, which
    /// already carries the public key in its upper half.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.secret.to_bytes()
    }
}

/// Derive the key pair for `seed`.
///
/// The secret scalar is `SHA-512(seed)[..32]` with the Ed25519 clamp
/// applied; the public key is that scalar times the basepoint.  The
/// digest and the scalar are wiped before returning.
pub fn seed_keypair(seed: &[u8; SEED_LENGTH]) -> Keypair {
    let expanded = ExpandedSeed::from_seed(seed);
    let scalar = expanded.ed25519_scalar();
    let public = PublicKey(EdwardsPoint::mul_base(&scalar).compress().to_bytes());

    let mut secret = SecretKey([0u8; SECRET_KEY_LENGTH]);
    secret.0[..SEED_LENGTH].copy_from_slice(seed);
    secret.0[SEED_LENGTH..].copy_from_slice(public.as_bytes());

    Keypair { secret, public }
}

/// Generate a key pair from a seed drawn from `csprng`.
///
/// # Errors
///
/// Returns [`KeyError::Rng`] if `csprng` fails.  The seed buffer is
/// wiped in either case.
pub fn keypair_from_rng<R>(csprng: &mut R) -> Result<Keypair, KeyError>
where
    R: CryptoRng + RngCore + ?Sized,
{
    let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
    csprng.try_fill_bytes(&mut seed[..])?;

    Ok(seed_keypair(&seed))
}

/// Generate a key pair from a seed drawn from the operating system's
/// random number generator.
///
/// # Errors
///
/// Returns [`KeyError::Rng`] if the operating system RNG fails.
#[cfg(feature = "getrandom")]
pub fn keypair() -> Result<Keypair, KeyError> {
    keypair_from_rng(&mut OsRng)
}

/// Extract the seed from a secret key.
pub fn sk_to_seed(sk: &SecretKey) -> [u8; SEED_LENGTH] {
    sk.seed()
}

/// Extract the cached public key from a secret key.
pub fn sk_to_pk(sk: &SecretKey) -> PublicKey {
    sk.public_key()
}

#[cfg(test)]
mod test {
    use super::*;

    use curve25519_arith::constants;
    use curve25519_arith::scalar::{clamp_ed25519, Scalar};
    use curve25519_arith::traits::IsIdentity;
    use hex_literal::hex;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sha2::{Digest, Sha512};

    #[test]
    fn zero_seed() {
        let keypair = seed_keypair(&[0u8; 32]);
        assert_eq!(
            keypair.public.to_bytes(),
            hex!("3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29")
        );
        assert_eq!(&keypair.secret.as_bytes()[..32], &[0u8; 32]);
        assert_eq!(&keypair.secret.as_bytes()[32..], keypair.public.as_bytes());
    }

    #[test]
    fn public_key_is_clamped_hash_times_basepoint() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..16 {
            let keypair = keypair_from_rng(&mut rng).unwrap();
            let seed = keypair.secret.seed();

            let mut lower = [0u8; 32];
            lower.copy_from_slice(&Sha512::digest(seed)[..32]);
            let clamped = clamp_ed25519(lower);
            assert_eq!(clamped[0] & 0b111, 0);
            assert_eq!(clamped[31] & 0b1100_0000, 0b0100_0000);

            let expected = EdwardsPoint::mul_base(&Scalar::from_bits(clamped));
            assert_eq!(keypair.public.to_bytes(), expected.compress().to_bytes());
        }
    }

    #[test]
    fn public_keys_are_in_the_prime_order_subgroup() {
        let mut rng = StdRng::seed_from_u64(0x0dd);
        for _ in 0..8 {
            let keypair = keypair_from_rng(&mut rng).unwrap();
            let point = keypair.public.as_compressed().decompress().unwrap();
            assert!((&point * &constants::BASEPOINT_ORDER).is_identity());
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let seed = [0xa5u8; 32];
        let a = seed_keypair(&seed);
        let b = seed_keypair(&seed);
        assert_eq!(a.public, b.public);
        assert_eq!(a.to_bytes(), b.to_bytes());
    }

    #[test]
    fn accessors_split_the_secret_key() {
        let seed = [3u8; 32];
        let keypair = seed_keypair(&seed);
        assert_eq!(sk_to_seed(&keypair.secret), seed);
        assert_eq!(sk_to_pk(&keypair.secret), keypair.public);
        let copy = SecretKey::from_bytes(keypair.secret.as_bytes());
        assert_eq!(copy.to_bytes(), keypair.to_bytes());
    }

    #[test]
    fn debug_never_shows_the_seed() {
        let seed = [0xeeu8; 32];
        let keypair = seed_keypair(&seed);
        let shown = std::format!("{:?} {:?}", keypair, keypair.secret);
        assert!(shown.contains("public"));
        assert!(!shown.contains(&std::format!("{:?}", seed)));
    }

    #[test]
    #[cfg(feature = "getrandom")]
    fn os_keypair_is_consistent() {
        let keypair = keypair().unwrap();
        let again = seed_keypair(&keypair.secret.seed());
        assert_eq!(again.public, keypair.public);
    }
}
