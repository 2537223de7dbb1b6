// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! The SHA-512 expansion of a seed, wiped when dropped.

use core::fmt::Debug;

use curve25519_arith::scalar::{clamp_ed25519, clamp_x25519, Scalar};

use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha512};

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::SEED_LENGTH;

/// Owns `SHA-512(seed)`.  The lower half, clamped, is the secret
/// scalar of the key pair.  The upper half is the signing nonce prefix
/// and is never read here.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct ExpandedSeed {
    digest: [u8; 64],
}

impl ExpandedSeed {
    /// Hash `seed` with SHA-512.
    pub(crate) fn from_seed(seed: &[u8; SEED_LENGTH]) -> ExpandedSeed {
        let mut expanded = ExpandedSeed { digest: [0u8; 64] };
        let mut hasher = Sha512::new();
        hasher.update(seed);
        hasher.finalize_into(GenericArray::from_mut_slice(&mut expanded.digest));
        expanded
    }

    fn lower(&self) -> [u8; 32] {
        let mut lower = [0u8; 32];
        lower.copy_from_slice(&self.digest[..32]);
        lower
    }

    /// The lower half with the Ed25519 clamp applied.
    pub(crate) fn ed25519_scalar(&self) -> Zeroizing<Scalar> {
        Zeroizing::new(Scalar::from_bits(clamp_ed25519(self.lower())))
    }

    /// The lower half with the X25519 clamp applied.
    pub(crate) fn x25519_scalar_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(clamp_x25519(self.lower()))
    }
}

impl Debug for ExpandedSeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ExpandedSeed { .. }")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use hex_literal::hex;

    #[test]
    fn digest_matches_sha512() {
        let seed = [0x5au8; 32];
        let expanded = ExpandedSeed::from_seed(&seed);
        assert_eq!(&expanded.digest[..], &Sha512::digest(seed)[..]);
    }

    #[test]
    fn clamps_differ_only_in_bit_254_handling() {
        let seed = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let expanded = ExpandedSeed::from_seed(&seed);
        let ed = expanded.ed25519_scalar().to_bytes();
        let x = *expanded.x25519_scalar_bytes();

        assert_eq!(ed[0] & 7, 0);
        assert_eq!(ed[31] & 0xc0, 0x40);
        assert_eq!(x[0] & 7, 0);
        assert_eq!(x[31] & 0xc0, 0x40);
        // Setting bit 254 afterwards makes the two agree on every input.
        assert_eq!(ed, x);
    }

    #[test]
    fn debug_is_redacted() {
        let expanded = ExpandedSeed::from_seed(&[1u8; 32]);
        let shown = std::format!("{:?}", expanded);
        assert_eq!(shown, "ExpandedSeed { .. }");
    }

    #[test]
    fn zeroize_clears_digest() {
        let mut expanded = ExpandedSeed::from_seed(&[1u8; 32]);
        expanded.zeroize();
        assert_eq!(expanded.digest, [0u8; 64]);
    }
}
