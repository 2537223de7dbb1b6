// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Scalars used as exponents for scalar multiplication.
//!
//! The Ed25519 basepoint \\(B\\) has prime order
//!
//! $$
//! \ell = 2\^{252} + 27742317777372353535851937790883648493.
//! $$
//!
//! A `Scalar` here is a 32-byte little-endian integer, and it shows up
//! in two disjoint ways:
//!
//! * **clamped**, as produced by [`clamp_ed25519`] or [`clamp_x25519`]:
//!   the low three bits are cleared, bit 254 is set and bit 255 is
//!   cleared.  The value is used as is, never reduced.
//!
//! * **reduced modulo \\(\ell\\)**, as produced by
//!   [`Scalar::from_bytes_mod_order`] or checked by
//!   [`Scalar::from_canonical_bytes`].  The group order itself is
//!   available as [`crate::constants::BASEPOINT_ORDER`].
//!
//! There is no scalar field arithmetic here: scalars are only ever
//! recoded into signed digits for multiplication.
//!
//! The two clamping conventions differ only in whether bit 254 is
//! cleared before being set again, and they are kept as separate
//! functions with separate masks so that neither can silently replace
//! the other.

use core::fmt::Debug;
use core::ops::Index;

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;
use subtle::CtOption;

use zeroize::Zeroize;

/// Mask applied to byte 0 of a clamped scalar: clears the low three
/// bits, making the scalar a multiple of the cofactor.
pub const CLAMP_LOW_MASK: u8 = 0b1111_1000;

/// Mask applied to byte 31 of an Ed25519 signing exponent: clears
/// bits 254 and 255.
pub const ED25519_CLAMP_HIGH_MASK: u8 = 0b0011_1111;

/// Mask applied to byte 31 of an X25519 scalar: clears bit 255.
pub const X25519_CLAMP_HIGH_MASK: u8 = 0b0111_1111;

/// Bit set in byte 31 of every clamped scalar (bit 254 overall).
pub const CLAMP_HIGH_BIT: u8 = 0b0100_0000;

/// The group order \\(\ell\\) as four little-endian `u64` limbs.
const L_LIMBS: [u64; 4] = [
    0x5812631a5cf5d3ed,
    0x14def9dea2f79cd6,
    0x0000000000000000,
    0x1000000000000000,
];

/// \\(8\ell, 4\ell, 2\ell, \ell\\), the multiples subtracted by
/// [`Scalar::from_bytes_mod_order`].
const L_MULTIPLES: [[u64; 4]; 4] = [
    [
        0xc09318d2e7ae9f68,
        0xa6f7cef517bce6b2,
        0x0000000000000000,
        0x8000000000000000,
    ],
    [
        0x60498c6973d74fb4,
        0x537be77a8bde7359,
        0x0000000000000000,
        0x4000000000000000,
    ],
    [
        0xb024c634b9eba7da,
        0x29bdf3bd45ef39ac,
        0x0000000000000000,
        0x2000000000000000,
    ],
    L_LIMBS,
];

/// The `Scalar` struct holds an integer \\(s < 2\^{255} \\) which
/// represents an exponent for Edwards or Montgomery scalar
/// multiplication.
#[derive(Copy, Clone, Hash)]
pub struct Scalar {
    /// `bytes` is a little-endian byte encoding of an integer representing a scalar.
    ///
    /// The high bit is always clear, which is what lets the signed-digit
    /// recodings absorb their final carry.
    pub(crate) bytes: [u8; 32],
}

impl Scalar {
    /// The scalar \\( 0 \\).
    pub const ZERO: Self = Self { bytes: [0u8; 32] };

    /// The scalar \\( 1 \\).
    pub const ONE: Self = Self {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0,
        ],
    };

    /// Construct a `Scalar` from the low 255 bits of a 256-bit integer,
    /// without reducing it modulo the group order.
    ///
    /// This is the constructor used for clamped scalars, whose value
    /// matters exactly and must not be reduced.
    pub const fn from_bits(bytes: [u8; 32]) -> Scalar {
        let mut s = Scalar { bytes };
        // Ensure that s < 2^255 by masking the high bit
        s.bytes[31] &= 0b0111_1111;

        s
    }

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order \\( \ell \\).
    ///
    /// Runs in constant time: \\(8\ell, 4\ell, 2\ell, \ell\\) are each
    /// conditionally subtracted, which covers every quotient below
    /// \\(16 > 2\^{256}/\ell\\).
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let mut limbs = read_le_u64s(&bytes);
        for multiple in L_MULTIPLES.iter() {
            conditional_sub(&mut limbs, multiple);
        }
        let s = Scalar {
            bytes: write_le_u64s(&limbs),
        };
        limbs.zeroize();

        debug_assert!(bool::from(s.is_canonical()));
        s
    }

    /// Attempt to construct a `Scalar` from a canonical byte representation.
    ///
    /// # Return
    ///
    /// - `Some(s)`, where `s` is the `Scalar` corresponding to `bytes`,
    ///   if `bytes` is a canonical byte representation modulo the group order \\( \ell \\);
    /// - `None` if `bytes` is not a canonical byte representation.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let candidate = Scalar { bytes };
        CtOption::new(candidate, candidate.is_canonical())
    }

    /// Check whether this `Scalar` is the canonical representative mod \\(\ell\\).
    pub fn is_canonical(&self) -> Choice {
        let limbs = read_le_u64s(&self.bytes);
        let (_, borrow) = sub_with_borrow(&limbs, &L_LIMBS);
        // A borrow out of the top limb means self < l.
        Choice::from(borrow as u8)
    }

    /// Convert this `Scalar` to its underlying sequence of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// View the little-endian byte encoding of the integer representing this Scalar.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Get the bits of the scalar, in little-endian order
    pub(crate) fn bits_le(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        (0..256).map(|i| {
            // As i runs from 0..256, the bottom 3 bits index the bit, while the upper bits index
            // the byte. Since self.bytes is little-endian at the byte level, this iterator is
            // little-endian on the bit level
            ((self.bytes[i >> 3] >> (i & 7)) & 1u8) == 1
        })
    }

    /// Compute a width-\\(w\\) "Non-Adjacent Form" of this scalar.
    ///
    /// A width-\\(w\\) NAF of a positive integer \\(k\\) is an expression
    /// $$
    /// k = \sum_{i=0}\^m n\_i 2\^i,
    /// $$
    /// where each nonzero
    /// coefficient \\(n\_i\\) is odd and bounded by \\(|n\_i| < 2\^{w-1}\\),
    /// \\(n\_{m-1}\\) is nonzero, and at most one of any \\(w\\) consecutive
    /// coefficients is nonzero.  (Hankerson, Menezes, Vanstone; def 3.32).
    ///
    /// The length of the NAF is at most one more than the length of
    /// the binary representation of \\(k\\).  This is why the
    /// `Scalar` keeps its high bit clear: the NAF of a value below
    /// \\(2\^{255}\\) fits in 256 digits.
    ///
    /// The recoding branches on the digits, so it must only be applied
    /// to public scalars.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        // required by the NAF definition
        debug_assert!(w >= 2);
        // required so that the NAF digits fit in i8
        debug_assert!(w <= 8);

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        x_u64[..4].copy_from_slice(&read_le_u64s(&self.bytes));

        let width = 1 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            // Construct a buffer of bits of the scalar, starting at bit `pos`
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                // This window's bits are contained in a single u64
                x_u64[u64_idx] >> bit_idx
            } else {
                // Combine the current u64's bits with the bits from the next u64
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            // Add the carry into the current window
            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                // If the window value is even, preserve the carry and continue.
                // Why is the carry preserved?
                // If carry == 0 and window & 1 == 0, then the next carry should be 0
                // If carry == 1 and window & 1 == 0, then bit_buf & 1 == 1 so the next carry should be 1
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }

    /// Write this scalar in radix 16, with coefficients in \\([-8,8)\\),
    /// i.e., compute \\(a\_i\\) such that
    /// $$
    ///    a = a\_0 + a\_1 16\^1 + \cdots + a_{63} 16\^{63},
    /// $$
    /// with \\(-8 \leq a_i < 8\\) for \\(0 \leq i < 63\\) and \\(-8 \leq a_{63} \leq 8\\).
    ///
    /// The recoding does not branch on the digit values.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix.
        // Convert from radix 256 (bytes) to radix 16 (nibbles)
        #[allow(clippy::identity_op)]
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            (x >> 0) & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self[i]) as i8;
            output[2 * i + 1] = top_half(self[i]) as i8;
        }
        // Precondition note: since self[31] <= 127, output[63] <= 7

        // Step 2: recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // Precondition note: output[63] is not recentered.  It
        // increases by carry <= 1.  Thus output[63] <= 8.

        output
    }
}

/// Clamp a 32-byte integer into an Ed25519 signing exponent.
///
/// Clears the low three bits and bits 254 and 255, then sets bit 254.
pub const fn clamp_ed25519(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= CLAMP_LOW_MASK;
    bytes[31] &= ED25519_CLAMP_HIGH_MASK;
    bytes[31] |= CLAMP_HIGH_BIT;
    bytes
}

/// Clamp a 32-byte integer into an X25519 scalar.
///
/// Clears the low three bits and bit 255, then sets bit 254.
pub const fn clamp_x25519(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= CLAMP_LOW_MASK;
    bytes[31] &= X25519_CLAMP_HIGH_MASK;
    bytes[31] |= CLAMP_HIGH_BIT;
    bytes
}

fn read_le_u64s(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_le_bytes(word);
    }
    limbs
}

fn write_le_u64s(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_le_bytes());
    }
    bytes
}

/// Compute `a - b` over four limbs, returning the difference and the
/// borrow out of the top limb.
fn sub_with_borrow(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut difference = [0u64; 4];
    let mut borrow = 0u64;
    for i in 0..4 {
        let (d, b1) = a[i].overflowing_sub(b[i]);
        let (d, b2) = d.overflowing_sub(borrow);
        difference[i] = d;
        borrow = (b1 | b2) as u64;
    }
    (difference, borrow)
}

/// Replace `a` by `a - m` when `a >= m`, in constant time.
fn conditional_sub(a: &mut [u64; 4], m: &[u64; 4]) {
    let (difference, borrow) = sub_with_borrow(a, m);
    let underflowed = Choice::from(borrow as u8);
    for i in 0..4 {
        a[i] = u64::conditional_select(&difference[i], &a[i], underflowed);
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?},\n}}", &self.bytes)
    }
}

impl Eq for Scalar {}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl Index<usize> for Scalar {
    type Output = u8;

    /// Index the bytes of the representative for this `Scalar`.  Mutation is not permitted.
    fn index(&self, _index: usize) -> &u8 {
        &(self.bytes[_index])
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; 32];
        #[allow(clippy::needless_range_loop)]
        for i in 0..32 {
            bytes[i] = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Scalar { bytes }
    }
}

impl From<u64> for Scalar {
    fn from(x: u64) -> Scalar {
        let mut s_bytes = [0u8; 32];
        s_bytes[..8].copy_from_slice(&x.to_le_bytes());
        Scalar { bytes: s_bytes }
    }
}

impl Default for Scalar {
    fn default() -> Scalar {
        Scalar::ZERO
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;

    use rand::RngCore;

    /// x = 2238329342913194256032495932344128051776374960164957527413114840482143558222
    static X: Scalar = Scalar {
        bytes: [
            0x4e, 0x5a, 0xb4, 0x34, 0x5d, 0x47, 0x08, 0x84, 0x59, 0x13, 0xb4, 0x64, 0x1b, 0xc2, 0x7d,
            0x52, 0x52, 0xa5, 0x85, 0x10, 0x1b, 0xcc, 0x42, 0x44, 0xd4, 0x49, 0xf4, 0xa8, 0x79, 0xd9,
            0xf2, 0x04,
        ],
    };

    /// The integer value of a little-endian digit expansion, as 32 bytes.
    fn reconstruct(digits: &[i8], radix_bits: usize) -> [u8; 32] {
        // Horner's rule over a 5-limb signed accumulator, top digit first.
        let mut acc = [0i128; 5];
        for &d in digits.iter().rev() {
            let mut carry = 0i128;
            for limb in acc.iter_mut() {
                let v = (*limb << radix_bits) + carry;
                *limb = v & 0xffff_ffff_ffff_ffff;
                carry = v >> 64;
            }
            acc[0] += d as i128;
            // normalise
            let mut c = 0i128;
            for limb in acc.iter_mut() {
                let v = *limb + c;
                *limb = v.rem_euclid(1 << 64);
                c = v.div_euclid(1 << 64);
            }
        }
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            limbs[i] = acc[i] as u64;
        }
        write_le_u64s(&limbs)
    }

    #[test]
    fn from_bits_clears_high_bit() {
        let s = Scalar::from_bits([0xff; 32]);
        assert_eq!(s[31], 0x7f);
        assert_eq!(s[0], 0xff);
    }

    #[test]
    fn basepoint_order_is_not_canonical() {
        assert!(!bool::from(constants::BASEPOINT_ORDER.is_canonical()));
        let l_minus_one = {
            let mut b = constants::BASEPOINT_ORDER.to_bytes();
            b[0] -= 1;
            b
        };
        assert!(bool::from(
            Scalar::from_canonical_bytes(l_minus_one).is_some()
        ));
        assert!(bool::from(
            Scalar::from_canonical_bytes(constants::BASEPOINT_ORDER.to_bytes()).is_none()
        ));
    }

    #[test]
    fn reduction_of_group_order_is_zero() {
        let reduced = Scalar::from_bytes_mod_order(constants::BASEPOINT_ORDER.to_bytes());
        assert_eq!(reduced, Scalar::ZERO);
    }

    #[test]
    fn reduction_of_largest_input() {
        // 2^256 - 1 mod l, from Sage
        let expected = Scalar {
            bytes: [
                0x1c, 0x95, 0x98, 0x8d, 0x74, 0x31, 0xec, 0xd6, 0x70, 0xcf, 0x7d, 0x73, 0xf4, 0x5b,
                0xef, 0xc6, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0x0f,
            ],
        };
        assert_eq!(Scalar::from_bytes_mod_order([0xff; 32]), expected);
    }

    #[test]
    fn reduction_keeps_canonical_input() {
        assert_eq!(Scalar::from_bytes_mod_order(X.bytes), X);
    }

    #[test]
    fn reduction_is_canonical_for_random_input() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let s = Scalar::from_bytes_mod_order(bytes);
            assert!(bool::from(s.is_canonical()));
        }
    }

    #[test]
    fn non_adjacent_form_reconstructs_scalar() {
        for w in 2..=8 {
            let naf = X.non_adjacent_form(w);
            assert_eq!(reconstruct(&naf, 1), X.bytes, "w = {}", w);

            let bound = 1i16 << (w - 1);
            let mut last_nonzero: Option<usize> = None;
            for (i, &d) in naf.iter().enumerate() {
                if d == 0 {
                    continue;
                }
                assert_eq!(d & 1, 1, "NAF digits are odd");
                assert!((d as i16).abs() < bound);
                if let Some(j) = last_nonzero {
                    assert!(i - j >= w, "nonzero digits are w apart");
                }
                last_nonzero = Some(i);
            }
        }
    }

    #[test]
    fn non_adjacent_form_of_group_order() {
        let naf = constants::BASEPOINT_ORDER.non_adjacent_form(5);
        assert_eq!(reconstruct(&naf, 1), constants::BASEPOINT_ORDER.bytes);
    }

    #[test]
    fn radix_16_digits_are_centred() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let s = Scalar::from_bits(clamp_ed25519(bytes));
            let digits = s.as_radix_16();
            for &d in &digits[..63] {
                assert!((-8..8).contains(&d));
            }
            assert!((-8..=8).contains(&digits[63]));
            assert_eq!(reconstruct(&digits, 4), s.bytes);
        }
    }

    #[test]
    fn clamps_differ_only_in_bit_254_handling() {
        let ed = clamp_ed25519([0xff; 32]);
        let x = clamp_x25519([0xff; 32]);
        assert_eq!(ed[0], 0xf8);
        assert_eq!(x[0], 0xf8);
        assert_eq!(ed[31], 0x40);
        assert_eq!(x[31], 0x7f);
        assert_eq!(&ed[1..31], &x[1..31]);

        let ed = clamp_ed25519([0x00; 32]);
        let x = clamp_x25519([0x00; 32]);
        assert_eq!(ed, x);
        assert_eq!(ed[31], 0x40);
    }

    #[test]
    fn bits_le_matches_bytes() {
        let bits: [bool; 256] = {
            let mut out = [false; 256];
            for (o, b) in out.iter_mut().zip(X.bits_le()) {
                *o = b;
            }
            out
        };
        for i in 0..32 {
            let mut byte = 0u8;
            for j in 0..8 {
                byte |= (bits[8 * i + j] as u8) << j;
            }
            assert_eq!(byte, X.bytes[i]);
        }
    }
}
