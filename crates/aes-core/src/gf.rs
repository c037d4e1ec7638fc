//! Arithmetic in GF(2^8) modulo the AES polynomial `x^8 + x^4 + x^3 + x + 1`.

/// Low byte of the reduction polynomial (`0x11b`).
pub const REDUCTION: u8 = 0x1b;

/// Field addition, which is plain XOR.
#[inline]
pub const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplies `a` by `x`, reducing when the top bit is shifted out.
#[inline]
pub const fn xtime(a: u8) -> u8 {
    let shifted = a << 1;
    if a & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Multiplies two field elements by double-and-add.
///
/// The eight doublings `a, 2a, 4a, ..., 128a` are built with [`xtime`] and
/// the ones selected by the set bits of `b` are summed.
pub fn multiply(a: u8, b: u8) -> u8 {
    let mut powers = [0u8; 8];
    powers[0] = a;
    for i in 1..powers.len() {
        powers[i] = xtime(powers[i - 1]);
    }

    powers
        .iter()
        .enumerate()
        .filter(|(bit, _)| (b >> *bit) & 1 == 1)
        .fold(0, |acc, (_, term)| add(acc, *term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fips_multiplication_examples() {
        // FIPS-197 section 4.2: {57} * {83} = {c1}, {57} * {13} = {fe}
        assert_eq!(multiply(0x57, 0x83), 0xc1);
        assert_eq!(multiply(0x57, 0x13), 0xfe);
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x8e), 0x07);
    }

    #[test]
    fn xtime_matches_multiply_by_two() {
        for a in 0..=255u8 {
            assert_eq!(xtime(a), multiply(a, 0x02));
        }
    }

    #[test]
    fn every_nonzero_element_has_an_inverse() {
        for a in 1..=255u8 {
            let inverses = (1..=255u8).filter(|&b| multiply(a, b) == 1).count();
            assert_eq!(inverses, 1, "element {a:#04x}");
        }
    }

    proptest! {
        #[test]
        fn addition_is_commutative_and_self_inverse(a: u8, b: u8) {
            prop_assert_eq!(add(a, b), add(b, a));
            prop_assert_eq!(add(a, a), 0);
        }

        #[test]
        fn multiplication_is_associative(a: u8, b: u8, c: u8) {
            prop_assert_eq!(multiply(a, multiply(b, c)), multiply(multiply(a, b), c));
        }

        #[test]
        fn multiplication_is_commutative(a: u8, b: u8) {
            prop_assert_eq!(multiply(a, b), multiply(b, a));
        }

        #[test]
        fn multiplication_distributes_over_addition(a: u8, b: u8, c: u8) {
            prop_assert_eq!(multiply(a, add(b, c)), add(multiply(a, b), multiply(a, c)));
        }

        #[test]
        fn identity_and_zero(a: u8) {
            prop_assert_eq!(multiply(a, 1), a);
            prop_assert_eq!(multiply(a, 0), 0);
        }
    }
}
