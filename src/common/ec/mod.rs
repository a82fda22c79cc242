mod galois;
mod poly;

pub use galois::{Alpha, G};
pub use poly::{Polynomial, Term};

// Reed-Solomon error correction codewords
//------------------------------------------------------------------------------

/// Generator polynomial (x - a^0)(x - a^1)...(x - a^(ecc_count - 1)) in alpha notation.
pub fn generator_polynomial(ecc_count: usize) -> Polynomial<Alpha> {
    debug_assert!(ecc_count > 0, "Generator needs at least one factor");

    let mut gen =
        Polynomial::new(vec![Term { coef: Alpha(0), exp: 1 }, Term { coef: Alpha(0), exp: 0 }]);
    for i in 1..ecc_count {
        let factor = Polynomial::new(vec![
            Term { coef: Alpha(0), exp: 1 },
            Term { coef: Alpha(i as u8), exp: 0 },
        ]);
        gen = gen.mul(&factor);
    }
    gen
}

// Synthetic division of the message polynomial (shifted up by ecc_count) by the
// generator. The remainder coefficients are the ecc codewords, highest exponent first
pub fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    debug_assert!(!block.is_empty(), "Empty data block");

    let mut rem = Polynomial::from_codewords(block);
    rem.shift(ecc_count);
    let mut gen = generator_polynomial(ecc_count);
    gen.shift(block.len() - 1);
    let gen_lead_exp = gen.degree().unwrap_or(0);

    while let Some(lead) = rem.lead() {
        if lead.exp < ecc_count {
            break;
        }
        if lead.coef.is_zero() {
            rem.pop_lead();
            if let Some(last) = rem.terms().last().copied() {
                if last.exp > 0 {
                    rem.push(Term { coef: G(0), exp: last.exp - 1 });
                }
            }
            continue;
        }
        let lower_by = gen_lead_exp - lead.exp;
        let factor = gen.scale(lead.coef.log(), lower_by).to_int();
        rem = rem.xor(&factor);
        let dropped = rem.pop_lead();
        debug_assert!(dropped.map_or(false, |t| t.coef.is_zero()), "Lead term didn't cancel");
    }

    // Zero terms may have been dropped along the way
    let mut ecc = vec![0u8; ecc_count];
    for t in rem.terms() {
        debug_assert!(t.exp < ecc_count, "Remainder degree too high: {}", t.exp);
        ecc[ecc_count - 1 - t.exp] = t.coef.into();
    }
    ecc
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{ecc_per_block, generator_polynomial, Alpha, Polynomial, Term};

    #[test]
    fn test_generator_polynomial_7() {
        let exp_alpha = [0, 87, 229, 146, 149, 238, 102, 21];
        let exp = Polynomial::new(
            exp_alpha.iter().enumerate().map(|(i, &a)| Term { coef: Alpha(a), exp: 7 - i }).collect(),
        );
        assert_eq!(generator_polynomial(7), exp);
    }

    #[test]
    fn test_generator_polynomial_10() {
        let exp_alpha = [0, 251, 67, 46, 61, 118, 70, 64, 94, 32, 45];
        let exp = Polynomial::new(
            exp_alpha.iter().enumerate().map(|(i, &a)| Term { coef: Alpha(a), exp: 10 - i }).collect(),
        );
        assert_eq!(generator_polynomial(10), exp);
    }

    #[test_case(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17")]
    #[test_case(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10")]
    #[test_case(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'")]
    fn test_ecc_per_block(block: &[u8], ecc_count: usize, exp: &[u8]) {
        assert_eq!(ecc_per_block(block, ecc_count), exp);
    }

    #[test]
    fn test_ecc_with_leading_zero_codewords() {
        let ecc = ecc_per_block(&[0, 0, 0, 0x40, 0xd2], 7);
        assert_eq!(ecc, ecc_per_block(&[0x40, 0xd2], 7));
    }

    #[test]
    fn test_ecc_of_zero_block() {
        assert_eq!(ecc_per_block(&[0; 9], 17), vec![0; 17]);
    }
}
