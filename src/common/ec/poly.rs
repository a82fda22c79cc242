use super::galois::{Alpha, G};

// Polynomial over GF(256) as (coefficient, exponent) terms, highest exponent first.
// The coefficient type fixes the notation: G for integer values, Alpha for exponents
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Term<C> {
    pub coef: C,
    pub exp: usize,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Polynomial<C> {
    terms: Vec<Term<C>>,
}

impl<C: Copy> Polynomial<C> {
    pub fn new(terms: Vec<Term<C>>) -> Self {
        debug_assert!(
            terms.windows(2).all(|w| w[0].exp > w[1].exp),
            "Terms must be strictly exponent descending"
        );
        Self { terms }
    }

    pub fn terms(&self) -> &[Term<C>] {
        &self.terms
    }

    pub fn lead(&self) -> Option<Term<C>> {
        self.terms.first().copied()
    }

    pub fn degree(&self) -> Option<usize> {
        self.terms.first().map(|t| t.exp)
    }

    /// Multiplies by x^shift.
    pub fn shift(&mut self, shift: usize) {
        self.terms.iter_mut().for_each(|t| t.exp += shift);
    }
}

// Integer notation
//------------------------------------------------------------------------------

impl Polynomial<G> {
    /// Codewords as coefficients of x^(n-1) down to x^0.
    pub fn from_codewords(codewords: &[u8]) -> Self {
        let n = codewords.len();
        let terms =
            codewords.iter().enumerate().map(|(i, &c)| Term { coef: G(c), exp: n - 1 - i }).collect();
        Self { terms }
    }

    /// Field addition, matching terms by exponent.
    pub fn xor(&self, other: &Self) -> Self {
        let (a, b) = (&self.terms, &other.terms);
        let mut terms = Vec::with_capacity(a.len().max(b.len()));
        let (mut i, mut j) = (0, 0);
        loop {
            let term = match (a.get(i), b.get(j)) {
                (Some(x), Some(y)) if x.exp == y.exp => {
                    i += 1;
                    j += 1;
                    Term { coef: x.coef + y.coef, exp: x.exp }
                }
                (Some(x), Some(y)) if x.exp < y.exp => {
                    j += 1;
                    *y
                }
                (Some(x), _) => {
                    i += 1;
                    *x
                }
                (None, Some(y)) => {
                    j += 1;
                    *y
                }
                (None, None) => break,
            };
            terms.push(term);
        }
        Self { terms }
    }

    pub fn pop_lead(&mut self) -> Option<Term<G>> {
        if self.terms.is_empty() {
            None
        } else {
            Some(self.terms.remove(0))
        }
    }

    pub fn push(&mut self, term: Term<G>) {
        debug_assert!(
            self.terms.last().map_or(true, |t| t.exp > term.exp),
            "Pushed term must have the lowest exponent"
        );
        self.terms.push(term);
    }
}

// Alpha notation
//------------------------------------------------------------------------------

impl Polynomial<Alpha> {
    pub fn to_int(&self) -> Polynomial<G> {
        let terms = self.terms.iter().map(|t| Term { coef: t.coef.value(), exp: t.exp }).collect();
        Polynomial { terms }
    }

    /// Product of two polynomials. Terms landing on the same exponent are added in
    /// integer notation and converted back; a sum of zero drops the term.
    pub fn mul(&self, other: &Self) -> Self {
        let max_exp = self.degree().unwrap_or(0) + other.degree().unwrap_or(0);
        let mut sums = vec![G(0); max_exp + 1];
        for x in &self.terms {
            for y in &other.terms {
                sums[x.exp + y.exp] += (x.coef * y.coef).value();
            }
        }
        let terms = sums
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, g)| !g.is_zero())
            .map(|(exp, g)| Term { coef: g.log(), exp })
            .collect();
        Self { terms }
    }

    /// Multiplies every term by `factor` and lowers its exponent by `lower_by`.
    pub fn scale(&self, factor: Alpha, lower_by: usize) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|t| {
                debug_assert!(t.exp >= lower_by, "Exponent underflow: {} - {lower_by}", t.exp);
                Term { coef: t.coef * factor, exp: t.exp - lower_by }
            })
            .collect();
        Self { terms }
    }
}

#[cfg(test)]
mod poly_tests {
    use super::{Polynomial, Term};
    use crate::common::ec::galois::{Alpha, G};

    fn alpha(terms: &[(u8, usize)]) -> Polynomial<Alpha> {
        Polynomial::new(terms.iter().map(|&(c, exp)| Term { coef: Alpha(c), exp }).collect())
    }

    fn int(terms: &[(u8, usize)]) -> Polynomial<G> {
        Polynomial::new(terms.iter().map(|&(c, exp)| Term { coef: G(c), exp }).collect())
    }

    #[test]
    fn test_from_codewords() {
        let poly = Polynomial::from_codewords(&[32, 91, 11]);
        assert_eq!(poly, int(&[(32, 2), (91, 1), (11, 0)]));
    }

    #[test]
    fn test_mul_glues_equal_exponents() {
        // (x + a^0)(x + a^1) = x^2 + a^25 x + a^1
        let res = alpha(&[(0, 1), (0, 0)]).mul(&alpha(&[(0, 1), (1, 0)]));
        assert_eq!(res, alpha(&[(0, 2), (25, 1), (1, 0)]));
    }

    #[test]
    fn test_mul_generator_degree_3() {
        let res = alpha(&[(0, 2), (25, 1), (1, 0)]).mul(&alpha(&[(0, 1), (2, 0)]));
        assert_eq!(res, alpha(&[(0, 3), (198, 2), (199, 1), (3, 0)]));
    }

    #[test]
    fn test_scale() {
        let res = alpha(&[(0, 5), (254, 4), (3, 3)]).scale(Alpha(2), 3);
        assert_eq!(res, alpha(&[(2, 2), (1, 1), (5, 0)]));
    }

    #[test]
    fn test_xor_merges_by_exponent() {
        let a = int(&[(0b1010, 4), (7, 2), (1, 0)]);
        let b = int(&[(0b0110, 4), (3, 3), (1, 0)]);
        assert_eq!(a.xor(&b), int(&[(0b1100, 4), (3, 3), (7, 2), (0, 0)]));
    }

    #[test]
    fn test_to_int() {
        let poly = alpha(&[(0, 3), (1, 2), (8, 1), (255 - 1, 0)]);
        assert_eq!(poly.to_int(), int(&[(1, 3), (2, 2), (0x1d, 1), (0x8e, 0)]));
    }
}
