//! Complex amplitude storage unit.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex32;
use serde::{Deserialize, Serialize};

/// A complex amplitude with single-precision parts.
///
/// Eight bytes per basis state keeps a 10-qubit statevector within 8 KiB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Amplitude {
    /// Real part.
    pub real: f32,
    /// Imaginary part.
    pub imag: f32,
}

impl Amplitude {
    /// The zero amplitude.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// The unit amplitude.
    pub const ONE: Self = Self::new(1.0, 0.0);

    /// Create an amplitude from its parts.
    #[inline]
    pub const fn new(real: f32, imag: f32) -> Self {
        Self { real, imag }
    }

    /// sqrt(re² + im²).
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.norm_sqr().sqrt()
    }

    /// re² + im², the probability weight of this amplitude.
    #[inline]
    pub fn norm_sqr(self) -> f32 {
        self.real * self.real + self.imag * self.imag
    }

    /// Complex conjugate.
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(self.real, -self.imag)
    }
}

impl Add for Amplitude {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl Sub for Amplitude {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul for Amplitude {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl Mul<f32> for Amplitude {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.real * rhs, self.imag * rhs)
    }
}

impl Neg for Amplitude {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.real, -self.imag)
    }
}

impl From<Complex32> for Amplitude {
    fn from(c: Complex32) -> Self {
        Self::new(c.re, c.im)
    }
}

impl From<Amplitude> for Complex32 {
    fn from(a: Amplitude) -> Self {
        Complex32::new(a.real, a.imag)
    }
}

impl fmt::Display for Amplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} + {:.4}i", self.real, self.imag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Amplitude::default(), Amplitude::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Amplitude::new(1.0, 2.0);
        let b = Amplitude::new(3.0, -1.0);

        assert_eq!(a + b, Amplitude::new(4.0, 1.0));
        assert_eq!(a - b, Amplitude::new(-2.0, 3.0));
        // (1 + 2i)(3 - i) = 3 - i + 6i + 2 = 5 + 5i
        assert_eq!(a * b, Amplitude::new(5.0, 5.0));
        assert_eq!(a * 0.5, Amplitude::new(0.5, 1.0));
        assert_eq!(-a, Amplitude::new(-1.0, -2.0));
    }

    #[test]
    fn test_magnitude_and_conjugate() {
        let a = Amplitude::new(3.0, 4.0);
        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.norm_sqr(), 25.0);
        assert_eq!(a.conjugate(), Amplitude::new(3.0, -4.0));
        assert_eq!((a * a.conjugate()).real, 25.0);
    }

    #[test]
    fn test_matches_num_complex() {
        let a = Amplitude::new(0.3, -0.7);
        let b = Amplitude::new(-1.1, 0.25);
        let product: Complex32 = Complex32::from(a) * Complex32::from(b);
        assert_eq!(Amplitude::from(product), a * b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amplitude::new(0.5, 0.25).to_string(), "0.5000 + 0.2500i");
    }
}
