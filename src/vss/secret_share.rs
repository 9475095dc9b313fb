//! The secret sharing module for defining individual secret shares
//! and their public Feldman commitments.

use core::fmt::Debug;

use ark_ec::Group;
use ark_ff::{UniformRand, Zero};

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::encoding::{decode_scalar, encode_scalar};
use crate::parameters::ThresholdParameters;
use crate::utils::{evaluation_point, Scalar, Vec};
use crate::{Error, SchnorrResult};

/// The secret coefficients \\( a\_0, \ldots, a\_{t-1} \\) of a sharing polynomial,
/// \\( a\_0 \\) being the shared secret.
///
/// They are overwritten with zeroes when they fall out of scope.
#[derive(Clone)]
pub struct Coefficients<C: CipherSuite>(pub(crate) Vec<Scalar<C>>);

impl<C: CipherSuite> Debug for Coefficients<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Coefficients {{ degree: {} }}", self.0.len().saturating_sub(1))
    }
}

impl<C: CipherSuite> Drop for Coefficients<C> {
    fn drop(&mut self) {
        self.0.iter_mut().zeroize();
    }
}

impl<C: CipherSuite> Coefficients<C> {
    /// Draw a random polynomial of degree `t - 1` whose constant term is `secret`.
    pub(crate) fn random(
        secret: Scalar<C>,
        parameters: &ThresholdParameters<C>,
        mut rng: impl RngCore + CryptoRng,
    ) -> Self {
        let mut coefficients = Vec::with_capacity(parameters.t as usize);
        coefficients.push(secret);
        for _ in 1..parameters.t {
            coefficients.push(Scalar::<C>::rand(&mut rng));
        }

        Coefficients(coefficients)
    }

    /// Commit to each coefficient as \\( A\_k = a\_k \cdot G \\).
    pub(crate) fn commit(&self) -> VerifiableSecretSharingCommitment<C> {
        VerifiableSecretSharingCommitment {
            points: self.0.iter().map(|a| C::G::generator() * a).collect(),
        }
    }
}

/// A secret share calculated by evaluating a polynomial with secret
/// coefficients at the evaluation point of its receiver.
///
/// Shares must reach their receiver over a channel providing both secrecy
/// and authenticity.
pub struct SecretShare<C: CipherSuite> {
    /// The party index that this secret share was calculated for.
    pub receiver_index: u32,
    /// The dealer's polynomial evaluated at the receiver's point \\( x = i + 1 \\).
    pub(crate) polynomial_evaluation: Scalar<C>,
}

impl<C: CipherSuite> Clone for SecretShare<C> {
    fn clone(&self) -> Self {
        Self {
            receiver_index: self.receiver_index,
            polynomial_evaluation: self.polynomial_evaluation,
        }
    }
}

impl<C: CipherSuite> Debug for SecretShare<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretShare")
            .field("receiver_index", &self.receiver_index)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> Drop for SecretShare<C> {
    fn drop(&mut self) {
        self.polynomial_evaluation.zeroize();
    }
}

impl<C: CipherSuite> SecretShare<C> {
    /// Rebuild a [`SecretShare`] received as bytes from its dealer.
    pub fn from_bytes(receiver_index: u32, bytes: &[u8]) -> SchnorrResult<Self> {
        Ok(Self {
            receiver_index,
            polynomial_evaluation: decode_scalar::<C>(bytes)?,
        })
    }

    /// Serialize the evaluation carried by this [`SecretShare`].
    pub fn to_bytes(&self) -> SchnorrResult<Vec<u8>> {
        encode_scalar::<C>(&self.polynomial_evaluation)
    }

    /// Evaluate the polynomial, `f(x)` for the secret coefficients at the value of `x` .
    pub(crate) fn evaluate_polynomial(
        receiver_index: u32,
        coefficients: &Coefficients<C>,
    ) -> SecretShare<C> {
        let term = evaluation_point::<C>(receiver_index);
        let mut sum = Scalar::<C>::zero();

        // Evaluate using Horner's method.
        for (k, coefficient) in coefficients.0.iter().rev().enumerate() {
            // The secret is the constant term in the polynomial
            sum += coefficient;

            if k != (coefficients.0.len() - 1) {
                sum *= term;
            }
        }

        SecretShare {
            receiver_index,
            polynomial_evaluation: sum,
        }
    }

    /// Verify that this secret share was correctly computed w.r.t. some secret
    /// polynomial coefficients attested to by some `commitment` .
    pub(crate) fn verify(&self, commitment: &VerifiableSecretSharingCommitment<C>) -> bool {
        let lhs = C::G::generator() * self.polynomial_evaluation;
        let term = evaluation_point::<C>(self.receiver_index);

        lhs == commitment.evaluate_hiding(&term)
    }
}

/// A commitment to a dealer's secret polynomial coefficients for Feldman's
/// verifiable secret sharing scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiableSecretSharingCommitment<C: CipherSuite> {
    /// The commitments to the dealer's secret coefficients.
    pub points: Vec<C::G>,
}

impl<C: CipherSuite> VerifiableSecretSharingCommitment<C> {
    /// Retrieve \\( a\_0 \cdot G \\), the public key of the dealer.
    pub fn public_key(&self) -> Option<&C::G> {
        self.points.first()
    }

    /// Evaluate \\( f(x) \cdot G \\) without knowing the secret coefficients of the polynomial.
    pub fn evaluate_hiding(&self, term: &Scalar<C>) -> C::G {
        let mut sum = C::G::zero();

        // Evaluate using Horner's method.
        for (k, coefficient) in self.points.iter().rev().enumerate() {
            sum += coefficient;

            if k != (self.points.len() - 1) {
                sum *= term;
            }
        }

        sum
    }

    /// Enforces that the number of points of this commitment
    /// matches the threshold parameter `t`.
    pub fn check_degree(&self, parameters: &ThresholdParameters<C>) -> SchnorrResult<()> {
        if self.points.len() != parameters.t as usize {
            return Err(Error::InvalidCommitmentLength {
                expected: parameters.t as usize,
                actual: self.points.len(),
            });
        }

        Ok(())
    }
}
