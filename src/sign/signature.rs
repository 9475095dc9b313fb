//! Schnorr signatures and the challenge they are computed over.

use ark_ec::Group;

use crate::ciphersuite::CipherSuite;
use crate::encoding::{decode_point, decode_scalar, encode_point, encode_scalar, scalar_length};
use crate::error::DecodeFailure;
use crate::utils::{Scalar, Vec};
use crate::{Error, SchnorrResult};

/// The signing equation a [`Signature`] was produced with.
///
/// All three schemes check \\( s \cdot G = R + c \cdot P \\), but each derives its
/// challenge \\( c \\) in its own hash domain, so that a signature produced under
/// one scheme never verifies under another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// A single party signing with its own key pair.
    Single,
    /// n-of-n parties signing under their aggregated key \\( \sum a\_i X\_i \\).
    Aggregate,
    /// t-of-n parties signing under their shared group key \\( Y \\).
    Threshold,
}

impl SignatureScheme {
    /// The label appended to the context string of the challenge oracle.
    pub fn challenge_label(&self) -> &'static str {
        match self {
            SignatureScheme::Single => "challenge-single",
            SignatureScheme::Aggregate => "challenge-aggregate",
            SignatureScheme::Threshold => "challenge-threshold",
        }
    }
}

/// Compute the Fiat-Shamir challenge \\( c = H(R \Vert P \Vert m) \\) of a scheme.
pub(crate) fn compute_challenge<C: CipherSuite>(
    scheme: SignatureScheme,
    nonce: &C::G,
    public_key: &C::G,
    message: &[u8],
) -> SchnorrResult<Scalar<C>> {
    let mut input = encode_point::<C>(nonce)?;
    input.extend_from_slice(&encode_point::<C>(public_key)?);
    input.extend_from_slice(message);

    Ok(C::h_challenge(scheme, &input))
}

/// A complete Schnorr signature \\( (R, s) \\).
///
/// For threshold signatures, \\( R \\) is the group nonce \\( V \\) and
/// \\( s \\) the reconstructed \\( \sigma \\).
#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature<C: CipherSuite> {
    /// The nonce commitment.
    pub R: C::G,
    /// The response scalar.
    pub s: Scalar<C>,
}

impl<C: CipherSuite> Signature<C> {
    /// Serialize this [`Signature`] as \\( enc(R) \Vert enc(s) \\).
    pub fn to_bytes(&self) -> SchnorrResult<Vec<u8>> {
        let mut bytes = encode_point::<C>(&self.R)?;
        bytes.extend_from_slice(&encode_scalar::<C>(&self.s)?);

        Ok(bytes)
    }

    /// Attempt to deserialize a [`Signature`] from its \\( enc(R) \Vert enc(s) \\) form.
    pub fn from_bytes(bytes: &[u8]) -> SchnorrResult<Self> {
        let scalar_length = scalar_length::<C>();
        if bytes.len() <= scalar_length {
            return Err(DecodeFailure::InvalidLength {
                expected: scalar_length + 1,
                actual: bytes.len(),
            }
            .into());
        }

        let (point_bytes, scalar_bytes) = bytes.split_at(bytes.len() - scalar_length);

        Ok(Signature {
            R: decode_point::<C>(point_bytes)?,
            s: decode_scalar::<C>(scalar_bytes)?,
        })
    }

    /// Verify this [`Signature`] on `message` under `public_key`, i.e. check that
    /// \\( s \cdot G = R + c \cdot P \\) with \\( c = H(R \Vert P \Vert m) \\)
    /// computed in the hash domain of `scheme`.
    pub fn verify(
        &self,
        scheme: SignatureScheme,
        public_key: &C::G,
        message: &[u8],
    ) -> SchnorrResult<()> {
        let challenge = compute_challenge::<C>(scheme, &self.R, public_key, message)?;

        if C::G::generator() * self.s == self.R + *public_key * challenge {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}
