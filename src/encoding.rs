//! Fixed-length big-endian byte encodings of scalars and points.
//!
//! Scalars are encoded as big-endian integers of the byte length of the
//! scalar field, and must be reduced modulo the group order.
//!
//! Points are encoded by the [`CipherSuite`]; for short Weierstrass curves
//! this module provides the SEC1 codec:
//!
//! * compressed: `0x02 | 0x03 || X`, the prefix carrying the parity of `Y`,
//! * uncompressed: `0x04 || X || Y`,
//!
//! with every coordinate big-endian. Only the compressed form is produced.
//!
//! A public key may additionally carry a [`KeyKind`] tag, which shifts the
//! leading SEC1 byte by `+3` for aggregate keys and `+6` for threshold group keys.

use ark_ec::short_weierstrass::{Affine, SWCurveConfig};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::ciphersuite::CipherSuite;
use crate::error::DecodeFailure;
use crate::utils::{Scalar, Vec};
use crate::{Error, SchnorrResult};

const SEC1_EVEN: u8 = 0x02;
const SEC1_ODD: u8 = 0x03;
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Encode a field element as a fixed-length big-endian byte string.
fn field_to_be_bytes<F: PrimeField>(element: &F) -> SchnorrResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(element.compressed_size());
    element
        .serialize_compressed(&mut bytes)
        .map_err(|_| Error::SerializationError)?;
    // Canonical field serialization is little-endian.
    bytes.reverse();

    Ok(bytes)
}

/// Decode a field element from a fixed-length big-endian byte string,
/// rejecting values that are not reduced modulo the field order.
fn field_from_be_bytes<F: PrimeField>(bytes: &[u8]) -> SchnorrResult<F> {
    let expected = F::ZERO.compressed_size();
    if bytes.len() != expected {
        return Err(DecodeFailure::InvalidLength {
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let mut little_endian = bytes.to_vec();
    little_endian.reverse();

    F::deserialize_compressed(&little_endian[..]).map_err(|_| DecodeFailure::OutOfRange.into())
}

/// The length in bytes of an encoded scalar of this [`CipherSuite`].
pub fn scalar_length<C: CipherSuite>() -> usize {
    Scalar::<C>::ZERO.compressed_size()
}

/// Encode a scalar as a fixed-length big-endian byte string.
pub fn encode_scalar<C: CipherSuite>(scalar: &Scalar<C>) -> SchnorrResult<Vec<u8>> {
    field_to_be_bytes(scalar)
}

/// Decode a scalar from a fixed-length big-endian byte string.
///
/// Fails with [`DecodeFailure::OutOfRange`] if the integer is not smaller than the group order.
pub fn decode_scalar<C: CipherSuite>(bytes: &[u8]) -> SchnorrResult<Scalar<C>> {
    field_from_be_bytes(bytes)
}

/// Encode a point with the [`CipherSuite`]'s point codec.
pub fn encode_point<C: CipherSuite>(point: &C::G) -> SchnorrResult<Vec<u8>> {
    C::point_to_bytes(point)
}

/// Decode a point with the [`CipherSuite`]'s point codec.
pub fn decode_point<C: CipherSuite>(bytes: &[u8]) -> SchnorrResult<C::G> {
    C::point_from_bytes(bytes)
}

/// Encode a point of a short Weierstrass curve in SEC1 compressed form.
pub fn sec1_encode<P: SWCurveConfig>(point: &Affine<P>) -> SchnorrResult<Vec<u8>>
where
    P::BaseField: PrimeField,
{
    if point.infinity {
        return Err(DecodeFailure::Identity.into());
    }

    let prefix = if point.y.into_bigint().is_odd() {
        SEC1_ODD
    } else {
        SEC1_EVEN
    };

    let x = field_to_be_bytes(&point.x)?;
    let mut bytes = Vec::with_capacity(1 + x.len());
    bytes.push(prefix);
    bytes.extend_from_slice(&x);

    Ok(bytes)
}

/// Decode a point of a short Weierstrass curve from its SEC1 compressed or
/// uncompressed form.
///
/// Points outside the prime-order subgroup and the identity are rejected.
pub fn sec1_decode<P: SWCurveConfig>(bytes: &[u8]) -> SchnorrResult<Affine<P>>
where
    P::BaseField: PrimeField,
{
    let coordinate_length = P::BaseField::ZERO.compressed_size();

    let (prefix, body) = bytes
        .split_first()
        .ok_or(DecodeFailure::InvalidLength {
            expected: 1 + coordinate_length,
            actual: 0,
        })?;

    let point = match *prefix {
        SEC1_EVEN | SEC1_ODD => {
            if body.len() != coordinate_length {
                return Err(DecodeFailure::InvalidLength {
                    expected: 1 + coordinate_length,
                    actual: bytes.len(),
                }
                .into());
            }
            let x: P::BaseField = field_from_be_bytes(body)?;

            let rhs = x.square() * x + P::COEFF_A * x + P::COEFF_B;
            let y = rhs.sqrt().ok_or(DecodeFailure::NotOnCurve)?;
            let y = if y.into_bigint().is_odd() == (*prefix == SEC1_ODD) {
                y
            } else {
                -y
            };

            Affine::<P>::new_unchecked(x, y)
        }
        SEC1_UNCOMPRESSED => {
            if body.len() != 2 * coordinate_length {
                return Err(DecodeFailure::InvalidLength {
                    expected: 1 + 2 * coordinate_length,
                    actual: bytes.len(),
                }
                .into());
            }
            let x: P::BaseField = field_from_be_bytes(&body[..coordinate_length])?;
            let y: P::BaseField = field_from_be_bytes(&body[coordinate_length..])?;

            let point = Affine::<P>::new_unchecked(x, y);
            if !point.is_on_curve() {
                return Err(DecodeFailure::NotOnCurve.into());
            }
            point
        }
        other => return Err(DecodeFailure::InvalidPrefix(other).into()),
    };

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(DecodeFailure::NotOnCurve.into());
    }

    Ok(point)
}

/// The kind of public key a tagged point encoding announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// A single party's public key.
    Single,
    /// The aggregated key \\( \sum a\_i X\_i \\) of an n-of-n signer set.
    Aggregate,
    /// The group key \\( Y \\) of a t-of-n threshold signer set.
    Threshold,
}

impl KeyKind {
    fn prefix_offset(&self) -> u8 {
        match self {
            KeyKind::Single => 0,
            KeyKind::Aggregate => 3,
            KeyKind::Threshold => 6,
        }
    }
}

/// Encode a point and tag its leading SEC1 byte with a [`KeyKind`].
pub fn encode_tagged_point<C: CipherSuite>(point: &C::G, kind: KeyKind) -> SchnorrResult<Vec<u8>> {
    let mut bytes = C::point_to_bytes(point)?;

    match bytes.first_mut() {
        Some(prefix) if (SEC1_EVEN..=SEC1_UNCOMPRESSED).contains(&*prefix) => {
            *prefix += kind.prefix_offset();
            Ok(bytes)
        }
        Some(prefix) => Err(DecodeFailure::InvalidPrefix(*prefix).into()),
        None => Err(Error::SerializationError),
    }
}

/// Decode a possibly tagged point, returning the announced [`KeyKind`] along with it.
///
/// Untagged SEC1 encodings are reported as [`KeyKind::Single`].
pub fn decode_tagged_point<C: CipherSuite>(bytes: &[u8]) -> SchnorrResult<(KeyKind, C::G)> {
    let prefix = *bytes.first().ok_or(DecodeFailure::InvalidLength {
        expected: 1,
        actual: 0,
    })?;

    let kind = match prefix {
        0x02..=0x04 => KeyKind::Single,
        0x05..=0x07 => KeyKind::Aggregate,
        0x08..=0x0a => KeyKind::Threshold,
        other => return Err(DecodeFailure::InvalidPrefix(other).into()),
    };

    let mut untagged = bytes.to_vec();
    untagged[0] = prefix - kind.prefix_offset();

    Ok((kind, C::point_from_bytes(&untagged)?))
}
