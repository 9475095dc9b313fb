use ark_ec::Group;
use ark_ff::field_hashers::{DefaultFieldHasher, HashToField};
use ark_ff::Field;

use digest::Digest;

#[cfg(not(feature = "std"))]
pub use alloc::{
    borrow::ToOwned,
    string::String,
    vec::Vec,
};

#[cfg(feature = "std")]
pub use std::{
    borrow::ToOwned,
    string::String,
    vec::Vec,
};

use crate::ciphersuite::CipherSuite;
use crate::{Error, SchnorrResult};

/// A type alias for the scalar field of a [`CipherSuite`]'s group.
pub type Scalar<C> = <<C as CipherSuite>::G as Group>::ScalarField;

/// The point at which the secret polynomial is evaluated for the party at
/// position `index` of a signer set. Position 0 maps to `x = 1`, as `x = 0`
/// is the shared secret itself.
pub(crate) fn evaluation_point<C: CipherSuite>(index: u32) -> Scalar<C> {
    Scalar::<C>::from(u64::from(index) + 1)
}

/// Interpolate a polynomial at zero with the Lagrange method.
///
/// Returns \\( \lambda\_i = \prod\_{j \neq i} x\_j / (x\_j - x\_i) \\) where the
/// \\( x \\) values are the evaluation points of the given party positions.
pub(crate) fn calculate_lagrange_coefficients<C: CipherSuite>(
    my_index: u32,
    all_indices: &[u32],
) -> SchnorrResult<Scalar<C>> {
    let mut numerator = Scalar::<C>::ONE;
    let mut denominator = Scalar::<C>::ONE;

    let my_index_field = evaluation_point::<C>(my_index);

    for &j in all_indices.iter() {
        if j == my_index {
            continue;
        }
        let s = evaluation_point::<C>(j);

        numerator *= s;
        denominator *= s - my_index_field;
    }

    // A zero denominator means the same position was listed twice.
    let inverse = denominator.inverse().ok_or(Error::DuplicateIndex(my_index))?;

    Ok(numerator * inverse)
}

/// Reject index lists containing the same party twice.
pub(crate) fn check_distinct(indices: &[u32]) -> SchnorrResult<()> {
    for (k, index) in indices.iter().enumerate() {
        if indices[..k].contains(index) {
            return Err(Error::DuplicateIndex(*index));
        }
    }

    Ok(())
}

pub(crate) fn hash_to_field<C: CipherSuite>(
    context_string: &[u8],
    message_to_hash: &[u8],
) -> Scalar<C> {
    let h = <DefaultFieldHasher<C::InnerHasher, 128> as HashToField<Scalar<C>>>::new(
        context_string,
    );

    h.hash_to_field(message_to_hash, 1)[0]
}

pub(crate) fn hash_to_array<C: CipherSuite>(
    context_string: &[u8],
    message_to_hash: &[u8],
) -> C::HashOutput {
    let mut h = <C::InnerHasher as Digest>::new();
    Digest::update(&mut h, context_string);
    Digest::update(&mut h, message_to_hash);

    let digest = Digest::finalize(h);
    let mut output = C::HashOutput::default();
    let len = core::cmp::min(output.as_ref().len(), digest.len());
    output.as_mut()[..len].copy_from_slice(&digest[..len]);

    output
}
