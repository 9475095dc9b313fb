//! t-of-n threshold signatures from Feldman VSS shares.
//!
//! Each of the `m >= t` signing parties holds a [`LocalShare`] \\( s\_i \\) of
//! the long-term group secret and a [`LocalShare`] \\( r\_i \\) of a group nonce
//! shared for this session only. Their local signatures
//! \\( \gamma\_i = r\_i + e \cdot s\_i \\) lie on a polynomial of degree `t - 1`
//! whose value at zero is the signature scalar \\( \sigma \\).

use ark_ec::Group;
use ark_ff::Zero;
use tracing::{debug, warn};

use crate::ciphersuite::CipherSuite;
use crate::parameters::ThresholdParameters;
use crate::utils::{calculate_lagrange_coefficients, check_distinct, Scalar, Vec};
use crate::vss::{
    summarize_public_points, verification_share, LocalShare, VerifiableSecretSharingCommitment,
};
use crate::{Error, SchnorrResult};

use super::signature::{compute_challenge, Signature, SignatureScheme};

/// The contribution \\( \gamma\_i \\) of the party at position `index` to a
/// threshold signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalSignature<C: CipherSuite> {
    /// The position of the signing party.
    pub index: u32,
    /// The local signature scalar.
    pub gamma: Scalar<C>,
}

/// Compute the local signature of one party on `message`.
///
/// Returns the challenge \\( e = H(V \Vert Y \Vert m) \\) along with
/// \\( \gamma\_i = r\_i + e \cdot s\_i \\). Honest parties all derive the same
/// challenge, which callers may compare as a sanity check.
///
/// The ephemeral share is consumed, and erased before returning.
#[allow(non_snake_case)]
pub fn get_local_signature<C: CipherSuite>(
    my_share: &LocalShare<C>,
    my_eph_share: LocalShare<C>,
    Y: &C::G,
    V: &C::G,
    message: &[u8],
) -> SchnorrResult<(Scalar<C>, LocalSignature<C>)> {
    if my_share.index != my_eph_share.index {
        return Err(Error::SetMembershipError);
    }

    let e = compute_challenge::<C>(SignatureScheme::Threshold, V, Y, message)?;

    let gamma = my_eph_share.share + e * my_share.share;

    Ok((
        e,
        LocalSignature {
            index: my_share.index,
            gamma,
        },
    ))
}

/// Reconstruct a threshold signature from the local signatures of `m >= t` parties.
///
/// `parameters` are those of the long-term sharing, `vss_commitments` the `n`
/// commitments of its dealers and `eph_vss_commitments` the `m` commitments of
/// this session's nonce dealers. Every local signature is checked against the
/// public verification shares \\( Y\_i \\) and \\( V\_i \\) before being
/// interpolated, so that a faulty signer is named instead of silently
/// producing an invalid signature.
///
/// The returned [`Signature`] is \\( (V, \sigma) \\), which verifies under the
/// group key \\( Y \\) with [`SignatureScheme::Threshold`].
///
/// # Errors
///
/// * [`Error::InsufficientPartiesError`] if fewer than `t` local signatures are given,
/// * [`Error::DuplicateIndex`] or [`Error::SetMembershipError`] if their indices are
///   repeated or do not designate one of the `n` parties,
/// * [`Error::InconsistentSetError`] or [`Error::InvalidCommitmentLength`] if the
///   commitments do not match the parameters,
/// * [`Error::MisbehavingParticipants`] naming every invalid local signature.
pub fn summarize_local_signature<C: CipherSuite>(
    parameters: &ThresholdParameters<C>,
    e: &Scalar<C>,
    local_signatures: &[LocalSignature<C>],
    vss_commitments: &[VerifiableSecretSharingCommitment<C>],
    eph_vss_commitments: &[VerifiableSecretSharingCommitment<C>],
) -> SchnorrResult<Signature<C>> {
    let m = local_signatures.len();
    if m < parameters.t as usize {
        return Err(Error::InsufficientPartiesError {
            threshold: parameters.t,
            actual: m,
        });
    }

    let indices: Vec<u32> = local_signatures.iter().map(|sig| sig.index).collect();
    check_distinct(&indices)?;
    if indices.iter().any(|&index| index >= parameters.n) {
        return Err(Error::SetMembershipError);
    }

    if vss_commitments.len() != parameters.n as usize {
        return Err(Error::InconsistentSetError {
            expected: parameters.n as usize,
            actual: vss_commitments.len(),
        });
    }
    if eph_vss_commitments.len() != m {
        return Err(Error::InconsistentSetError {
            expected: m,
            actual: eph_vss_commitments.len(),
        });
    }

    let mut public_keys = Vec::with_capacity(vss_commitments.len());
    for commitment in vss_commitments.iter() {
        commitment.check_degree(parameters)?;
        public_keys.extend(commitment.public_key());
    }
    let mut public_nonces = Vec::with_capacity(eph_vss_commitments.len());
    for commitment in eph_vss_commitments.iter() {
        commitment.check_degree(parameters)?;
        public_nonces.extend(commitment.public_key());
    }

    // Reject an identity group key.
    summarize_public_points::<C>(&public_keys)?;
    let group_nonce = summarize_public_points::<C>(&public_nonces)?;

    let mut misbehaving_participants = Vec::new();
    for local_signature in local_signatures.iter() {
        let key_share = verification_share(local_signature.index, vss_commitments);
        let nonce_share = verification_share(local_signature.index, eph_vss_commitments);

        if C::G::generator() * local_signature.gamma != nonce_share + key_share * e {
            warn!(index = local_signature.index, "invalid local signature");
            misbehaving_participants.push(local_signature.index);
        }
    }

    if !misbehaving_participants.is_empty() {
        return Err(Error::MisbehavingParticipants(misbehaving_participants));
    }

    let mut sigma = Scalar::<C>::zero();
    for local_signature in local_signatures.iter() {
        let lambda = calculate_lagrange_coefficients::<C>(local_signature.index, &indices)?;
        sigma += lambda * local_signature.gamma;
    }

    debug!(signers = m, threshold = parameters.t, "reconstructed threshold signature");

    Ok(Signature {
        R: group_nonce,
        s: sigma,
    })
}
