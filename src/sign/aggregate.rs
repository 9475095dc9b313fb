//! n-of-n aggregate signatures with binding coefficients.
//!
//! Every signer binds its public key \\( X\_i \\) to the whole signer set
//! with a coefficient \\( a\_i = H(L \Vert X\_i) \\), where \\( L \\) is the
//! concatenation of the encoded public keys of all signers in their declared
//! order. The aggregated key is then \\( \tilde{X} = \sum a\_i X\_i \\), which
//! prevents a rogue signer from choosing its key to cancel the others out.

use core::fmt::Debug;

use ark_ff::Zero;
use tracing::debug;

use crate::ciphersuite::CipherSuite;
use crate::encoding::encode_point;
use crate::error::DecodeFailure;
use crate::keys::{EphemeralKey, KeyPair};
use crate::utils::{Scalar, Vec};
use crate::{Error, SchnorrResult};

use super::signature::{compute_challenge, Signature, SignatureScheme};

/// The canonical description \\( L \\) of an ordered signer set.
fn signer_set_description<C: CipherSuite>(signer_pubkeys: &[C::G]) -> SchnorrResult<Vec<u8>> {
    let mut description = Vec::new();
    for public_key in signer_pubkeys.iter() {
        description.extend_from_slice(&encode_point::<C>(public_key)?);
    }

    Ok(description)
}

fn binding_coefficient<C: CipherSuite>(
    description: &[u8],
    public_key: &C::G,
) -> SchnorrResult<Scalar<C>> {
    let mut input = description.to_vec();
    input.extend_from_slice(&encode_point::<C>(public_key)?);

    Ok(C::h_coefficient(&input))
}

/// Compute the aggregated public key \\( \sum a\_i X\_i \\) of an ordered signer set.
///
/// This only involves public data, so verifiers can derive the key on their own.
pub fn aggregate_public_keys<C: CipherSuite>(signer_pubkeys: &[C::G]) -> SchnorrResult<C::G> {
    let description = signer_set_description::<C>(signer_pubkeys)?;

    let mut apk = C::G::zero();
    for public_key in signer_pubkeys.iter() {
        apk += *public_key * binding_coefficient::<C>(&description, public_key)?;
    }

    if apk.is_zero() {
        return Err(Error::InvalidGroupKey);
    }

    Ok(apk)
}

/// Compute the aggregated nonce \\( \sum R\_i \\) of a signing session.
pub fn aggregate_nonces<C: CipherSuite>(ephemeral_pubkeys: &[C::G]) -> SchnorrResult<C::G> {
    let mut nonce = C::G::zero();
    for public_nonce in ephemeral_pubkeys.iter() {
        if public_nonce.is_zero() {
            return Err(DecodeFailure::Identity.into());
        }
        nonce += public_nonce;
    }

    if nonce.is_zero() {
        return Err(Error::InvalidGroupKey);
    }

    Ok(nonce)
}

/// The state of one party in an n-of-n signing session.
///
/// Every party builds its own [`Aggregator`] from the same public signer and
/// ephemeral sets, so that all of them agree on the aggregated key and nonce.
#[allow(non_snake_case)]
pub struct Aggregator<C: CipherSuite> {
    keypair: KeyPair<C>,
    ephemeral: Option<EphemeralKey<C>>,
    coefficient: Scalar<C>,
    apk: C::G,
    R: C::G,
}

impl<C: CipherSuite> Debug for Aggregator<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aggregator")
            .field("public_key", self.keypair.public_key())
            .field("apk", &self.apk)
            .field("R", &self.R)
            .field("consumed", &self.ephemeral.is_none())
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> Aggregator<C> {
    /// Set up a signing session for `my_keypair` among `signer_pubkeys`, with
    /// the nonces `ephemeral_pubkeys` announced by every party.
    ///
    /// Both sets must have one entry per signer, in the order agreed upon by all
    /// parties, and must contain the local key and nonce.
    ///
    /// # Errors
    ///
    /// * [`Error::InconsistentSetError`] if the two sets differ in length,
    /// * [`Error::SetMembershipError`] if the local key or nonce is absent,
    /// * [`Error::InvalidGroupKey`] if the aggregated key or nonce is the identity.
    pub fn generate(
        signer_pubkeys: &[C::G],
        ephemeral_pubkeys: &[C::G],
        my_keypair: &KeyPair<C>,
        my_ephemeral: EphemeralKey<C>,
    ) -> SchnorrResult<Self> {
        if signer_pubkeys.len() != ephemeral_pubkeys.len() {
            return Err(Error::InconsistentSetError {
                expected: signer_pubkeys.len(),
                actual: ephemeral_pubkeys.len(),
            });
        }

        if !signer_pubkeys.contains(my_keypair.public_key())
            || !ephemeral_pubkeys.contains(my_ephemeral.public_key())
        {
            return Err(Error::SetMembershipError);
        }

        let description = signer_set_description::<C>(signer_pubkeys)?;
        let coefficient = binding_coefficient::<C>(&description, my_keypair.public_key())?;

        let apk = aggregate_public_keys::<C>(signer_pubkeys)?;
        let nonce = aggregate_nonces::<C>(ephemeral_pubkeys)?;

        debug!(signers = signer_pubkeys.len(), "aggregate signing session ready");

        Ok(Self {
            keypair: my_keypair.clone(),
            ephemeral: Some(my_ephemeral),
            coefficient,
            apk,
            R: nonce,
        })
    }

    /// Compute this party's partial signature \\( s\_i = r\_i + c \cdot a\_i \cdot x\_i \\)
    /// with \\( c = H(R \Vert \tilde{X} \Vert m) \\).
    ///
    /// The ephemeral key is consumed; any later call fails with
    /// [`Error::EphemeralKeyConsumed`].
    pub fn get_partial_sign(&mut self, message: &[u8]) -> SchnorrResult<Scalar<C>> {
        if self.ephemeral.is_none() {
            return Err(Error::EphemeralKeyConsumed);
        }

        let challenge = compute_challenge::<C>(SignatureScheme::Aggregate, &self.R, &self.apk, message)?;

        let ephemeral = self.ephemeral.take().ok_or(Error::EphemeralKeyConsumed)?;

        Ok(ephemeral.secret + challenge * self.coefficient * self.keypair.secret)
    }

    /// Merge two (partial sums of) partial signatures.
    pub fn add_signature_parts(&self, s_a: &Scalar<C>, s_b: &Scalar<C>) -> (C::G, Scalar<C>) {
        (self.R, *s_a + s_b)
    }

    /// Merge the partial signatures of every signer into a [`Signature`] verifiable
    /// under [`Aggregator::apk`].
    pub fn aggregate_partial_signatures(&self, partial_signatures: &[Scalar<C>]) -> Signature<C> {
        let s = partial_signatures
            .iter()
            .fold(Scalar::<C>::zero(), |sum, part| self.add_signature_parts(&sum, part).1);

        Signature { R: self.R, s }
    }

    /// The aggregated nonce \\( R = \sum R\_i \\).
    #[allow(non_snake_case)]
    pub fn R(&self) -> &C::G {
        &self.R
    }

    /// The aggregated public key \\( \tilde{X} = \sum a\_i X\_i \\).
    pub fn apk(&self) -> &C::G {
        &self.apk
    }
}
