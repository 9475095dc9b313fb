//! Feldman VSS key generation for t-of-n signer groups.
//!
//! Every party of the group deals a random secret with its own polynomial and
//! sends one [`SecretShare`] to each other party. Summing the verified shares
//! it received yields the party's [`LocalShare`] of the joint secret, whose
//! public key is the sum of every dealer's public key. The joint secret itself
//! is never assembled anywhere.
//!
//! The same procedure is run twice: once for the long-term group key \\( Y \\),
//! among the `n` parties with parameters `(n, t)`, and once per signing session
//! for the group nonce \\( V \\), among the `m` signing parties with parameters
//! `(m, t)` and their long-term positions as restricted indices.

use core::fmt::Debug;

use ark_ec::Group;
use ark_ff::Zero;

use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::ciphersuite::CipherSuite;
use crate::keys::{point_commitment, random_nonzero_scalar, KeyPair};
use crate::parameters::ThresholdParameters;
use crate::utils::{check_distinct, evaluation_point, Scalar, Vec};
use crate::{Error, SchnorrResult};

use super::secret_share::{Coefficients, SecretShare, VerifiableSecretSharingCommitment};

/// One party's dealing of a t-of-n verifiable secret sharing.
pub struct ThresholdKey<C: CipherSuite> {
    parameters: ThresholdParameters<C>,
    keypair: KeyPair<C>,
    coefficients: Coefficients<C>,
    commitment: VerifiableSecretSharingCommitment<C>,
    indices: Vec<u32>,
}

impl<C: CipherSuite> Debug for ThresholdKey<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThresholdKey")
            .field("parameters", &self.parameters)
            .field("public_key", self.keypair.public_key())
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> ThresholdKey<C> {
    /// Deal a fresh random secret with a random polynomial of degree `t - 1`.
    ///
    /// Shares are computed for the parties at positions `0..n`, or at the
    /// positions listed in `restricted_indices`, which must then hold exactly
    /// `n` distinct entries.
    pub fn generate(
        parameters: &ThresholdParameters<C>,
        restricted_indices: Option<&[u32]>,
        mut rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<Self> {
        let keypair = KeyPair::from_secret_scalar(random_nonzero_scalar::<C>(&mut rng));

        Self::deal(parameters, keypair, restricted_indices, rng)
    }

    /// Deal an externally supplied big-endian secret, shared among the parties
    /// at positions `0..n`.
    pub fn from_secret_key(
        parameters: &ThresholdParameters<C>,
        secret_bytes: &[u8],
        rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<Self> {
        let keypair = KeyPair::from_secret(secret_bytes)?;

        Self::deal(parameters, keypair, None, rng)
    }

    fn deal(
        parameters: &ThresholdParameters<C>,
        keypair: KeyPair<C>,
        restricted_indices: Option<&[u32]>,
        rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<Self> {
        let indices: Vec<u32> = match restricted_indices {
            Some(indices) => {
                if indices.len() != parameters.n as usize {
                    return Err(Error::InconsistentSetError {
                        expected: parameters.n as usize,
                        actual: indices.len(),
                    });
                }
                check_distinct(indices)?;
                indices.to_vec()
            }
            None => (0..parameters.n).collect(),
        };

        let coefficients = Coefficients::random(keypair.secret, parameters, rng);
        let commitment = coefficients.commit();

        debug!(n = parameters.n, t = parameters.t, "dealt a verifiable secret sharing");

        Ok(Self {
            parameters: *parameters,
            keypair,
            coefficients,
            commitment,
            indices,
        })
    }

    /// The public key of the secret dealt by this party, i.e. the constant
    /// term of its commitment.
    pub fn public_key(&self) -> &C::G {
        self.keypair.public_key()
    }

    /// The positions of the parties this secret is shared among.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The parameters of this sharing.
    pub fn parameters(&self) -> &ThresholdParameters<C> {
        &self.parameters
    }

    /// Commit to this dealer's public key before any key is revealed.
    ///
    /// Returns `(commitment, blind_factor)`. Every dealer publishes its commitment
    /// first; public keys and blind factors are revealed only once all commitments
    /// are in, so that no dealer can choose its key after seeing the others.
    pub fn commit(
        &self,
        mut rng: impl RngCore + CryptoRng,
    ) -> SchnorrResult<(C::HashOutput, [u8; 32])> {
        let mut blind_factor = [0u8; 32];
        rng.fill_bytes(&mut blind_factor);

        let commitment = point_commitment::<C>(self.keypair.public_key(), &blind_factor)?;

        Ok((commitment, blind_factor))
    }

    /// Check the public keys revealed by every dealer against the hash commitments
    /// they published beforehand.
    ///
    /// All three slices hold one entry per dealer, in [`ThresholdKey::indices`] order.
    /// This must succeed before any secret share is sent.
    ///
    /// # Errors
    ///
    /// * [`Error::InconsistentSetError`] if the inputs do not have one entry per party,
    /// * [`Error::InvalidKeyCommitment`] naming the first dealer whose revealed key
    ///   does not open its commitment.
    pub fn check_key_commitments(
        &self,
        signer_pubkeys: &[C::G],
        blind_factors: &[[u8; 32]],
        key_commitments: &[C::HashOutput],
    ) -> SchnorrResult<()> {
        let expected = self.indices.len();
        for actual in [
            signer_pubkeys.len(),
            blind_factors.len(),
            key_commitments.len(),
        ] {
            if actual != expected {
                return Err(Error::InconsistentSetError { expected, actual });
            }
        }

        for (((dealer, public_key), blind_factor), commitment) in self
            .indices
            .iter()
            .zip(signer_pubkeys)
            .zip(blind_factors)
            .zip(key_commitments)
        {
            let opened = point_commitment::<C>(public_key, blind_factor)?;
            if opened.as_ref() != commitment.as_ref() {
                warn!(dealer = *dealer, "public key does not open its commitment");
                return Err(Error::InvalidKeyCommitment(*dealer));
            }
        }

        Ok(())
    }

    /// Return the Feldman commitment to publish to every party, and the secret
    /// shares to send privately, one per party in [`ThresholdKey::indices`] order.
    pub fn get_variable_secret_sharing(
        &self,
    ) -> (VerifiableSecretSharingCommitment<C>, Vec<SecretShare<C>>) {
        let shares = self
            .indices
            .iter()
            .map(|&index| SecretShare::evaluate_polynomial(index, &self.coefficients))
            .collect();

        (self.commitment.clone(), shares)
    }

    /// Verify the shares dealt to this party and combine them into its [`LocalShare`].
    ///
    /// `signer_pubkeys`, `all_vss_commitments` and `my_shares` hold one entry per
    /// dealer, in [`ThresholdKey::indices`] order: the public key each dealer
    /// announced, its commitment, and the share it sent to this party.
    ///
    /// # Errors
    ///
    /// * [`Error::InconsistentSetError`] if the inputs do not have one entry per party,
    /// * [`Error::SetMembershipError`] if this party's key is not in `signer_pubkeys`,
    /// * [`Error::InvalidCommitmentLength`] or [`Error::InvalidCommitment`] if a
    ///   commitment has the wrong degree or does not commit to its dealer's key,
    /// * [`Error::ShareVerificationError`] naming every dealer whose share fails
    ///   the Feldman check.
    pub fn keygen_t_n_parties(
        &self,
        signer_pubkeys: &[C::G],
        all_vss_commitments: &[VerifiableSecretSharingCommitment<C>],
        my_shares: &[SecretShare<C>],
    ) -> SchnorrResult<LocalShare<C>> {
        let expected = self.indices.len();
        for actual in [
            signer_pubkeys.len(),
            all_vss_commitments.len(),
            my_shares.len(),
        ] {
            if actual != expected {
                return Err(Error::InconsistentSetError { expected, actual });
            }
        }

        let position = signer_pubkeys
            .iter()
            .position(|public_key| public_key == self.keypair.public_key())
            .ok_or(Error::SetMembershipError)?;
        let my_index = self.indices[position];

        for ((dealer, commitment), public_key) in self
            .indices
            .iter()
            .zip(all_vss_commitments)
            .zip(signer_pubkeys)
        {
            commitment.check_degree(&self.parameters)?;
            if commitment.public_key() != Some(public_key) {
                return Err(Error::InvalidCommitment(*dealer));
            }
        }

        let mut accused = Vec::new();
        for ((dealer, commitment), share) in self
            .indices
            .iter()
            .zip(all_vss_commitments)
            .zip(my_shares)
        {
            if share.receiver_index != my_index || !share.verify(commitment) {
                warn!(
                    accuser = my_index,
                    accused = *dealer,
                    "secret share does not match its commitment"
                );
                accused.push(*dealer);
            }
        }

        if !accused.is_empty() {
            return Err(Error::ShareVerificationError {
                accuser: my_index,
                accused,
            });
        }

        let mut share = Scalar::<C>::zero();
        for received in my_shares.iter() {
            share += received.polynomial_evaluation;
        }

        debug!(index = my_index, dealers = expected, "combined secret shares");

        Ok(LocalShare {
            index: my_index,
            share,
        })
    }
}

/// A party's share \\( s\_i \\) of a jointly generated secret.
///
/// The share is overwritten with zeroes when it falls out of scope.
pub struct LocalShare<C: CipherSuite> {
    pub(crate) index: u32,
    pub(crate) share: Scalar<C>,
}

impl<C: CipherSuite> Debug for LocalShare<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocalShare")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<C: CipherSuite> Drop for LocalShare<C> {
    fn drop(&mut self) {
        self.share.zeroize();
    }
}

impl<C: CipherSuite> LocalShare<C> {
    /// The position of the party holding this share.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The public verification share \\( s\_i \cdot G \\).
    pub fn public_share(&self) -> C::G {
        C::G::generator() * self.share
    }
}

/// Sum public points, such as the public keys of every dealer, into the group key
/// \\( Y \\) (or the group nonce \\( V \\)).
///
/// Fails with [`Error::InvalidGroupKey`] if the sum is the identity.
pub fn summarize_public_points<C: CipherSuite>(points: &[C::G]) -> SchnorrResult<C::G> {
    let mut sum = C::G::zero();
    for point in points.iter() {
        sum += point;
    }

    if sum.is_zero() {
        return Err(Error::InvalidGroupKey);
    }

    Ok(sum)
}

/// Compute the public verification share \\( Y\_i = \sum\_j f\_j(x\_i) \cdot G \\)
/// of the party at position `index`, from the commitments of every dealer.
pub fn verification_share<C: CipherSuite>(
    index: u32,
    commitments: &[VerifiableSecretSharingCommitment<C>],
) -> C::G {
    let term = evaluation_point::<C>(index);

    let mut share = C::G::zero();
    for commitment in commitments.iter() {
        share += commitment.evaluate_hiding(&term);
    }

    share
}
