//! Configurable parameters for one verifiable secret sharing instance.

use core::marker::PhantomData;

use crate::ciphersuite::CipherSuite;
use crate::{Error, SchnorrResult};

/// The configuration parameters of a t-of-n sharing.
///
/// The long-term key of a threshold group is shared with `(n, t)`, while the
/// ephemeral key of one signing session is shared among the `m` signers taking
/// part in it, with parameters `(m, t)`.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ThresholdParameters<C: CipherSuite> {
    /// The number of participants in the scheme.
    pub n: u32,
    /// The threshold required for a successful signature.
    pub t: u32,
    _phantom: PhantomData<C>,
}

impl<C: CipherSuite> ThresholdParameters<C> {
    /// Initialize a new set of threshold parameters.
    ///
    /// Fails with [`Error::InvalidParameters`] if one of the following conditions is met:
    ///  - n equals 0
    ///  - t equals 0
    ///  - n < t
    pub fn new(n: u32, t: u32) -> SchnorrResult<Self> {
        if n == 0 || t == 0 || n < t {
            return Err(Error::InvalidParameters { n, t });
        }

        Ok(Self {
            n,
            t,
            _phantom: PhantomData,
        })
    }
}
