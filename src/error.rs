use crate::utils::Vec;

/// The reason a byte string could not be decoded into a scalar or a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The input does not have the length required by the encoding.
    InvalidLength {
        /// The length required by the encoding.
        expected: usize,
        /// The length of the provided input.
        actual: usize,
    },
    /// The leading byte of a point encoding is not a known prefix.
    InvalidPrefix(u8),
    /// The encoded integer is not reduced modulo the field order.
    OutOfRange,
    /// The coordinates do not describe a point of the prime-order group.
    NotOnCurve,
    /// The point at infinity, which is never a valid key or nonce.
    Identity,
    /// A secret key must lie in \\( [1, q-1] \\).
    ZeroSecret,
}

/// Errors that may happen while generating keys, signing, or verifying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Serialisation error
    SerializationError,
    /// Malformed scalar or point encoding
    DecodeError(DecodeFailure),
    /// Threshold parameters must satisfy `0 < t <= n`
    InvalidParameters {
        /// The number of parties.
        n: u32,
        /// The threshold.
        t: u32,
    },
    /// The local key is absent from the declared signer set
    SetMembershipError,
    /// Two lists that must describe the same parties differ in length
    InconsistentSetError {
        /// The length implied by the signer set or the parameters.
        expected: usize,
        /// The length that was provided.
        actual: usize,
    },
    /// A party index appears twice where indices must be distinct
    DuplicateIndex(u32),
    /// A VSS commitment does not have one point per polynomial coefficient
    InvalidCommitmentLength {
        /// The threshold `t`, i.e. the expected number of points.
        expected: usize,
        /// The number of points in the commitment.
        actual: usize,
    },
    /// The constant term of a dealer's commitment is not its declared public key
    InvalidCommitment(u32),
    /// A dealer's revealed public key does not open the hash commitment it published
    InvalidKeyCommitment(u32),
    /// Received secret shares failed the Feldman check
    ShareVerificationError {
        /// The party performing the check.
        accuser: u32,
        /// The dealers whose shares did not match their commitments.
        accused: Vec<u32>,
    },
    /// Fewer than `t` parties contributed to a reconstruction
    InsufficientPartiesError {
        /// The threshold `t`.
        threshold: u32,
        /// The number of contributions.
        actual: usize,
    },
    /// These participants provided local signatures inconsistent with the commitments
    MisbehavingParticipants(Vec<u32>),
    /// An aggregated key or nonce is the identity
    InvalidGroupKey,
    /// The ephemeral key of this session has already been used to sign
    EphemeralKeyConsumed,
    /// Invalid signature
    InvalidSignature,
}

impl core::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            DecodeFailure::InvalidLength { expected, actual } => {
                write!(f, "expected {} bytes, got {}", expected, actual)
            }
            DecodeFailure::InvalidPrefix(prefix) => {
                write!(f, "unknown point prefix {:#04x}", prefix)
            }
            DecodeFailure::OutOfRange => write!(f, "value is not reduced modulo the field order"),
            DecodeFailure::NotOnCurve => write!(f, "point is not on the curve"),
            DecodeFailure::Identity => write!(f, "point is the identity"),
            DecodeFailure::ZeroSecret => write!(f, "secret key is zero"),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::SerializationError => {
                write!(f, "An error happened while serialising.")
            }
            Error::DecodeError(failure) => {
                write!(f, "Could not decode the provided bytes: {}.", failure)
            }
            Error::InvalidParameters { n, t } => {
                write!(
                    f,
                    "Invalid threshold parameters: t = {} and n = {} must satisfy 0 < t <= n.",
                    t, n
                )
            }
            Error::SetMembershipError => {
                write!(f, "The local key is not part of the declared signer set.")
            }
            Error::InconsistentSetError { expected, actual } => {
                write!(
                    f,
                    "Inconsistent participant sets: expected {} entries, got {}.",
                    expected, actual
                )
            }
            Error::DuplicateIndex(index) => {
                write!(f, "Party index {} was provided more than once.", index)
            }
            Error::InvalidCommitmentLength { expected, actual } => {
                write!(
                    f,
                    "The commitment has {} points where the threshold requires {}.",
                    actual, expected
                )
            }
            Error::InvalidCommitment(index) => {
                write!(
                    f,
                    "The commitment of party {} does not match its declared public key.",
                    index
                )
            }
            Error::InvalidKeyCommitment(index) => {
                write!(
                    f,
                    "The public key revealed by party {} does not open its commitment.",
                    index
                )
            }
            Error::ShareVerificationError { accuser, accused } => {
                write!(
                    f,
                    "Party {} received secret shares not matching the commitments of {:?}.",
                    accuser, accused
                )
            }
            Error::InsufficientPartiesError { threshold, actual } => {
                write!(
                    f,
                    "Reconstruction requires at least {} parties, got {}.",
                    threshold, actual
                )
            }
            Error::MisbehavingParticipants(indices) => {
                write!(
                    f,
                    "These participants provided invalid local signatures: {:?}",
                    indices
                )
            }
            Error::InvalidGroupKey => {
                write!(
                    f,
                    "Could not generate a valid aggregated point with the given inputs."
                )
            }
            Error::EphemeralKeyConsumed => {
                write!(f, "The ephemeral key has already been used to sign.")
            }
            Error::InvalidSignature => {
                write!(f, "The signature is not correct.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<DecodeFailure> for Error {
    fn from(failure: DecodeFailure) -> Self {
        Error::DecodeError(failure)
    }
}

/// The result type returned by every fallible operation of this crate.
pub type SchnorrResult<T> = Result<T, Error>;
