pub(crate) mod secret_share;
pub(crate) mod threshold_key;

pub use secret_share::{Coefficients, SecretShare, VerifiableSecretSharingCommitment};
pub use threshold_key::{summarize_public_points, verification_share, LocalShare, ThresholdKey};
