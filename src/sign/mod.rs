mod aggregate;
mod signature;
mod threshold;

pub use aggregate::{aggregate_nonces, aggregate_public_keys, Aggregator};
pub(crate) use signature::compute_challenge;
pub use signature::{Signature, SignatureScheme};
pub use threshold::{get_local_signature, summarize_local_signature, LocalSignature};
