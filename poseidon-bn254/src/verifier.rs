//! A stateful Merkle path verifier which keeps track of its most recent result.
//!
//! Hosts which persist verification results or publish them as events can plug in a
//! [VerificationListener]; the verification itself is [verify_path](crate::merkle::verify_path).

use alloc::vec::Vec;

use crate::{
    Felt,
    merkle::{MerkleError, verify_path},
};

// VERIFICATION EVENT
// ================================================================================================

/// Emitted once for every completed path verification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct VerificationEvent {
    pub root: Felt,
    pub leaf: Felt,
    pub result: bool,
}

/// Receives an event for every verification performed by a [RecordingVerifier].
pub trait VerificationListener {
    fn on_verification(&mut self, event: &VerificationEvent);
}

impl VerificationListener for () {
    fn on_verification(&mut self, _event: &VerificationEvent) {}
}

impl VerificationListener for Vec<VerificationEvent> {
    fn on_verification(&mut self, event: &VerificationEvent) {
        self.push(*event);
    }
}

// RECORDING VERIFIER
// ================================================================================================

/// Verifies Merkle paths and records the last verified root, the last result, and the number
/// of verifications performed.
#[derive(Debug, Clone, Default)]
pub struct RecordingVerifier<L = ()> {
    last_root: Felt,
    last_result: bool,
    verification_count: u64,
    listener: L,
}

impl RecordingVerifier {
    /// Returns a verifier which records results without notifying anyone.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: VerificationListener> RecordingVerifier<L> {
    /// Returns a verifier which notifies `listener` after every verification.
    pub fn with_listener(listener: L) -> Self {
        Self {
            last_root: Felt::ZERO,
            last_result: false,
            verification_count: 0,
            listener,
        }
    }

    /// Verifies the path from `leaf` to `root`, records the outcome and emits an event.
    ///
    /// # Errors
    /// Returns an error if `siblings` and `flags` have different lengths. In this case nothing is
    /// recorded and no event is emitted.
    pub fn verify_merkle_path(
        &mut self,
        root: Felt,
        leaf: Felt,
        siblings: &[Felt],
        flags: &[bool],
    ) -> Result<bool, MerkleError> {
        let result = verify_path(root, leaf, siblings, flags)?;

        self.last_root = root;
        self.last_result = result;
        self.verification_count += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            %root,
            %leaf,
            result,
            count = self.verification_count,
            "merkle path verified"
        );

        self.listener.on_verification(&VerificationEvent { root, leaf, result });
        Ok(result)
    }

    /// Returns the last verified root and its result; `(0, false)` before the first verification.
    pub fn last_result(&self) -> (Felt, bool) {
        (self.last_root, self.last_result)
    }

    /// Returns the number of completed verifications.
    pub fn verification_count(&self) -> u64 {
        self.verification_count
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }
}

// TESTS
// ================================================================================================
