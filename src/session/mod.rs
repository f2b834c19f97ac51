//! Unlocked session state
//!
//! A [`Session`] is what an [`UnlockGate`] hands back once the password has
//! opened the primary dataset. It keeps the password so the other dataset
//! can be decrypted the first time it is asked for.

pub mod gate;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::HashMap;

use tracing::debug;

use crate::bundle::Bundle;
use crate::crypto::{EncryptionConfig, SecureString};
use crate::error::{ViewerError, ViewerResult};
use crate::models::{CaseRecord, Dataset, MechanismKind};

pub use gate::{GateState, UnlockGate};
pub use validator::{open_envelope, validate_plaintext};

/// Cases sharing one mechanism kind
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismGroup {
    pub kind: MechanismKind,
    /// Ranks of the cases in this group, ascending
    pub ranks: Vec<u32>,
}

impl MechanismGroup {
    pub fn count(&self) -> usize {
        self.ranks.len()
    }
}

/// Decrypted cases plus what is needed to decrypt the rest of the bundle
#[derive(Debug)]
pub struct Session {
    bundle: Bundle,
    config: EncryptionConfig,
    password: SecureString,
    primary: Dataset,
    datasets: HashMap<Dataset, Vec<CaseRecord>>,
}

impl Session {
    pub(crate) fn new(
        bundle: Bundle,
        config: EncryptionConfig,
        password: SecureString,
        primary: Dataset,
        cases: Vec<CaseRecord>,
    ) -> Self {
        let mut datasets = HashMap::new();
        datasets.insert(primary, cases);
        Self {
            bundle,
            config,
            password,
            primary,
            datasets,
        }
    }

    pub fn primary_dataset(&self) -> Dataset {
        self.primary
    }

    /// Parameters that opened the bundle
    pub fn config(&self) -> &EncryptionConfig {
        &self.config
    }

    /// Whether a dataset has already been decrypted
    pub fn is_loaded(&self, dataset: Dataset) -> bool {
        self.datasets.contains_key(&dataset)
    }

    /// Cases of a dataset, decrypting it on first use
    ///
    /// A failure leaves the cache empty so a later call can retry.
    pub fn cases(&mut self, dataset: Dataset) -> ViewerResult<&[CaseRecord]> {
        if !self.datasets.contains_key(&dataset) {
            debug!(%dataset, "decrypting dataset on demand");
            let envelope = self.bundle.load_envelope(dataset)?;
            let cases = open_envelope(&envelope, &self.password, &self.config)?;
            self.datasets.insert(dataset, cases);
        }

        Ok(self
            .datasets
            .get(&dataset)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Look up one case by its rank
    pub fn case_by_rank(&mut self, dataset: Dataset, rank: u32) -> ViewerResult<&CaseRecord> {
        self.cases(dataset)?
            .iter()
            .find(|c| c.rank == rank)
            .ok_or_else(|| ViewerError::case_not_found(rank))
    }

    /// Group a dataset's cases by mechanism kind
    pub fn mechanism_breakdown(&mut self, dataset: Dataset) -> ViewerResult<Vec<MechanismGroup>> {
        Ok(group_by_mechanism(self.cases(dataset)?))
    }
}

/// Group cases by mechanism kind, skipping kinds with no cases
///
/// Groups follow [`MechanismKind::ALL`] order.
pub fn group_by_mechanism(cases: &[CaseRecord]) -> Vec<MechanismGroup> {
    MechanismKind::ALL
        .iter()
        .filter_map(|&kind| {
            let mut ranks: Vec<u32> = cases
                .iter()
                .filter(|c| c.mechanism_kind() == kind)
                .map(|c| c.rank)
                .collect();
            if ranks.is_empty() {
                return None;
            }
            ranks.sort_unstable();
            Some(MechanismGroup { kind, ranks })
        })
        .collect()
}
