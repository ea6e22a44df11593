//! The consolidation pipeline.
//!
//! One linear batch pass per run: screening -> overrides -> per-provider
//! identifier resolution -> pricing consolidation -> snapshot. The whole
//! configuration is validated at construction, so a malformed setup aborts
//! before any snapshot exists.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use pricewatch_reference_data::{
    CatalogEntry, MappingSet, ProviderRegistry, ReferencePriceProvider, ResolutionDiagnostics,
};

use crate::consolidation::{ConsolidationConfig, Consolidator};
use crate::errors::{ConfigError, Result};
use crate::overrides::OverrideSet;
use crate::screening::ExclusionRules;
use crate::snapshot::{ConsolidatedEntry, Snapshot};

/// Full configuration for a pricing run.
///
/// Loading this from YAML or JSON is the caller's job; validation is ours
/// and happens before anything runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Provider priority order, highest first. Total order, no ties.
    pub priority: Vec<String>,
    pub exclusions: ExclusionRules,
    pub overrides: OverrideSet,
    pub consolidation: ConsolidationConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.priority {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyProviderName.into());
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicatePriority(name.clone()).into());
            }
        }
        self.exclusions.validate()?;
        self.overrides.validate()?;
        self.consolidation.validate()?;
        Ok(())
    }
}

/// One run's output: the snapshot plus everything the run set aside.
#[derive(Debug)]
pub struct PipelineRun {
    pub snapshot: Snapshot,
    /// Entries dropped by the exclusion rules, in catalog order.
    pub excluded: Vec<CatalogEntry>,
    /// Per-entry candidate-gathering diagnostics, keyed by entry id.
    pub diagnostics: BTreeMap<String, ResolutionDiagnostics>,
}

/// The linear consolidation pass.
pub struct PricingPipeline {
    config: PipelineConfig,
    registry: ProviderRegistry,
    mappings: MappingSet,
    consolidator: Consolidator,
}

impl PricingPipeline {
    /// Build the pipeline, validating the entire configuration up front.
    /// Nothing is written or published past a malformed configuration.
    pub fn new(
        config: PipelineConfig,
        providers: Vec<Arc<dyn ReferencePriceProvider>>,
        mappings: MappingSet,
    ) -> Result<Self> {
        config.validate()?;
        let registry = ProviderRegistry::new(providers, &config.priority)?;
        let consolidator = Consolidator::new(config.consolidation.clone())?;
        Ok(PricingPipeline {
            config,
            registry,
            mappings,
            consolidator,
        })
    }

    /// Run the pass over a freshly fetched catalog, stamped now.
    pub fn run(&self, catalog: Vec<CatalogEntry>) -> Result<PipelineRun> {
        self.run_at(catalog, Utc::now())
    }

    /// Run the pass with an explicit run stamp.
    pub fn run_at(
        &self,
        catalog: Vec<CatalogEntry>,
        taken_at: DateTime<Utc>,
    ) -> Result<PipelineRun> {
        let total = catalog.len();
        let (kept, excluded) = self.config.exclusions.partition(catalog);

        let mut entries = Vec::with_capacity(kept.len());
        let mut diagnostics = BTreeMap::new();

        for mut entry in kept {
            self.config.overrides.apply(&mut entry)?;

            let mapping = self.mappings.get(&entry.id);
            let (candidates, entry_diagnostics) = self.registry.candidates_for(&entry, mapping);
            if mapping.is_some() && !entry_diagnostics.has_candidates() {
                warn!(
                    "Entry '{}' has no provider candidates: {}",
                    entry.id,
                    entry_diagnostics.summary()
                );
            }

            let decisions = self.consolidator.consolidate_entry(&entry, &candidates);
            diagnostics.insert(entry.id.clone(), entry_diagnostics);
            entries.push(ConsolidatedEntry::new(entry, decisions));
        }

        let snapshot = Snapshot::at(taken_at, entries)?;
        info!(
            "Consolidated {} of {} catalog entries ({} excluded) against {} providers",
            snapshot.len(),
            total,
            excluded.len(),
            self.registry.len()
        );
        Ok(PipelineRun {
            snapshot,
            excluded,
            diagnostics,
        })
    }
}
