use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;

use pricewatch_reference_data::{
    CatalogEntry, MappingSet, ModelsDevProvider, OpenRouterProvider, PriceField,
    ReferencePriceProvider,
};

use super::service::{PipelineConfig, PricingPipeline};
use crate::changelog::diff_snapshots;
use crate::consolidation::{DecisionSource, DecisionStatus, ReasonCode};
use crate::errors::Error;

fn providers() -> Vec<Arc<dyn ReferencePriceProvider>> {
    let openrouter = OpenRouterProvider::from_payload(json!({
        "data": [
            {
                "id": "openai/gpt-5",
                "pricing": {"prompt": "0.000003", "completion": "0.00001"}
            },
            {
                "id": "anthropic/claude-sonnet-4-5",
                "pricing": {"prompt": "0.000003"}
            }
        ]
    }))
    .unwrap();

    let models_dev = ModelsDevProvider::from_payload(json!({
        "openai": {
            "models": {
                "gpt-5": {"cost": {"input": 2.5, "output": 10}}
            }
        }
    }))
    .unwrap();

    vec![Arc::new(openrouter), Arc::new(models_dev)]
}

fn mappings() -> MappingSet {
    serde_json::from_value(json!({
        "GPT-5": {"openrouter": "openai/gpt-5", "models.dev": "auto"},
        "Claude-Sonnet-4.5": {"openrouter": "auto"}
    }))
    .unwrap()
}

fn config() -> PipelineConfig {
    serde_json::from_value(json!({
        "priority": ["openrouter", "models.dev"],
        "exclusions": {"id_suffixes": ["-search"]},
        "overrides": {"GPT-5": {"deprecated": true}}
    }))
    .unwrap()
}

fn catalog() -> Vec<CatalogEntry> {
    serde_json::from_value(json!([
        {
            "id": "GPT-5",
            "owned_by": "OpenAI",
            "pricing": {"prompt": "0.000002", "completion": "0.00001"}
        },
        {
            "id": "Claude-Sonnet-4.5",
            "owned_by": "Anthropic",
            "pricing": {"prompt": "0.000003"}
        },
        {
            "id": "GPT-5-Search",
            "owned_by": "OpenAI",
            "pricing": {"prompt": "0.000004"}
        }
    ]))
    .unwrap()
}

fn pipeline() -> PricingPipeline {
    PricingPipeline::new(config(), providers(), mappings()).unwrap()
}

#[test]
fn test_run_excludes_screens_and_consolidates() {
    let run = pipeline().run(catalog()).unwrap();

    assert_eq!(run.snapshot.len(), 2);
    assert_eq!(run.excluded.len(), 1);
    assert_eq!(run.excluded[0].id, "GPT-5-Search");

    // Highest-priority provider validates GPT-5's prompt price.
    let gpt5 = run.snapshot.index()["GPT-5"];
    let decision = gpt5.decision(PriceField::Prompt).unwrap();
    assert_eq!(decision.accepted, Some(dec!(0.000003)));
    assert_eq!(
        decision.source,
        DecisionSource::Provider("openrouter".into())
    );
    assert_eq!(decision.status, DecisionStatus::Accepted);
    assert_eq!(decision.accepted_per_million, Some(dec!(3)));

    // The override was deep-merged into the entry metadata.
    assert_eq!(gpt5.entry.metadata.get("deprecated"), Some(&json!(true)));
}

#[test]
fn test_auto_mapping_resolves_against_provider_catalog() {
    let run = pipeline().run(catalog()).unwrap();

    // "Claude-Sonnet-4.5" infers "anthropic/claude-sonnet-4-5" on
    // openrouter; prices equal the listed value, so the provider validates.
    let claude = run.snapshot.index()["Claude-Sonnet-4.5"];
    let decision = claude.decision(PriceField::Prompt).unwrap();
    assert_eq!(decision.accepted, Some(dec!(0.000003)));
    assert_eq!(
        decision.source,
        DecisionSource::Provider("openrouter".into())
    );
}

#[test]
fn test_unmapped_provider_fields_degrade_to_catalog() {
    let run = pipeline().run(catalog()).unwrap();

    // openrouter's claude entry has no completion field and models.dev is
    // not mapped for this entry, so the catalog keeps its own price.
    let claude = run.snapshot.index()["Claude-Sonnet-4.5"];
    let completion = claude.decision(PriceField::Completion).unwrap();
    assert_eq!(completion.source, DecisionSource::Catalog);
    assert_eq!(completion.reason, ReasonCode::NoProviderValidated);

    let diagnostics = &run.diagnostics["Claude-Sonnet-4.5"];
    assert_eq!(diagnostics.attempts.len(), 2);
}

#[test]
fn test_decision_coverage_is_total_across_the_run() {
    let run = pipeline().run(catalog()).unwrap();
    assert_eq!(
        run.snapshot.all_decisions().count(),
        run.snapshot.len() * PriceField::ALL.len()
    );
}

#[test]
fn test_run_is_deterministic() {
    let taken_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let first = pipeline().run_at(catalog(), taken_at).unwrap();
    let second = pipeline().run_at(catalog(), taken_at).unwrap();

    assert_eq!(first.snapshot.entries, second.snapshot.entries);
    let entry = diff_snapshots(Some(&first.snapshot), &second.snapshot);
    assert!(entry.is_empty());
}

#[test]
fn test_malformed_config_aborts_before_running() {
    let mut bad = config();
    bad.priority.push("openrouter".to_string());

    let result = PricingPipeline::new(bad, providers(), mappings());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_priority_naming_unknown_provider_is_fatal() {
    let mut bad = config();
    bad.priority.push("ghost".to_string());

    let result = PricingPipeline::new(bad, providers(), mappings());
    assert!(matches!(result, Err(Error::Reference(_))));
}

#[test]
fn test_duplicate_catalog_ids_abort_the_run() {
    let mut entries = catalog();
    entries.push(entries[0].clone());

    let result = pipeline().run(entries);
    assert!(matches!(result, Err(Error::Snapshot(_))));
}

#[test]
fn test_catalog_only_run_with_no_providers() {
    let config: PipelineConfig = serde_json::from_value(json!({"priority": []})).unwrap();
    let pipeline = PricingPipeline::new(config, vec![], MappingSet::default()).unwrap();

    let run = pipeline.run(catalog()).unwrap();
    assert_eq!(run.snapshot.len(), 3);
    for decision in run.snapshot.all_decisions() {
        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.reason, ReasonCode::NoProviderValidated);
    }
}
