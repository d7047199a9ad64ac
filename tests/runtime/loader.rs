//! Integration tests for the reward loader

use grantable_foundation::ErrorKind;
use grantable_language::{GrantableRegistry, PatternSpec};
use grantable_runtime::{LoaderConfig, RewardLoader, describe_stacks, join_lines};

// =============================================================================
// Failure Policy
// =============================================================================

#[test]
fn lenient_loader_reports_skipped_tokens() {
    let loader = RewardLoader::new(LoaderConfig::lenient());
    let report = loader
        .load("arena.wave3", "$10, @flying, (#kit.a, $x), wool:red:4")
        .unwrap();
    let loaded: Vec<String> = report.grantables.iter().map(ToString::to_string).collect();
    assert_eq!(loaded, ["$10", "wool:1:4"]);
    let skipped: Vec<&str> = report.failures.iter().map(|f| f.token.as_str()).collect();
    assert_eq!(skipped, ["@flying", "(#kit.a, $x)"]);
}

#[test]
fn strict_loader_fails_whole_descriptor() {
    let loader = RewardLoader::new(LoaderConfig::strict());
    let err = loader.load("arena.wave3", "$10, @flying").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { field: "effect type", .. }));
}

#[test]
fn malformed_groups_fail_under_any_policy() {
    let loader = RewardLoader::new(LoaderConfig::lenient());
    assert!(matches!(
        loader.load("x", "$1, ($2").unwrap_err().kind,
        ErrorKind::MalformedGroup { .. }
    ));
}

#[test]
fn empty_descriptors_follow_config() {
    let lenient = RewardLoader::new(LoaderConfig::lenient());
    assert!(lenient.load("x", " , ").unwrap().grantables.is_empty());

    let strict = RewardLoader::new(LoaderConfig::strict());
    let err = strict.load("x", "").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyInput { .. }));
    assert!(err.to_string().contains("rewards for x"));
}

#[test]
fn loader_uses_its_registry() {
    let registry = GrantableRegistry::default();
    registry
        .register("title", PatternSpec::new().with_prefix("title"), |body, _| {
            grantable_language::Permission::parse_body(&format!("title.{body}")).map(Into::into)
        })
        .unwrap();
    let loader = RewardLoader::with_registry(&registry, LoaderConfig::strict());
    let report = loader.load("x", "title:champion").unwrap();
    assert_eq!(report.grantables[0].to_string(), "#title.champion");
}

// =============================================================================
// Item Stacks
// =============================================================================

#[test]
fn item_stacks_load_and_describe() {
    let loader = RewardLoader::new(LoaderConfig::lenient());
    let stacks = loader
        .load_item_stacks("kit", "diamond:3, $5, wool:red:2, diamond_sword 16:5")
        .unwrap();
    assert_eq!(stacks.len(), 3);
    assert_eq!(
        describe_stacks(&stacks),
        "diamond:3, wool:1:2, diamond_sword 16:5"
    );
}

#[test]
fn strict_item_stacks_reject_non_items() {
    let loader = RewardLoader::new(LoaderConfig::strict());
    assert!(loader.load_item_stacks("kit", "diamond, $5").is_err());
}

#[test]
fn config_lines_join_into_one_descriptor() {
    let lines = ["$5", "", "  #kit.vip ", "diamond:2"];
    assert_eq!(join_lines(&lines[..]), "$5, #kit.vip, diamond:2");
}
