//! Integration tests for per-recipient rewards

use std::sync::Arc;

use grantable_language::{Recipient, parse};
use grantable_runtime::{GrantOutcome, MemoryBackend, RewardManager};

#[test]
fn rewards_are_granted_once_per_recipient() {
    let backend = Arc::new(MemoryBackend::new());
    let caps = backend.capabilities();
    let alice = Recipient::new("alice");
    let bob = Recipient::new("bob");

    let mut manager = RewardManager::new();
    for reward in parse("$5, #winner").unwrap() {
        manager.add_reward(&alice, reward);
    }

    assert_eq!(manager.grant_rewards(&caps, &bob), GrantOutcome::NothingPending);
    assert!(!manager.is_rewarded(&bob));

    assert_eq!(
        manager.grant_rewards(&caps, &alice),
        GrantOutcome::Granted { granted: 2, failed: 0 }
    );
    assert_eq!(manager.grant_rewards(&caps, &alice), GrantOutcome::AlreadyRewarded);
    assert!((backend.balance(&alice) - 5.0).abs() < f64::EPSILON);
}

#[test]
fn failed_rewards_are_counted() {
    let backend = Arc::new(MemoryBackend::with_inventory_config(
        grantable_runtime::InventoryConfig::default().with_slots(1),
    ));
    let caps = backend.capabilities();
    let alice = Recipient::new("alice");

    let mut manager = RewardManager::new();
    for reward in parse("stone:100, $1").unwrap() {
        manager.add_reward(&alice, reward);
    }
    assert_eq!(
        manager.grant_rewards(&caps, &alice),
        GrantOutcome::Granted { granted: 1, failed: 1 }
    );
}

#[test]
fn reset_allows_rewarding_again() {
    let backend = Arc::new(MemoryBackend::new());
    let caps = backend.capabilities();
    let alice = Recipient::new("alice");

    let mut manager = RewardManager::new();
    manager.add_reward(&alice, parse("$1").unwrap().remove(0));
    manager.grant_rewards(&caps, &alice);
    manager.reset();
    assert!(manager.rewards_for(&alice).is_empty());
    assert!(!manager.is_rewarded(&alice));

    manager.add_reward(&alice, parse("$1").unwrap().remove(0));
    manager.grant_rewards(&caps, &alice);
    assert!((backend.balance(&alice) - 2.0).abs() < f64::EPSILON);
}
