//! Per-recipient reward bookkeeping.

use std::collections::{HashMap, HashSet};

use grantable_language::{Capabilities, Grant, Grantable, Recipient};
use tracing::{debug, warn};

/// Result of [`RewardManager::grant_rewards`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The recipient was already rewarded since the last reset.
    AlreadyRewarded,
    /// No rewards are pending for the recipient.
    NothingPending,
    /// Rewards were handed out.
    Granted {
        /// Rewards that granted fully.
        granted: usize,
        /// Rewards that failed, in whole or in part.
        failed: usize,
    },
}

/// Collects rewards per recipient and grants each list once.
#[derive(Debug, Default)]
pub struct RewardManager {
    rewards: HashMap<Recipient, Vec<Grantable>>,
    rewarded: HashSet<Recipient>,
}

impl RewardManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reward for the recipient.
    pub fn add_reward(&mut self, recipient: &Recipient, reward: Grantable) {
        self.rewards
            .entry(recipient.clone())
            .or_default()
            .push(reward);
    }

    /// The rewards queued for the recipient.
    #[must_use]
    pub fn rewards_for(&self, recipient: &Recipient) -> &[Grantable] {
        self.rewards.get(recipient).map_or(&[], Vec::as_slice)
    }

    /// Returns true if the recipient has been rewarded since the last reset.
    #[must_use]
    pub fn is_rewarded(&self, recipient: &Recipient) -> bool {
        self.rewarded.contains(recipient)
    }

    /// Grants every queued reward to the recipient.
    ///
    /// A recipient is rewarded at most once until [`RewardManager::reset`].
    /// A recipient with nothing queued is not marked as rewarded.
    pub fn grant_rewards(&mut self, caps: &Capabilities, recipient: &Recipient) -> GrantOutcome {
        if self.rewarded.contains(recipient) {
            return GrantOutcome::AlreadyRewarded;
        }
        let Some(list) = self.rewards.get(recipient) else {
            return GrantOutcome::NothingPending;
        };

        let mut granted = 0;
        let mut failed = 0;
        for reward in list {
            if reward.grant(caps, recipient) {
                debug!(%recipient, %reward, "granted reward");
                granted += 1;
            } else {
                warn!(%recipient, %reward, "reward could not be fully granted");
                failed += 1;
            }
        }
        self.rewarded.insert(recipient.clone());
        GrantOutcome::Granted { granted, failed }
    }

    /// Forgets every queued reward and every rewarded recipient.
    pub fn reset(&mut self) {
        self.rewards.clear();
        self.rewarded.clear();
    }
}
