//! Plan access policy per subscription tier

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{SubscriptionTier, BLOCK_WEEKS};

/// Weeks of a plan the client can see and open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekAccess {
    pub visible: Vec<u32>,
    pub clickable: Vec<u32>,
}

impl WeekAccess {
    pub fn is_locked(&self, week: u32) -> bool {
        self.visible.contains(&week) && !self.clickable.contains(&week)
    }
}

/// Visible and clickable weeks for a tier and the weeks that have a review
///
/// Only the number of distinct reviewed weeks matters, not which weeks they
/// are.
pub fn week_access(tier: SubscriptionTier, reviewed_weeks: &[u32]) -> WeekAccess {
    let reviews = reviewed_weeks.iter().collect::<BTreeSet<_>>().len() as u32;
    let all: Vec<u32> = (1..=BLOCK_WEEKS).collect();

    match tier {
        SubscriptionTier::Premium => WeekAccess {
            visible: all.clone(),
            clickable: all,
        },
        SubscriptionTier::Starter => {
            let visible: Vec<u32> = (1..=BLOCK_WEEKS.min(reviews.saturating_add(1))).collect();
            WeekAccess {
                clickable: visible.clone(),
                visible,
            }
        }
        SubscriptionTier::Pro => {
            let unlocked = match reviews {
                0 => 2,
                1 => 3,
                _ => 4,
            };
            WeekAccess {
                visible: all,
                clickable: (1..=unlocked).collect(),
            }
        }
    }
}
