//! Daily preventive-action checklist

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Language;

/// The fixed set of preventive actions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DailyActionKey {
    Mask,
    Glasses,
    WashOnReturn,
    IndoorLaundry,
    CloseWindows,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown daily action: {0}")]
pub struct UnknownActionKey(pub String);

impl DailyActionKey {
    pub const ALL: [DailyActionKey; 5] = [
        DailyActionKey::Mask,
        DailyActionKey::Glasses,
        DailyActionKey::WashOnReturn,
        DailyActionKey::IndoorLaundry,
        DailyActionKey::CloseWindows,
    ];

    /// Key used in persisted state
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyActionKey::Mask => "mask",
            DailyActionKey::Glasses => "glasses",
            DailyActionKey::WashOnReturn => "wash_on_return",
            DailyActionKey::IndoorLaundry => "indoor_laundry",
            DailyActionKey::CloseWindows => "close_windows",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (DailyActionKey::Mask, Language::English) => "Wear a mask",
            (DailyActionKey::Glasses, Language::English) => "Wear pollen glasses",
            (DailyActionKey::WashOnReturn, Language::English) => "Wash hands and face when home",
            (DailyActionKey::IndoorLaundry, Language::English) => "Dry laundry indoors",
            (DailyActionKey::CloseWindows, Language::English) => "Keep windows closed",
            (DailyActionKey::Mask, Language::Japanese) => "マスクを着用",
            (DailyActionKey::Glasses, Language::Japanese) => "花粉用メガネを着用",
            (DailyActionKey::WashOnReturn, Language::Japanese) => "帰宅後に手洗い・洗顔",
            (DailyActionKey::IndoorLaundry, Language::Japanese) => "洗濯物は部屋干し",
            (DailyActionKey::CloseWindows, Language::Japanese) => "窓を閉める",
        }
    }
}

impl FromStr for DailyActionKey {
    type Err = UnknownActionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DailyActionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownActionKey(s.to_string()))
    }
}

/// Completion state for every action. All five keys are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionChecklist(BTreeMap<DailyActionKey, bool>);

impl Default for ActionChecklist {
    fn default() -> Self {
        Self(DailyActionKey::ALL.into_iter().map(|key| (key, false)).collect())
    }
}

impl ActionChecklist {
    pub fn is_done(&self, key: DailyActionKey) -> bool {
        self.0.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: DailyActionKey, done: bool) {
        self.0.insert(key, done);
    }

    /// Flip an action and return its new state
    pub fn toggle(&mut self, key: DailyActionKey) -> bool {
        let done = !self.is_done(key);
        self.set(key, done);
        done
    }

    pub fn completed(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DailyActionKey, bool)> + '_ {
        self.0.iter().map(|(key, done)| (*key, *done))
    }
}
