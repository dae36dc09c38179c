// Copyright 2026 The Resdeck Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! The well-list registry: named, mutable sets of well names.
//!
//! Lists are mutated by NEW/ADD/DEL/MOV records and may be used as
//! directive targets. Operands are resolved to concrete well names at
//! the moment of mutation: wildcard templates expand against the wells
//! known to exist at that date, and a `*name` operand pulls in another
//! list's membership as it stands right then. Nothing unexpanded is
//! ever stored, so an as-of query never needs to chase references.
//!
//! Membership is kept sorted and duplicate-free. Mutations on the same
//! date apply in stream order; a NEW on an existing name replaces its
//! membership outright.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::common::{Result, on_or_before};
use crate::datamodel::WlistAction;
use crate::registry_err;
use resdeck_core::pattern;

/// One applied mutation, retained so membership can be queried as of
/// any date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMutation {
    pub action: WlistAction,
    pub operands: Vec<String>,
    pub date: Option<NaiveDate>,
    pub members_after: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellList {
    pub name: String,
    /// Current membership, sorted and duplicate-free.
    pub members: Vec<String>,
    /// Date of the last mutation.
    pub modified: Option<NaiveDate>,
    pub history: Vec<ListMutation>,
}

impl WellList {
    fn new(name: &str) -> WellList {
        WellList {
            name: name.to_string(),
            members: Vec::new(),
            modified: None,
            history: Vec::new(),
        }
    }

    /// Membership in effect at the latest mutation at or before `date`.
    /// `None` if the list had not been defined yet.
    pub fn members_as_of(&self, date: Option<NaiveDate>) -> Option<&[String]> {
        self.history
            .iter()
            .rev()
            .find(|m| on_or_before(m.date, date))
            .map(|m| m.members_after.as_slice())
    }

    fn record(&mut self, action: WlistAction, operands: Vec<String>, date: Option<NaiveDate>) {
        self.modified = date;
        self.history.push(ListMutation {
            action,
            operands,
            date,
            members_after: self.members.clone(),
        });
    }
}

fn normalized(mut wells: Vec<String>) -> Vec<String> {
    wells.sort_unstable();
    wells.dedup();
    wells
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WellListRegistry {
    lists: BTreeMap<String, WellList>,
}

impl WellListRegistry {
    pub fn new() -> WellListRegistry {
        Default::default()
    }

    /// Resolves a raw operand list into concrete well names.
    ///
    /// A `*name` operand references another list and resolves to that
    /// list's membership as of `date` (error when undefined by then); a
    /// wildcard template expands against `universe`; anything else is a
    /// concrete well name and is kept as-is. Resolution order follows
    /// operand order; duplicates are left for the consuming mutation to
    /// collapse.
    pub fn resolve_members(
        &self,
        operands: &[String],
        universe: &[String],
        date: Option<NaiveDate>,
    ) -> Result<Vec<String>> {
        let mut resolved = Vec::with_capacity(operands.len());
        for operand in operands {
            if let Some(referenced) = operand.strip_prefix('*') {
                let members = self.members_as_of(referenced, date)?;
                resolved.extend(members.iter().cloned());
            } else if pattern::has_wildcard(operand) {
                let matched = pattern::wells_matching_template(operand, universe);
                if matched.is_empty() {
                    warn!("well template {operand} matches no known well");
                }
                resolved.extend(matched);
            } else {
                resolved.push(operand.clone());
            }
        }
        Ok(resolved)
    }

    /// Replaces (or creates) `name` with exactly `members`.
    pub fn define(&mut self, name: &str, members: Vec<String>, date: Option<NaiveDate>) {
        let operands = members.clone();
        let list = self
            .lists
            .entry(name.to_string())
            .or_insert_with(|| WellList::new(name));
        list.members = normalized(members);
        list.record(WlistAction::New, operands, date);
    }

    /// Unions `members` into an existing list.
    pub fn add(&mut self, name: &str, members: Vec<String>, date: Option<NaiveDate>) -> Result<()> {
        let Some(list) = self.lists.get_mut(name) else {
            return registry_err!(
                UnknownList,
                format!("ADD only works on existing well lists: {name}")
            );
        };
        let operands = members.clone();
        let mut merged = list.members.clone();
        merged.extend(members);
        list.members = normalized(merged);
        list.record(WlistAction::Add, operands, date);
        Ok(())
    }

    /// Subtracts `members` from an existing list.
    pub fn remove(
        &mut self,
        name: &str,
        members: Vec<String>,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        let Some(list) = self.lists.get_mut(name) else {
            return registry_err!(
                UnknownList,
                format!("DEL only works on existing well lists: {name}")
            );
        };
        list.members.retain(|w| !members.contains(w));
        list.record(WlistAction::Del, members, date);
        Ok(())
    }

    /// Moves `members` into `name`: unions them into the target
    /// (creating it when absent) and removes them from every other
    /// list.
    pub fn move_members(&mut self, name: &str, members: Vec<String>, date: Option<NaiveDate>) {
        for list in self.lists.values_mut() {
            if list.name == name {
                continue;
            }
            let before = list.members.len();
            list.members.retain(|w| !members.contains(w));
            if list.members.len() != before {
                list.record(WlistAction::Del, members.clone(), date);
            }
        }

        let operands = members.clone();
        let list = self
            .lists
            .entry(name.to_string())
            .or_insert_with(|| WellList::new(name));
        let mut merged = list.members.clone();
        merged.extend(members);
        list.members = normalized(merged);
        list.record(WlistAction::Mov, operands, date);
    }

    /// The membership of `name` in effect at `date`; errors when the
    /// list has not been defined by then.
    pub fn members_as_of(&self, name: &str, date: Option<NaiveDate>) -> Result<&[String]> {
        let members = self
            .lists
            .get(name)
            .and_then(|list| list.members_as_of(date));
        match members {
            Some(members) => Ok(members),
            None => registry_err!(UnknownList, format!("well list {name} is not defined")),
        }
    }

    pub fn get(&self, name: &str) -> Option<&WellList> {
        self.lists.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WellList> {
        self.lists.values()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
