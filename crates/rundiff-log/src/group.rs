// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Equivalence grouping of parameterized test iterations
//!
//! Within one run, a parameterized test's iterations frequently behave
//! identically up to normalization. Collapsing them into groups keeps the
//! comparison linear in the number of distinct behaviors instead of the
//! number of iterations.

use crate::model::{IterGroup, TestRecord, TestStatus};
use crate::normalize::normalized_record_body;
use std::collections::BTreeMap;

/// Cluster a test's iterations into equivalence groups
///
/// Greedy O(n * g): each iteration joins the first existing group whose
/// representative has the same status and an equal normalized body, or opens
/// a new group. The number of distinct behavioral groups per test is small
/// in practice, so the quadratic factor never matters.
#[must_use]
pub fn group_equivalent_iters(iters: BTreeMap<u32, TestRecord>) -> Vec<IterGroup> {
    struct Open {
        status: TestStatus,
        normalized: String,
        tests: BTreeMap<u32, TestRecord>,
    }

    let mut open: Vec<Open> = Vec::new();

    for (index, record) in iters {
        let normalized = normalized_record_body(&record);

        match open
            .iter_mut()
            .find(|g| g.status == record.status && g.normalized == normalized)
        {
            Some(group) => {
                group.tests.insert(index, record);
            }
            None => {
                let mut tests = BTreeMap::new();
                let status = record.status;
                tests.insert(index, record);
                open.push(Open {
                    status,
                    normalized,
                    tests,
                });
            }
        }
    }

    open.into_iter()
        .map(|g| IterGroup { tests: g.tests })
        .collect()
}
