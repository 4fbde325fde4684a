// src/pm/wbs.rs

//! Work breakdown structure codes.
//!
//! A code is a dotted list of 1-based indices: `2` is the second phase,
//! `2.1` its first work package, `2.1.3` the third item below that.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{DepdagError, Result};

/// Codes shown by `depdag wbs --example`.
pub const EXAMPLE_CODES: [&str; 9] = [
    "1", "1.1", "1.2", "2", "2.1", "2.2", "2.2.1", "2.2.2", "3",
];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WbsCode(Vec<u32>);

impl WbsCode {
    /// Top-level code for the `index`-th phase.
    pub fn root(index: u32) -> Self {
        WbsCode(vec![index])
    }

    /// Code of the `index`-th item directly below `self`.
    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.0.clone();
        segments.push(index);
        WbsCode(segments)
    }

    /// Depth in the tree; top-level codes are level 1.
    pub fn level(&self) -> usize {
        self.0.len()
    }

    /// This code and every ancestor, shortest first.
    fn prefixes(&self) -> impl Iterator<Item = WbsCode> + '_ {
        (1..=self.0.len()).map(|n| WbsCode(self.0[..n].to_vec()))
    }
}

impl fmt::Display for WbsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for WbsCode {
    type Err = DepdagError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DepdagError::Validation(format!("invalid WBS code '{s}'"));

        s.split('.')
            .map(|part| match part.parse::<u32>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(n) => Ok(n),
            })
            .collect::<Result<Vec<_>>>()
            .map(WbsCode)
    }
}

/// One entry of the WBS tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WbsNode {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WbsNode>,
}

impl WbsNode {
    fn new(code: &WbsCode, label: Option<String>, children: Vec<WbsNode>) -> Self {
        Self {
            code: code.to_string(),
            label,
            children,
        }
    }
}

/// Arrange `codes` into a tree ordered by numeric segment.
///
/// Missing ancestors are filled in, so `["1.2.1"]` yields `1 > 1.2 > 1.2.1`.
/// Repeated codes appear once.
pub fn parse_hierarchy<S: AsRef<str>>(codes: &[S]) -> Result<Vec<WbsNode>> {
    let mut all = BTreeSet::new();
    for code in codes {
        let code: WbsCode = code.as_ref().parse()?;
        all.extend(code.prefixes());
    }

    // Sorted with every ancestor present, so the set is a pre-order walk.
    let mut walk = all.into_iter().peekable();
    Ok(collect_level(&mut walk, 1))
}

fn collect_level<I>(walk: &mut std::iter::Peekable<I>, level: usize) -> Vec<WbsNode>
where
    I: Iterator<Item = WbsCode>,
{
    let mut nodes = Vec::new();
    while let Some(code) = walk.next_if(|c| c.level() == level) {
        let children = collect_level(walk, level + 1);
        nodes.push(WbsNode::new(&code, None, children));
    }
    nodes
}

/// Numbered skeleton with `phases` top-level phases of `packages` work
/// packages each.
pub fn outline(phases: u32, packages: u32) -> Vec<WbsNode> {
    (1..=phases)
        .map(|i| {
            let phase = WbsCode::root(i);
            let children = (1..=packages)
                .map(|j| {
                    WbsNode::new(&phase.child(j), Some(format!("Work package {j}")), Vec::new())
                })
                .collect();
            WbsNode::new(&phase, Some(format!("Phase {i}")), children)
        })
        .collect()
}
