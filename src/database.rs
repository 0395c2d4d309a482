//! Linked collection of near-Earth objects and their close approaches.
//!
//! [`NeoDatabase::new`] is the only place where the association between the
//! two entities is built. Each NEO takes ownership of its approaches, and each
//! approach gets a non-owning pointer back at its NEO. Both sides are frozen
//! afterwards.

use crate::error::Result;
use crate::models::{CloseApproach, NearEarthObject};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// Near-Earth objects and close approaches, linked in both directions.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<Arc<NearEarthObject>>,
    approaches: Vec<Arc<CloseApproach>>,
    by_designation: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl NeoDatabase {
    /// Links every close approach to the NEO sharing its designation.
    ///
    /// Load order is kept: `neos()` and `approaches()` follow the input order,
    /// and each NEO lists its approaches in input order. Approaches whose
    /// designation matches no NEO are dropped with a warning, and so are NEOs
    /// repeating a designation already seen (the first one is kept).
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Result<Self> {
        let known: HashSet<&str> = neos.iter().map(|n| n.designation.as_str()).collect();

        let mut orphans = 0usize;
        let approaches: Vec<Arc<CloseApproach>> = approaches
            .into_iter()
            .filter(|approach| {
                let is_known = known.contains(approach.designation());
                if !is_known {
                    orphans += 1;
                    warn!(
                        designation = approach.designation(),
                        "close approach refers to an unknown NEO, dropping it"
                    );
                }
                is_known
            })
            .map(Arc::new)
            .collect();

        let mut grouped: HashMap<&str, Vec<Arc<CloseApproach>>> = HashMap::new();
        for approach in &approaches {
            grouped
                .entry(approach.designation())
                .or_default()
                .push(Arc::clone(approach));
        }

        let mut linked = Vec::with_capacity(neos.len());
        let mut by_designation: HashMap<String, usize> = HashMap::with_capacity(neos.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut duplicates = 0usize;
        for mut neo in neos {
            if by_designation.contains_key(&neo.designation) {
                duplicates += 1;
                warn!(
                    designation = %neo.designation,
                    "near-Earth object repeats a known designation, dropping it"
                );
                continue;
            }

            neo.approaches = grouped.remove(neo.designation.as_str()).unwrap_or_default();
            let neo = Arc::new(neo);
            for approach in &neo.approaches {
                approach.link(&neo)?;
            }

            by_designation.insert(neo.designation.clone(), linked.len());
            if let Some(name) = &neo.name {
                by_name.entry(name.clone()).or_insert(linked.len());
            }
            linked.push(neo);
        }

        info!(
            neos = linked.len(),
            approaches = approaches.len(),
            orphans,
            duplicates,
            "near-Earth objects linked to their close approaches"
        );

        Ok(NeoDatabase {
            neos: linked,
            approaches,
            by_designation,
            by_name,
        })
    }

    pub fn neos(&self) -> &[Arc<NearEarthObject>] {
        &self.neos
    }

    /// Every linked close approach, in load order.
    pub fn approaches(&self) -> &[Arc<CloseApproach>] {
        &self.approaches
    }

    /// Finds an NEO by its primary designation, e.g. `"433"` or `"2020 AB"`.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&Arc<NearEarthObject>> {
        self.by_designation.get(designation).map(|&i| &self.neos[i])
    }

    /// Finds an NEO by its IAU name, e.g. `"Eros"`. Unnamed NEOs never match.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&Arc<NearEarthObject>> {
        self.by_name.get(name).map(|&i| &self.neos[i])
    }
}
