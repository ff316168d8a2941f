use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Identifiers exactly as they appear in the published data.
pub mod orig {
    use serde::{Deserialize, Serialize};

    /// The station `short_name`, like "A32010". Trip records refer to stations with this.
    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct StationID(pub String);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationID(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TripID(pub usize);

impl CheapID for StationID {
    fn new(x: usize) -> Self {
        Self(x)
    }
}
impl CheapID for TripID {
    fn new(x: usize) -> Self {
        Self(x)
    }
}

pub trait CheapID: Copy {
    fn new(x: usize) -> Self;
}

#[derive(Serialize, Deserialize)]
pub struct IDMapping<K: Ord, V> {
    orig_to_cheap: BTreeMap<K, V>,
}

impl<K: Clone + std::fmt::Debug + Ord, V: CheapID> IDMapping<K, V> {
    pub fn new() -> Self {
        Self {
            orig_to_cheap: BTreeMap::new(),
        }
    }

    pub fn insert_new(&mut self, orig: K) -> Result<V> {
        if self.orig_to_cheap.contains_key(&orig) {
            bail!("IDMapping::insert_new has duplicate input for {:?}", orig);
        }
        let cheap = V::new(self.orig_to_cheap.len());
        self.orig_to_cheap.insert(orig, cheap);
        Ok(cheap)
    }

    pub fn lookup(&self, orig: &K) -> Result<V> {
        match self.orig_to_cheap.get(orig) {
            Some(x) => Ok(*x),
            None => bail!("IDMapping lookup of {:?} failed", orig),
        }
    }
}
