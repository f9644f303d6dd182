// Copyright (c) 2024 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-memory storage backend.
//!
//! Models the browser-hosted transactional object-store engine: one set of
//! record stores behind a read-write lock, with read-write transactions
//! buffering their changes in a delta that is applied on commit and
//! discarded on abort or drop. The handle is cloneable and clones share the
//! same physical state, which also lets tests stand in a pre-populated
//! instance for a legacy database.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use localdb_core::backend::{self, TransactionalRo, TransactionalRw};
use localdb_core::{Data, DbDesc};
use localdb_types::StoreName;

/// Records of one store, ordered by id
type StoreMap = BTreeMap<String, Data>;

/// Set of store maps, one per store of the database
type StoreMapSet = BTreeMap<StoreName, StoreMap>;

/// Pending changes of one store: id -> new value or deletion
type DeltaMap = BTreeMap<String, Option<Data>>;

/// Changes buffered by a read-write transaction
#[derive(Default)]
struct DeltaSet {
    maps: BTreeMap<StoreName, DeltaMap>,
    /// Stores wiped inside this transaction; their base contents are
    /// ignored and dropped on commit
    cleared: BTreeSet<StoreName>,
}

impl DeltaSet {
    // Apply the buffered changes to the store maps
    fn apply_to(self, stores: &mut StoreMapSet) {
        for store in self.cleared.iter() {
            stores.entry(*store).or_default().clear();
        }
        for (store, delta) in self.maps {
            let map = stores.entry(store).or_default();
            for (id, value) in delta {
                match value {
                    Some(value) => map.insert(id, value),
                    None => map.remove(&id),
                };
            }
        }
    }
}

/// In-memory database handle
#[derive(Clone)]
pub struct InMemory {
    stores: std::sync::Arc<RwLock<StoreMapSet>>,
}

impl InMemory {
    /// New empty database
    pub fn new() -> Self {
        InMemory {
            stores: std::sync::Arc::new(RwLock::new(StoreMapSet::new())),
        }
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl backend::Backend for InMemory {
    type Impl = InMemoryImpl;

    fn exists(&self) -> localdb_core::Result<bool> {
        // An in-memory database "exists" once it holds any record
        Ok(self.stores.read().values().any(|map| !map.is_empty()))
    }

    fn open(self, desc: DbDesc) -> localdb_core::Result<Self::Impl> {
        {
            let mut stores = self.stores.write();
            for store in desc.iter() {
                stores.entry(store).or_default();
            }
        }
        Ok(InMemoryImpl {
            stores: self.stores,
        })
    }
}

/// Open in-memory database connection
pub struct InMemoryImpl {
    stores: std::sync::Arc<RwLock<StoreMapSet>>,
}

impl<'tx> TransactionalRo<'tx> for InMemoryImpl {
    type TxRo = DbTxRo<'tx>;

    fn transaction_ro<'st: 'tx>(&'st self) -> localdb_core::Result<Self::TxRo> {
        Ok(DbTxRo {
            stores: self.stores.read(),
        })
    }
}

impl<'tx> TransactionalRw<'tx> for InMemoryImpl {
    type TxRw = DbTxRw<'tx>;

    fn transaction_rw<'st: 'tx>(&'st self) -> localdb_core::Result<Self::TxRw> {
        Ok(DbTxRw {
            stores: self.stores.write(),
            delta: DeltaSet::default(),
        })
    }
}

impl backend::BackendImpl for InMemoryImpl {}

/// Read-only transaction: a read lock over the store maps
pub struct DbTxRo<'st> {
    stores: RwLockReadGuard<'st, StoreMapSet>,
}

impl backend::ReadOps for DbTxRo<'_> {
    fn get(&self, store: StoreName, id: &str) -> localdb_core::Result<Option<Data>> {
        Ok(self.stores.get(&store).and_then(|map| map.get(id)).cloned())
    }

    fn get_all(&self, store: StoreName) -> localdb_core::Result<Vec<Data>> {
        Ok(self
            .stores
            .get(&store)
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default())
    }

    fn count(&self, store: StoreName) -> localdb_core::Result<usize> {
        Ok(self.stores.get(&store).map_or(0, |map| map.len()))
    }
}

impl backend::TxRo for DbTxRo<'_> {
    fn close(self) {}
}

/// Read-write transaction: a write lock over the store maps plus a set of
/// buffered changes applied on commit
pub struct DbTxRw<'st> {
    stores: RwLockWriteGuard<'st, StoreMapSet>,
    delta: DeltaSet,
}

impl DbTxRw<'_> {
    // Merged view of one store: base contents overlaid with the delta
    fn effective(&self, store: StoreName) -> BTreeMap<&String, &Data> {
        let mut out = BTreeMap::new();
        if !self.delta.cleared.contains(&store) {
            if let Some(base) = self.stores.get(&store) {
                out.extend(base.iter());
            }
        }
        if let Some(delta) = self.delta.maps.get(&store) {
            for (id, value) in delta {
                match value {
                    Some(value) => {
                        out.insert(id, value);
                    }
                    None => {
                        out.remove(id);
                    }
                }
            }
        }
        out
    }
}

impl backend::ReadOps for DbTxRw<'_> {
    fn get(&self, store: StoreName, id: &str) -> localdb_core::Result<Option<Data>> {
        if let Some(delta) = self.delta.maps.get(&store) {
            if let Some(value) = delta.get(id) {
                return Ok(value.clone());
            }
        }
        if self.delta.cleared.contains(&store) {
            return Ok(None);
        }
        Ok(self.stores.get(&store).and_then(|map| map.get(id)).cloned())
    }

    fn get_all(&self, store: StoreName) -> localdb_core::Result<Vec<Data>> {
        Ok(self.effective(store).into_values().cloned().collect())
    }

    fn count(&self, store: StoreName) -> localdb_core::Result<usize> {
        Ok(self.effective(store).len())
    }
}

impl backend::WriteOps for DbTxRw<'_> {
    fn put(&mut self, store: StoreName, id: &str, value: Data) -> localdb_core::Result<()> {
        self.delta
            .maps
            .entry(store)
            .or_default()
            .insert(id.to_string(), Some(value));
        Ok(())
    }

    fn del(&mut self, store: StoreName, id: &str) -> localdb_core::Result<()> {
        self.delta
            .maps
            .entry(store)
            .or_default()
            .insert(id.to_string(), None);
        Ok(())
    }

    fn clear(&mut self, store: StoreName) -> localdb_core::Result<()> {
        self.delta.maps.remove(&store);
        self.delta.cleared.insert(store);
        Ok(())
    }
}

impl backend::TxRw for DbTxRw<'_> {
    fn commit(mut self) -> localdb_core::Result<()> {
        let delta = std::mem::take(&mut self.delta);
        delta.apply_to(&mut self.stores);
        Ok(())
    }

    fn abort(self) {}
}

#[cfg(test)]
mod test;
