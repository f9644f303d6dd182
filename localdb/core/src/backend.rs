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

//! Backend interface: transactional byte-level CRUD over record stores.

use localdb_types::StoreName;

use crate::info::DbDesc;
use crate::Data;

/// Read operations on the stores of one database
pub trait ReadOps {
    /// Get the serialized record under the given id
    fn get(&self, store: StoreName, id: &str) -> crate::Result<Option<Data>>;

    /// Get the parallel legacy-format representation of a record, if the
    /// backend maintains one during a migration-compatibility window.
    /// Backends with a single physical representation return `None`.
    fn get_legacy(&self, store: StoreName, id: &str) -> crate::Result<Option<Data>> {
        let _ = (store, id);
        Ok(None)
    }

    /// All records of the store, ordered by id
    fn get_all(&self, store: StoreName) -> crate::Result<Vec<Data>>;

    /// Number of records in the store
    fn count(&self, store: StoreName) -> crate::Result<usize>;
}

/// Modifying operations on the stores of one database
pub trait WriteOps: ReadOps {
    /// Insert or overwrite the record under the given id
    fn put(&mut self, store: StoreName, id: &str, value: Data) -> crate::Result<()>;

    /// Delete the record under the given id. Deleting an absent id is a
    /// no-op at this level; existence checks live in the layer above.
    fn del(&mut self, store: StoreName, id: &str) -> crate::Result<()>;

    /// Remove every record of the store
    fn clear(&mut self, store: StoreName) -> crate::Result<()>;
}

/// A read-only transaction
pub trait TxRo: ReadOps {
    /// Close the transaction
    fn close(self);
}

/// A read-write transaction. Dropping it without committing discards all
/// its changes.
pub trait TxRw: WriteOps {
    /// Commit the changes to the database
    fn commit(self) -> crate::Result<()>;

    /// Abort the transaction, discarding its changes
    fn abort(self);
}

/// Types capable of starting read-only transactions
pub trait TransactionalRo<'tx> {
    /// Associated read-only transaction type
    type TxRo: TxRo + 'tx;

    /// Start a read-only transaction
    fn transaction_ro<'st: 'tx>(&'st self) -> crate::Result<Self::TxRo>;
}

/// Types capable of starting read-write transactions
pub trait TransactionalRw<'tx> {
    /// Associated read-write transaction type
    type TxRw: TxRw + 'tx;

    /// Start a read-write transaction
    fn transaction_rw<'st: 'tx>(&'st self) -> crate::Result<Self::TxRw>;
}

/// An open database connection
pub trait BackendImpl:
    for<'tx> TransactionalRo<'tx> + for<'tx> TransactionalRw<'tx> + Send + Sync + 'static
{
}

/// Storage backend: a recipe for opening one physical database
pub trait Backend: Sized {
    /// Connection type representing the open database
    type Impl: BackendImpl;

    /// Whether the physical database already exists without opening it.
    /// Used by the migration engine to detect a legacy installation by its
    /// well-known name.
    fn exists(&self) -> crate::Result<bool>;

    /// Open the database, creating the stores described in `desc` as needed
    fn open(self, desc: DbDesc) -> crate::Result<Self::Impl>;
}
