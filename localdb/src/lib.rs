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

//! Application-level interface for the bucketed wallet record store.
//!
//! Feature services program against [LocalDb], the transactional CRUD
//! contract over the record schema of `localdb-types`, independent of the
//! storage backend and of the bucket a store is sharded into. The bucket
//! router resolves each logical store to its owning bucket (a separately
//! opened physical database); the migration engine moves a pre-bucket
//! single-database installation into the bucketed layout exactly once; the
//! backup job mirrors the primary bucket into its snapshot bucket at most
//! once per day.
//!
//! Within one bucket, a transaction is as atomic as the backend makes it.
//! Across buckets there is no atomicity: a [LocalDb::with_transaction] call
//! touching several buckets commits them sequentially, and a crash in
//! between leaves the buckets individually valid but mutually inconsistent.
//! The migration guard is what makes rerunning after such a partial write
//! safe.

mod agent;
mod backup;
mod codec;
mod migration;
mod router;
mod transaction;

pub use agent::{LocalDb, RecordsQuery};
pub use backup::{backup_daily, run_scheduled_backup};
pub use migration::{
    run_legacy_migration, run_startup_migration, MigrationOutcome, MigrationReport,
    StoreCopyCounts,
};
pub use router::BucketRouter;
pub use transaction::{
    AddOptions, AddResult, LocalDbTransaction, RecordPair, RecordTarget, RemoveOptions,
    TransactionOptions,
};

pub use localdb_core::{Backend, Data, DbDesc, Error, Result};

#[cfg(test)]
mod test;
