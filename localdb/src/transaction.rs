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

//! Transaction handle passed to [crate::LocalDb::with_transaction] tasks.
//!
//! The handle opens at most one backend transaction per bucket, lazily on
//! first touch. Commit walks the opened buckets sequentially; there is no
//! atomicity across buckets (see the crate docs).

use std::collections::{btree_map::Entry, BTreeMap};

use localdb_core::backend::{ReadOps, TransactionalRo, TransactionalRw, TxRo, TxRw, WriteOps};
use localdb_core::{Backend, Error};
use localdb_types::{BucketName, LocalDbRecord, StoreName};

use crate::codec;
use crate::router::BucketRouter;

type TxRoOf<'s, B> = <<B as Backend>::Impl as TransactionalRo<'s>>::TxRo;
type TxRwOf<'s, B> = <<B as Backend>::Impl as TransactionalRw<'s>>::TxRw;

/// Options for [crate::LocalDb::with_transaction]
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct TransactionOptions {
    read_only: bool,
}

impl TransactionOptions {
    pub fn read_write() -> Self {
        TransactionOptions { read_only: false }
    }

    /// Read-only transactions reject every write with
    /// [Error::ReadOnlyTransaction].
    pub fn read_only() -> Self {
        TransactionOptions { read_only: true }
    }
}

/// A record together with its optional parallel legacy-format mirror.
///
/// The mirror is only present while a backend maintains two physical
/// representations during a migration-compatibility window; callers must
/// handle that case explicitly instead of assuming a second field.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct RecordPair<R> {
    pub primary: R,
    pub legacy_mirror: Option<R>,
}

/// Options for [LocalDbTransaction::add_records]
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct AddOptions {
    /// Count records whose id already exists as skipped instead of raising
    /// [Error::Conflict]
    pub skip_if_exists: bool,
}

/// Outcome of one [LocalDbTransaction::add_records] call
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct AddResult {
    pub added: usize,
    pub added_ids: Vec<String>,
    pub skipped: usize,
}

/// Options for [LocalDbTransaction::remove_records]
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct RemoveOptions {
    /// Treat removal of an absent id as a no-op instead of raising
    /// [Error::NotFound]
    pub ignore_not_found: bool,
}

/// What an update/remove call operates on: a list of ids, or record pairs
/// obtained from an earlier transactional read.
pub enum RecordTarget<R> {
    Ids(Vec<String>),
    Pairs(Vec<RecordPair<R>>),
}

impl<R: LocalDbRecord> RecordTarget<R> {
    pub fn ids<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        RecordTarget::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn pairs(pairs: Vec<RecordPair<R>>) -> Self {
        RecordTarget::Pairs(pairs)
    }
}

/// The backend transaction of one bucket
enum BucketTx<'s, B: Backend> {
    Ro(TxRoOf<'s, B>),
    Rw(TxRwOf<'s, B>),
}

impl<'s, B: Backend> BucketTx<'s, B> {
    fn as_read(&self) -> &dyn ReadOps {
        match self {
            BucketTx::Ro(tx) => tx,
            BucketTx::Rw(tx) => tx,
        }
    }

    fn as_write(&mut self) -> crate::Result<&mut dyn WriteOps> {
        match self {
            BucketTx::Rw(tx) => Ok(tx),
            BucketTx::Ro(_) => Err(Error::ReadOnlyTransaction),
        }
    }
}

/// A scoped transaction over the bucketed store.
///
/// Operations address the store of their record type `R`; the bucket
/// defaults to the store's owning bucket, and the `*_in` variants let the
/// migration engine and backup job address the `backupAccount` mirror
/// explicitly. Every operation validates that the bucket's database
/// actually holds the store.
pub struct LocalDbTransaction<'s, B: Backend> {
    router: &'s BucketRouter<B>,
    read_only: bool,
    buckets: BTreeMap<BucketName, BucketTx<'s, B>>,
}

impl<'s, B: Backend> LocalDbTransaction<'s, B> {
    pub(crate) fn start(router: &'s BucketRouter<B>, options: TransactionOptions) -> Self {
        LocalDbTransaction {
            router,
            read_only: options.read_only,
            buckets: BTreeMap::new(),
        }
    }

    /// The backend transaction of the given bucket, started on first touch
    fn bucket_tx(&mut self, bucket: BucketName) -> crate::Result<&mut BucketTx<'s, B>> {
        match self.buckets.entry(bucket) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let db = self.router.bucket(bucket)?;
                let tx = if self.read_only {
                    BucketTx::Ro(db.transaction_ro()?)
                } else {
                    BucketTx::Rw(db.transaction_rw()?)
                };
                Ok(entry.insert(tx))
            }
        }
    }

    fn store_tx(
        &mut self,
        store: StoreName,
        bucket: BucketName,
    ) -> crate::Result<&mut BucketTx<'s, B>> {
        if !bucket.holds(store) {
            return Err(Error::StoreNotInBucket { store, bucket });
        }
        self.bucket_tx(bucket)
    }

    pub fn get_records_count<R: LocalDbRecord>(&mut self) -> crate::Result<usize> {
        self.get_records_count_in::<R>(R::STORE.bucket())
    }

    pub fn get_records_count_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
    ) -> crate::Result<usize> {
        self.store_tx(R::STORE, bucket)?.as_read().count(R::STORE)
    }

    pub fn get_all_records<R: LocalDbRecord>(&mut self) -> crate::Result<Vec<RecordPair<R>>> {
        self.get_all_records_in::<R>(R::STORE.bucket())
    }

    pub fn get_all_records_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
    ) -> crate::Result<Vec<RecordPair<R>>> {
        let ops = self.store_tx(R::STORE, bucket)?.as_read();
        let mut pairs = Vec::new();
        for data in ops.get_all(R::STORE)? {
            let primary: R = codec::decode(&data)?;
            let legacy_mirror =
                ops.get_legacy(R::STORE, primary.id())?.map(|d| codec::decode(&d)).transpose()?;
            pairs.push(RecordPair {
                primary,
                legacy_mirror,
            });
        }
        Ok(pairs)
    }

    /// Records under the given ids; absent ids yield `None` at their
    /// position, not an error.
    pub fn get_records_by_ids<R: LocalDbRecord, S: AsRef<str>>(
        &mut self,
        ids: &[S],
    ) -> crate::Result<Vec<Option<RecordPair<R>>>> {
        self.get_records_by_ids_in::<R, S>(R::STORE.bucket(), ids)
    }

    pub fn get_records_by_ids_in<R: LocalDbRecord, S: AsRef<str>>(
        &mut self,
        bucket: BucketName,
        ids: &[S],
    ) -> crate::Result<Vec<Option<RecordPair<R>>>> {
        let ops = self.store_tx(R::STORE, bucket)?.as_read();
        ids.iter().map(|id| read_pair(ops, id.as_ref())).collect()
    }

    pub fn get_record_by_id<R: LocalDbRecord>(&mut self, id: &str) -> crate::Result<RecordPair<R>> {
        self.get_record_by_id_in::<R>(R::STORE.bucket(), id)
    }

    pub fn get_record_by_id_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
        id: &str,
    ) -> crate::Result<RecordPair<R>> {
        let ops = self.store_tx(R::STORE, bucket)?.as_read();
        read_pair(ops, id)?.ok_or_else(|| Error::NotFound {
            store: R::STORE,
            id: id.to_string(),
        })
    }

    /// Insert records, reporting what was added and what already existed
    pub fn add_records<R: LocalDbRecord>(
        &mut self,
        records: Vec<R>,
        options: AddOptions,
    ) -> crate::Result<AddResult> {
        self.add_records_in(R::STORE.bucket(), records, options)
    }

    pub fn add_records_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
        records: Vec<R>,
        options: AddOptions,
    ) -> crate::Result<AddResult> {
        let ops = self.store_tx(R::STORE, bucket)?.as_write()?;
        let mut result = AddResult::default();
        for record in records {
            let id = record.id().to_string();
            if ops.get(R::STORE, &id)?.is_some() {
                if options.skip_if_exists {
                    result.skipped += 1;
                    continue;
                }
                return Err(Error::Conflict {
                    store: R::STORE,
                    id,
                });
            }
            ops.put(R::STORE, &id, codec::encode(&record)?)?;
            result.added += 1;
            result.added_ids.push(id);
        }
        Ok(result)
    }

    /// Insert-or-replace by id, used by the backup job to overwrite the
    /// mirror bucket's prior contents
    pub fn save_records<R: LocalDbRecord>(&mut self, records: Vec<R>) -> crate::Result<()> {
        self.save_records_in(R::STORE.bucket(), records)
    }

    pub fn save_records_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
        records: Vec<R>,
    ) -> crate::Result<()> {
        let ops = self.store_tx(R::STORE, bucket)?.as_write()?;
        for record in records {
            ops.put(R::STORE, record.id(), codec::encode(&record)?)?;
        }
        Ok(())
    }

    /// Apply `updater` to each targeted record and persist the result. The
    /// updater is invoked exactly once per record per logical call; no
    /// adapter-level re-invocation happens.
    pub fn update_records<R: LocalDbRecord>(
        &mut self,
        target: RecordTarget<R>,
        updater: impl FnMut(R) -> crate::Result<R>,
    ) -> crate::Result<usize> {
        self.update_records_in(R::STORE.bucket(), target, updater)
    }

    pub fn update_records_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
        target: RecordTarget<R>,
        mut updater: impl FnMut(R) -> crate::Result<R>,
    ) -> crate::Result<usize> {
        let ops = self.store_tx(R::STORE, bucket)?.as_write()?;
        let mut updated = 0;
        match target {
            RecordTarget::Ids(ids) => {
                for id in ids {
                    let data = ops.get(R::STORE, &id)?.ok_or_else(|| Error::NotFound {
                        store: R::STORE,
                        id: id.clone(),
                    })?;
                    let record = updater(codec::decode(&data)?)?;
                    ops.put(R::STORE, &id, codec::encode(&record)?)?;
                    updated += 1;
                }
            }
            RecordTarget::Pairs(pairs) => {
                for pair in pairs {
                    let id = pair.primary.id().to_string();
                    let record = updater(pair.primary)?;
                    ops.put(R::STORE, &id, codec::encode(&record)?)?;
                    updated += 1;
                }
            }
        }
        Ok(updated)
    }

    pub fn remove_records<R: LocalDbRecord>(
        &mut self,
        target: RecordTarget<R>,
        options: RemoveOptions,
    ) -> crate::Result<()> {
        self.remove_records_in(R::STORE.bucket(), target, options)
    }

    pub fn remove_records_in<R: LocalDbRecord>(
        &mut self,
        bucket: BucketName,
        target: RecordTarget<R>,
        options: RemoveOptions,
    ) -> crate::Result<()> {
        let ops = self.store_tx(R::STORE, bucket)?.as_write()?;
        let ids = match target {
            RecordTarget::Ids(ids) => ids,
            RecordTarget::Pairs(pairs) => {
                pairs.into_iter().map(|p| p.primary.id().to_string()).collect()
            }
        };
        for id in ids {
            if ops.get(R::STORE, &id)?.is_none() {
                if options.ignore_not_found {
                    continue;
                }
                return Err(Error::NotFound {
                    store: R::STORE,
                    id,
                });
            }
            ops.del(R::STORE, &id)?;
        }
        Ok(())
    }

    /// Destructive wipe of one store, used only by explicit app-reset flows
    pub fn clear_records<R: LocalDbRecord>(&mut self) -> crate::Result<()> {
        let store = R::STORE;
        self.store_tx(store, store.bucket())?.as_write()?.clear(store)
    }

    /// Commit every opened bucket transaction, sequentially. A failure
    /// leaves earlier buckets committed and rolls back the rest.
    pub(crate) fn commit(self) -> crate::Result<()> {
        for (bucket, tx) in self.buckets {
            match tx {
                BucketTx::Ro(tx) => tx.close(),
                BucketTx::Rw(tx) => tx.commit().inspect_err(|e| {
                    logging::log::error!("bucket {bucket} transaction commit failed: {e}");
                })?,
            }
        }
        Ok(())
    }

    /// Abort every opened bucket transaction
    pub(crate) fn abort(self) {
        for tx in self.buckets.into_values() {
            match tx {
                BucketTx::Ro(tx) => tx.close(),
                BucketTx::Rw(tx) => tx.abort(),
            }
        }
    }
}

fn read_pair<R: LocalDbRecord>(
    ops: &dyn ReadOps,
    id: &str,
) -> crate::Result<Option<RecordPair<R>>> {
    let Some(data) = ops.get(R::STORE, id)? else {
        return Ok(None);
    };
    let primary = codec::decode(&data)?;
    let legacy_mirror = ops.get_legacy(R::STORE, id)?.map(|d| codec::decode(&d)).transpose()?;
    Ok(Some(RecordPair {
        primary,
        legacy_mirror,
    }))
}
