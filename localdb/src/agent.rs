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

//! The record store agent: the backend-agnostic transactional CRUD
//! contract every feature service programs against.

use localdb_core::Backend;
use localdb_types::{consts, BucketName, Context, LocalDbRecord, Wallet, WalletType};

use crate::router::BucketRouter;
use crate::transaction::{AddOptions, LocalDbTransaction, TransactionOptions};

/// Pagination of a whole-store read
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct RecordsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Record store over a bucketed storage backend, parametrized over the
/// backend B. Constructed explicitly at the process entry point and passed
/// to every component that needs storage access.
pub struct LocalDb<B: Backend> {
    router: BucketRouter<B>,
}

impl<B: Backend> LocalDb<B> {
    /// New store; `factory` supplies the physical database recipe of each
    /// bucket, opened lazily on first use
    pub fn new(factory: impl Fn(BucketName) -> B + Send + Sync + 'static) -> Self {
        LocalDb {
            router: BucketRouter::new(factory),
        }
    }

    /// Run `task` inside a scoped transaction. Commits on normal return,
    /// aborts on error; the transaction resource is released on every exit
    /// path.
    pub fn with_transaction<'a, T>(
        &'a self,
        options: TransactionOptions,
        task: impl FnOnce(&mut LocalDbTransaction<'a, B>) -> crate::Result<T>,
    ) -> crate::Result<T> {
        let mut tx = LocalDbTransaction::start(&self.router, options);
        match task(&mut tx) {
            Ok(val) => {
                tx.commit()?;
                Ok(val)
            }
            Err(err) => {
                tx.abort();
                Err(err)
            }
        }
    }

    pub fn get_records_count<R: LocalDbRecord>(&self) -> crate::Result<usize> {
        self.with_transaction(TransactionOptions::read_only(), |tx| {
            tx.get_records_count::<R>()
        })
    }

    pub fn get_all_records<R: LocalDbRecord>(&self, query: RecordsQuery) -> crate::Result<Vec<R>> {
        self.with_transaction(TransactionOptions::read_only(), |tx| {
            let records = tx.get_all_records::<R>()?.into_iter().map(|pair| pair.primary);
            let records = records.skip(query.offset.unwrap_or(0));
            Ok(match query.limit {
                Some(limit) => records.take(limit).collect(),
                None => records.collect(),
            })
        })
    }

    /// Records under the given ids; absent ids yield `None` at their
    /// position, not an error.
    pub fn get_records_by_ids<R: LocalDbRecord, S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> crate::Result<Vec<Option<R>>> {
        self.with_transaction(TransactionOptions::read_only(), |tx| {
            let pairs = tx.get_records_by_ids::<R, S>(ids)?;
            Ok(pairs.into_iter().map(|pair| pair.map(|p| p.primary)).collect())
        })
    }

    pub fn get_record_by_id<R: LocalDbRecord>(&self, id: &str) -> crate::Result<R> {
        self.with_transaction(TransactionOptions::read_only(), |tx| {
            tx.get_record_by_id::<R>(id).map(|pair| pair.primary)
        })
    }

    /// Destructive wipe of one store, used only by explicit app-reset flows
    pub fn clear_records<R: LocalDbRecord>(&self) -> crate::Result<()> {
        self.with_transaction(TransactionOptions::read_write(), |tx| {
            tx.clear_records::<R>()
        })
    }

    /// Initialize a fresh database: the context record plus the three
    /// singleton wallets. A no-op when they already exist. These defaults
    /// are exactly what the legacy-migration guard checks against.
    pub fn ensure_bootstrap(&self) -> crate::Result<()> {
        let skip = AddOptions {
            skip_if_exists: true,
        };
        self.with_transaction(TransactionOptions::read_write(), |tx| {
            let result = tx.add_records(vec![Context::bootstrap()], skip)?;
            if result.added > 0 {
                logging::log::info!("bootstrapped a fresh bucketed database");
            }
            tx.add_records(
                vec![
                    Wallet::new_singleton(WalletType::Imported, 1),
                    Wallet::new_singleton(WalletType::Watching, 2),
                    Wallet::new_singleton(WalletType::External, 3),
                ],
                skip,
            )?;
            Ok(())
        })
    }
}

// Compile-time checks of the bootstrap constants the migration guard
// relies on
const _: () = assert!(consts::BOOTSTRAP_WALLET_COUNT == 3);
