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

//! One-time migration of a pre-bucket single-database installation into
//! the bucketed layout.
//!
//! Runs at startup before any feature service touches the store. The legacy
//! database is detected by its well-known name and only ever read. There is
//! no migration-completed flag; instead a guard inspects the bucketed
//! database and skips the copy when user data has already landed there,
//! which is also what makes rerunning after a partial multi-bucket write
//! safe.

use std::collections::BTreeMap;

use localdb_core::backend::{ReadOps, TransactionalRo, TxRo};
use localdb_core::{Backend, DbDesc, Error};
use localdb_types::{
    consts, Account, Address, BucketName, CloudSyncItem, ConnectedSite, Context, Credential,
    Device, IndexedAccount, LocalDbRecord, SignedMessage, SignedTransaction, StoreName, Wallet,
};

use crate::agent::LocalDb;
use crate::codec;
use crate::transaction::{AddOptions, AddResult, LocalDbTransaction, TransactionOptions};

/// added/skipped tallies of one store copy
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default)]
pub struct StoreCopyCounts {
    pub added: usize,
    pub skipped: usize,
}

/// Per-bucket, per-store diagnostics of one migration run
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct MigrationReport {
    pub stores: BTreeMap<(BucketName, StoreName), StoreCopyCounts>,
}

impl MigrationReport {
    fn tally(&mut self, bucket: BucketName, store: StoreName, result: &AddResult) {
        let counts = self.stores.entry((bucket, store)).or_default();
        counts.added += result.added;
        counts.skipped += result.skipped;
    }

    pub fn added(&self) -> usize {
        self.stores.values().map(|c| c.added).sum()
    }

    pub fn skipped(&self) -> usize {
        self.stores.values().map(|c| c.skipped).sum()
    }
}

/// What a migration run did
#[derive(Eq, PartialEq, Clone, Debug)]
pub enum MigrationOutcome {
    /// No legacy database exists; nothing to do
    NoLegacyDb,
    /// The guard found user data already in the bucketed database
    AlreadyMigrated,
    Migrated(MigrationReport),
}

/// Every record of the legacy single database, read up front in one
/// read-only transaction
struct LegacySnapshot {
    cloud_sync_items: Vec<CloudSyncItem>,
    contexts: Vec<Context>,
    credentials: Vec<Credential>,
    devices: Vec<Device>,
    wallets: Vec<Wallet>,
    indexed_accounts: Vec<IndexedAccount>,
    accounts: Vec<Account>,
    addresses: Vec<Address>,
    signed_messages: Vec<SignedMessage>,
    signed_transactions: Vec<SignedTransaction>,
    connected_sites: Vec<ConnectedSite>,
}

/// Migrate the legacy database into the bucketed layout, once.
///
/// `legacy` is the recipe for the legacy database under its well-known
/// name, or `None` on platforms that never had one. Writes go through one
/// read-write transaction per destination bucket; a failure does not undo
/// previously committed buckets (see the crate docs on cross-bucket
/// atomicity).
pub fn run_legacy_migration<B: Backend>(
    db: &LocalDb<B>,
    legacy: Option<B>,
) -> crate::Result<MigrationOutcome> {
    let Some(legacy) = legacy else {
        return Ok(MigrationOutcome::NoLegacyDb);
    };
    if !legacy.exists()? {
        return Ok(MigrationOutcome::NoLegacyDb);
    }

    if bucketed_data_present(db)? {
        return Ok(MigrationOutcome::AlreadyMigrated);
    }

    let snapshot = read_legacy(legacy)?;
    let mut report = MigrationReport::default();

    // The account bucket and its backup mirror both get the full copy; the
    // mirror is deliberately seeded at migration time.
    for bucket in [BucketName::Account, BucketName::BackupAccount] {
        db.with_transaction(TransactionOptions::read_write(), |tx| {
            copy_into(tx, bucket, &mut report, snapshot.cloud_sync_items.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.contexts.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.credentials.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.devices.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.wallets.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.indexed_accounts.clone())?;
            copy_into(tx, bucket, &mut report, snapshot.accounts.clone())?;
            Ok(())
        })?;
    }

    db.with_transaction(TransactionOptions::read_write(), |tx| {
        copy_into(tx, BucketName::Address, &mut report, snapshot.addresses)
    })?;

    db.with_transaction(TransactionOptions::read_write(), |tx| {
        copy_into(tx, BucketName::Archive, &mut report, snapshot.signed_messages)?;
        copy_into(tx, BucketName::Archive, &mut report, snapshot.signed_transactions)?;
        copy_into(tx, BucketName::Archive, &mut report, snapshot.connected_sites)?;
        Ok(())
    })?;

    Ok(MigrationOutcome::Migrated(report))
}

/// Startup entry point: migration is best-effort maintenance, so failures
/// are logged here and never propagated to application startup.
pub fn run_startup_migration<B: Backend>(db: &LocalDb<B>, legacy: Option<B>) {
    match run_legacy_migration(db, legacy) {
        Ok(MigrationOutcome::NoLegacyDb) => {
            logging::log::debug!("no legacy database present, skipping migration");
        }
        Ok(MigrationOutcome::AlreadyMigrated) => {
            logging::log::info!("bucketed database already populated, skipping legacy migration");
        }
        Ok(MigrationOutcome::Migrated(report)) => {
            logging::log::info!(
                "legacy migration complete: {} records copied, {} already present",
                report.added(),
                report.skipped(),
            );
        }
        Err(err) => {
            logging::log::error!("legacy migration failed: {err}");
        }
    }
}

/// The idempotency guard: whether user data already landed in the bucketed
/// database. Compares against the bootstrap defaults of a fresh
/// installation; a missing context also counts as "populated" since a
/// fresh database always has one.
fn bucketed_data_present<B: Backend>(db: &LocalDb<B>) -> crate::Result<bool> {
    db.with_transaction(TransactionOptions::read_only(), |tx| {
        let device_count = tx.get_records_count::<Device>()?;
        let credential_count = tx.get_records_count::<Credential>()?;
        let account_count = tx.get_records_count::<Account>()?;
        let wallet_count = tx.get_records_count::<Wallet>()?;
        let fresh_context = match tx.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID) {
            Ok(pair) => pair.primary.verify_string == consts::DEFAULT_VERIFY_STRING,
            Err(Error::NotFound { .. }) => false,
            Err(err) => return Err(err),
        };
        Ok(device_count > 0
            || credential_count > 0
            || account_count > 0
            || wallet_count > consts::BOOTSTRAP_WALLET_COUNT
            || !fresh_context)
    })
}

fn read_legacy<B: Backend>(legacy: B) -> crate::Result<LegacySnapshot> {
    let db = legacy.open(DbDesc::legacy())?;
    let tx = db.transaction_ro()?;
    let snapshot = LegacySnapshot {
        cloud_sync_items: read_all(&tx)?,
        contexts: read_all(&tx)?,
        credentials: read_all(&tx)?,
        devices: read_all(&tx)?,
        wallets: read_all(&tx)?,
        indexed_accounts: read_all(&tx)?,
        accounts: read_all(&tx)?,
        addresses: read_all(&tx)?,
        signed_messages: read_all(&tx)?,
        signed_transactions: read_all(&tx)?,
        connected_sites: read_all(&tx)?,
    };
    tx.close();
    Ok(snapshot)
}

fn read_all<R: LocalDbRecord>(tx: &impl ReadOps) -> crate::Result<Vec<R>> {
    tx.get_all(R::STORE)?.iter().map(|data| codec::decode(data)).collect()
}

fn copy_into<B: Backend, R: LocalDbRecord>(
    tx: &mut LocalDbTransaction<'_, B>,
    bucket: BucketName,
    report: &mut MigrationReport,
    records: Vec<R>,
) -> crate::Result<()> {
    let result = tx.add_records_in(
        bucket,
        records,
        AddOptions {
            skip_if_exists: true,
        },
    )?;
    report.tally(bucket, R::STORE, &result);
    Ok(())
}
