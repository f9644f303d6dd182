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

//! Daily snapshot of the primary bucket into its backup mirror.

use localdb_core::Backend;
use localdb_types::{
    consts, Account, BucketName, CloudSyncItem, Context, Credential, Device, IndexedAccount,
    LocalDbRecord, Wallet,
};

use crate::agent::LocalDb;
use crate::transaction::{LocalDbTransaction, RecordPair, RecordTarget, TransactionOptions};

/// Copy the mutable entities of the `account` bucket into `backupAccount`,
/// at most once per rolling 24-hour window.
///
/// `now_ms` is the caller's clock in unix millis; the gate compares it to
/// the timestamp stored on the context record. A failed copy is logged and
/// swallowed, and the timestamp is advanced regardless, so a persistently
/// failing backup does not retry on every call.
pub fn backup_daily<B: Backend>(db: &LocalDb<B>, now_ms: i64) -> crate::Result<()> {
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID)?;
    if let Some(last) = context.last_db_backup_time {
        if now_ms.saturating_sub(last) < consts::DB_BACKUP_INTERVAL_MS {
            return Ok(());
        }
    }

    logging::log::info!("starting daily database backup");
    if let Err(err) = copy_account_to_backup(db) {
        logging::log::warn!("database backup copy failed: {err}");
    }

    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.update_records(
            RecordTarget::ids([consts::DB_MAIN_CONTEXT_ID]),
            |mut context: Context| {
                context.last_db_backup_time = Some(now_ms);
                Ok(context)
            },
        )?;
        Ok(())
    })
}

/// Scheduler entry point: the backup is best-effort maintenance, so
/// failures reading or updating the context record are logged here and
/// never propagated to the caller.
pub fn run_scheduled_backup<B: Backend>(db: &LocalDb<B>, now_ms: i64) {
    if let Err(err) = backup_daily(db, now_ms) {
        logging::log::error!("daily database backup failed: {err}");
    }
}

/// One destination-scoped transaction overwriting the mirror's contents by
/// id. Records removed from the primary since the last run linger in the
/// mirror until overwritten; the mirror is a recovery snapshot, not a
/// replica.
fn copy_account_to_backup<B: Backend>(db: &LocalDb<B>) -> crate::Result<()> {
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        mirror::<B, CloudSyncItem>(tx)?;
        mirror::<B, Context>(tx)?;
        mirror::<B, Credential>(tx)?;
        mirror::<B, Device>(tx)?;
        mirror::<B, Wallet>(tx)?;
        mirror::<B, IndexedAccount>(tx)?;
        mirror::<B, Account>(tx)?;
        Ok(())
    })
}

fn mirror<B: Backend, R: LocalDbRecord>(tx: &mut LocalDbTransaction<'_, B>) -> crate::Result<()> {
    let records: Vec<R> =
        tx.get_all_records::<R>()?.into_iter().map(|RecordPair { primary, .. }| primary).collect();
    tx.save_records_in(BucketName::BackupAccount, records)
}
