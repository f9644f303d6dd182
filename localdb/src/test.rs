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

use std::collections::BTreeMap;

use rstest::rstest;

use localdb_core::backend::{TransactionalRw, TxRw, WriteOps};
use localdb_inmemory::InMemory;
use localdb_sqlite::Sqlite;
use localdb_types::{
    consts, Account, AccountKind, Address, BucketName, Context, LocalDbRecord, SignedMessage,
    StoreName, Wallet, WalletType,
};

use super::*;
use crate::codec;

fn inmemory_db() -> LocalDb<InMemory> {
    LocalDb::new(|_| InMemory::new())
}

struct SqliteCtx {
    _dir: tempfile::TempDir,
    db: LocalDb<Sqlite>,
}

fn sqlite_db() -> SqliteCtx {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().to_path_buf();
    let db = LocalDb::new(move |bucket| {
        Sqlite::new(path.join(format!("{}-{bucket}.sqlite", consts::BUCKET_DB_NAME_PREFIX)))
    });
    SqliteCtx { _dir: dir, db }
}

fn sample_wallet(id: &str) -> Wallet {
    Wallet {
        id: id.into(),
        name: id.into(),
        wallet_type: WalletType::Hd,
        backuped: false,
        accounts: Vec::new(),
        next_ids: BTreeMap::new(),
        associated_device: None,
        hidden_wallets: None,
        passphrase_state: None,
        wallet_no: 10,
        hash: None,
        xfp: None,
        deprecated: None,
    }
}

fn sample_account(id: &str) -> Account {
    Account {
        id: id.into(),
        name: "Account #1".into(),
        path: "m/44'/60'/0'/0/0".into(),
        path_index: Some(0),
        rel_path: None,
        coin_type: "60".into(),
        chain_impl: "evm".into(),
        indexed_account_id: None,
        networks: None,
        create_at_network: None,
        template: None,
        kind: AccountKind::Simple {
            pub_key: "02abc".into(),
            address: "0xdead".into(),
        },
    }
}

fn sample_address(n: usize) -> Address {
    Address {
        id: Address::id_for_network("evm--1", &format!("0x{n:040x}")),
        wallets: BTreeMap::from([("hd-1".to_string(), format!("acc-{n}"))]),
    }
}

fn sample_signed_message(id: &str) -> SignedMessage {
    SignedMessage {
        id: id.into(),
        network_id: "evm--1".into(),
        address: "0xdead".into(),
        message: "hello".into(),
        content_type: "text".into(),
        title: None,
        created_at: 1_700_000_000_000,
    }
}

fn count_in<R: LocalDbRecord, B: Backend>(db: &LocalDb<B>, bucket: BucketName) -> usize {
    db.with_transaction(TransactionOptions::read_only(), |tx| {
        tx.get_records_count_in::<R>(bucket)
    })
    .unwrap()
}

fn add_wallet<B: Backend>(db: &LocalDb<B>, id: &str) {
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.add_records(vec![sample_wallet(id)], AddOptions::default())?;
        Ok(())
    })
    .unwrap();
}

// Properties, generic over the backend. The `backend_tests!` invocation at
// the bottom instantiates each one for both backends.

fn round_trip<B: Backend>(db: &LocalDb<B>) {
    let wallet = sample_wallet("hd-1");
    let account = sample_account("acc-1");
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.add_records(vec![wallet.clone()], AddOptions::default())?;
        tx.add_records(vec![account.clone()], AddOptions::default())?;
        Ok(())
    })
    .unwrap();

    assert_eq!(db.get_record_by_id::<Wallet>("hd-1").unwrap(), wallet);
    assert_eq!(db.get_record_by_id::<Account>("acc-1").unwrap(), account);
    assert_eq!(
        db.get_record_by_id::<Wallet>("hd-2").unwrap_err(),
        Error::NotFound {
            store: StoreName::Wallet,
            id: "hd-2".into(),
        },
    );
}

fn add_duplicate_conflicts<B: Backend>(db: &LocalDb<B>) {
    add_wallet(db, "hd-1");

    let err = db
        .with_transaction(TransactionOptions::read_write(), |tx| {
            tx.add_records(vec![sample_wallet("hd-1")], AddOptions::default())?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::Conflict {
            store: StoreName::Wallet,
            id: "hd-1".into(),
        },
    );
}

fn add_skip_if_exists_counts_skipped<B: Backend>(db: &LocalDb<B>) {
    let original = sample_wallet("hd-1");
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.add_records(vec![original.clone()], AddOptions::default())?;
        Ok(())
    })
    .unwrap();

    // Re-adding under a different payload skips and leaves the record as is
    let mut other = sample_wallet("hd-1");
    other.name = "other".into();
    let result = db
        .with_transaction(TransactionOptions::read_write(), |tx| {
            tx.add_records(
                vec![other, sample_wallet("hd-2")],
                AddOptions {
                    skip_if_exists: true,
                },
            )
        })
        .unwrap();

    assert_eq!(result.added, 1);
    assert_eq!(result.added_ids, vec!["hd-2".to_string()]);
    assert_eq!(result.skipped, 1);
    assert_eq!(db.get_record_by_id::<Wallet>("hd-1").unwrap(), original);
}

fn read_only_transaction_rejects_writes<B: Backend>(db: &LocalDb<B>) {
    let err = db
        .with_transaction(TransactionOptions::read_only(), |tx| {
            tx.add_records(vec![sample_wallet("hd-1")], AddOptions::default())?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err, Error::ReadOnlyTransaction);
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), 0);
}

fn bucket_routing_is_validated<B: Backend>(db: &LocalDb<B>) {
    let err = db
        .with_transaction(TransactionOptions::read_write(), |tx| {
            tx.add_records_in(
                BucketName::Address,
                vec![sample_wallet("hd-1")],
                AddOptions::default(),
            )?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::StoreNotInBucket {
            store: StoreName::Wallet,
            bucket: BucketName::Address,
        },
    );
}

fn get_by_ids_is_positional<B: Backend>(db: &LocalDb<B>) {
    add_wallet(db, "hd-1");
    add_wallet(db, "hd-3");

    let records = db.get_records_by_ids::<Wallet, _>(&["hd-1", "hd-2", "hd-3"]).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].as_ref().map(|w| w.id.as_str()), Some("hd-1"));
    assert_eq!(records[1], None);
    assert_eq!(records[2].as_ref().map(|w| w.id.as_str()), Some("hd-3"));
}

fn update_applies_updater_exactly_once<B: Backend>(db: &LocalDb<B>) {
    db.ensure_bootstrap().unwrap();
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.update_records(
            RecordTarget::ids([consts::DB_MAIN_CONTEXT_ID]),
            |mut context: Context| {
                context.next_hd = 5;
                Ok(context)
            },
        )?;
        Ok(())
    })
    .unwrap();

    let mut calls = 0;
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.update_records(
            RecordTarget::ids([consts::DB_MAIN_CONTEXT_ID]),
            |mut context: Context| {
                calls += 1;
                context.next_hd += 1;
                Ok(context)
            },
        )?;
        Ok(())
    })
    .unwrap();

    assert_eq!(calls, 1);
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.next_hd, 6);
}

fn update_and_remove_through_read_pairs<B: Backend>(db: &LocalDb<B>) {
    add_wallet(db, "hd-1");
    add_wallet(db, "hd-2");

    // Update through pairs obtained from a transactional read
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        let pairs = tx.get_all_records::<Wallet>()?;
        assert!(pairs.iter().all(|pair| pair.legacy_mirror.is_none()));
        let updated = tx.update_records(RecordTarget::pairs(pairs), |mut wallet: Wallet| {
            wallet.backuped = true;
            Ok(wallet)
        })?;
        assert_eq!(updated, 2);
        Ok(())
    })
    .unwrap();
    let wallets = db.get_all_records::<Wallet>(RecordsQuery::default()).unwrap();
    assert!(wallets.iter().all(|wallet| wallet.backuped));

    // Remove through a pair from a single-record read
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        let pair = tx.get_record_by_id::<Wallet>("hd-1")?;
        tx.remove_records(RecordTarget::pairs(vec![pair]), RemoveOptions::default())
    })
    .unwrap();
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), 1);
    assert_eq!(db.get_record_by_id::<Wallet>("hd-2").unwrap().id, "hd-2");
}

fn remove_records_checks_existence<B: Backend>(db: &LocalDb<B>) {
    add_wallet(db, "hd-1");

    let err = db
        .with_transaction(TransactionOptions::read_write(), |tx| {
            tx.remove_records(
                RecordTarget::<Wallet>::ids(["hd-1", "hd-2"]),
                RemoveOptions::default(),
            )
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::NotFound {
            store: StoreName::Wallet,
            id: "hd-2".into(),
        },
    );
    // The failed transaction rolled back, hd-1 is still there
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), 1);

    db.with_transaction(TransactionOptions::read_write(), |tx| {
        tx.remove_records(
            RecordTarget::<Wallet>::ids(["hd-1", "hd-2"]),
            RemoveOptions {
                ignore_not_found: true,
            },
        )
    })
    .unwrap();
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), 0);
}

fn bucket_isolation<B: Backend>(db: &LocalDb<B>) {
    db.ensure_bootstrap().unwrap();
    let wallets_before = db.get_records_count::<Wallet>().unwrap();
    let messages_before = db.get_records_count::<SignedMessage>().unwrap();

    db.with_transaction(TransactionOptions::read_write(), |tx| {
        let addresses = (0..10).map(sample_address).collect();
        tx.add_records(addresses, AddOptions::default())?;
        Ok(())
    })
    .unwrap();

    assert_eq!(db.get_records_count::<Address>().unwrap(), 10);
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), wallets_before);
    assert_eq!(db.get_records_count::<SignedMessage>().unwrap(), messages_before);
}

fn clear_records_wipes_one_store<B: Backend>(db: &LocalDb<B>) {
    db.ensure_bootstrap().unwrap();
    add_wallet(db, "hd-1");

    db.clear_records::<Wallet>().unwrap();

    assert_eq!(db.get_records_count::<Wallet>().unwrap(), 0);
    // Other stores of the same bucket are untouched
    assert_eq!(db.get_records_count::<Context>().unwrap(), 1);
}

fn ensure_bootstrap_is_idempotent<B: Backend>(db: &LocalDb<B>) {
    db.ensure_bootstrap().unwrap();
    db.ensure_bootstrap().unwrap();

    assert_eq!(
        db.get_records_count::<Wallet>().unwrap(),
        consts::BOOTSTRAP_WALLET_COUNT,
    );
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.verify_string, consts::DEFAULT_VERIFY_STRING);
}

fn backup_cadence<B: Backend>(db: &LocalDb<B>) {
    db.ensure_bootstrap().unwrap();
    add_wallet(db, "hd-1");
    let bootstrapped = consts::BOOTSTRAP_WALLET_COUNT + 1;
    let t0 = 1_700_000_000_000_i64;

    // First run copies the primary bucket into the mirror
    backup_daily(db, t0).unwrap();
    assert_eq!(count_in::<Wallet, B>(db, BucketName::BackupAccount), bootstrapped);
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.last_db_backup_time, Some(t0));

    // A second run within the window copies nothing and leaves the
    // timestamp unchanged
    add_wallet(db, "hw-1");
    backup_daily(db, t0 + 60 * 60 * 1000).unwrap();
    assert_eq!(count_in::<Wallet, B>(db, BucketName::BackupAccount), bootstrapped);
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.last_db_backup_time, Some(t0));

    // Once the window has passed the mirror is refreshed
    let t1 = t0 + consts::DB_BACKUP_INTERVAL_MS;
    backup_daily(db, t1).unwrap();
    assert_eq!(count_in::<Wallet, B>(db, BucketName::BackupAccount), bootstrapped + 1);
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.last_db_backup_time, Some(t1));
}

// Legacy-migration properties; these also need a recipe for the legacy
// database, so the per-backend instantiation is explicit below.

fn seed_example_legacy<B: Backend>(recipe: B) {
    let db = recipe.open(DbDesc::legacy()).unwrap();
    let mut tx = db.transaction_rw().unwrap();

    let mut wallet = sample_wallet("hd-1");
    wallet.accounts = vec!["acc-1".into()];
    put_record(&mut tx, &wallet);
    put_record(&mut tx, &sample_account("acc-1"));
    let mut context = Context::bootstrap();
    context.verify_string = "LEGACY".into();
    put_record(&mut tx, &context);
    put_record(&mut tx, &sample_address(1));
    put_record(&mut tx, &sample_signed_message("msg-1"));

    tx.commit().unwrap();
}

fn put_record<R: LocalDbRecord>(tx: &mut impl WriteOps, record: &R) {
    tx.put(R::STORE, record.id(), codec::encode(record).unwrap()).unwrap();
}

fn migration_example_scenario<B: Backend>(db: &LocalDb<B>, make_legacy: &dyn Fn() -> B) {
    seed_example_legacy(make_legacy());
    db.ensure_bootstrap().unwrap();

    let outcome = run_legacy_migration(db, Some(make_legacy())).unwrap();
    let report = match outcome {
        MigrationOutcome::Migrated(report) => report,
        other => panic!("expected a migration to run, got {other:?}"),
    };

    // The legacy wallet and account landed in the primary bucket and its
    // backup mirror
    assert_eq!(db.get_record_by_id::<Wallet>("hd-1").unwrap().accounts, ["acc-1"]);
    assert_eq!(db.get_record_by_id::<Account>("acc-1").unwrap().id, "acc-1");
    assert_eq!(
        db.get_records_count::<Wallet>().unwrap(),
        consts::BOOTSTRAP_WALLET_COUNT + 1,
    );
    assert_eq!(count_in::<Wallet, B>(db, BucketName::BackupAccount), 1);
    assert_eq!(count_in::<Account, B>(db, BucketName::BackupAccount), 1);

    // Address and archive buckets each got their stores
    assert_eq!(db.get_records_count::<Address>().unwrap(), 1);
    assert_eq!(db.get_records_count::<SignedMessage>().unwrap(), 1);

    // The bootstrap context wins over the legacy one
    let context = db.get_record_by_id::<Context>(consts::DB_MAIN_CONTEXT_ID).unwrap();
    assert_eq!(context.verify_string, consts::DEFAULT_VERIFY_STRING);
    let account_context = report.stores[&(BucketName::Account, StoreName::Context)];
    assert_eq!((account_context.added, account_context.skipped), (0, 1));

    // A second run trips the guard and copies nothing
    let outcome = run_legacy_migration(db, Some(make_legacy())).unwrap();
    assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
    assert_eq!(
        db.get_records_count::<Wallet>().unwrap(),
        consts::BOOTSTRAP_WALLET_COUNT + 1,
    );
    assert_eq!(count_in::<Wallet, B>(db, BucketName::BackupAccount), 1);
}

fn migration_without_legacy_is_noop<B: Backend>(db: &LocalDb<B>, make_legacy: &dyn Fn() -> B) {
    db.ensure_bootstrap().unwrap();

    assert_eq!(run_legacy_migration(db, None).unwrap(), MigrationOutcome::NoLegacyDb);
    // A legacy database that was never created does not exist either
    assert_eq!(
        run_legacy_migration(db, Some(make_legacy())).unwrap(),
        MigrationOutcome::NoLegacyDb,
    );
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), consts::BOOTSTRAP_WALLET_COUNT);
}

fn migration_guard_trips_on_user_data<B: Backend>(db: &LocalDb<B>, make_legacy: &dyn Fn() -> B) {
    seed_example_legacy(make_legacy());
    db.ensure_bootstrap().unwrap();
    // One wallet beyond the bootstrap defaults means user data is present
    add_wallet(db, "hw-9");

    let outcome = run_legacy_migration(db, Some(make_legacy())).unwrap();
    assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
    assert_eq!(db.get_records_count::<Account>().unwrap(), 0);
}

fn migration_guard_trips_without_bootstrap<B: Backend>(db: &LocalDb<B>, make_legacy: &dyn Fn() -> B) {
    seed_example_legacy(make_legacy());

    // A database that was never bootstrapped has no context record, which
    // counts as "not fresh": nothing is copied
    let outcome = run_legacy_migration(db, Some(make_legacy())).unwrap();
    assert_eq!(outcome, MigrationOutcome::AlreadyMigrated);
}

macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        mod inmemory_backend {
            use super::*;
            $(
                #[test]
                fn $name() {
                    super::$name(&inmemory_db());
                }
            )*
        }
        mod sqlite_backend {
            use super::*;
            $(
                #[test]
                fn $name() {
                    let ctx = sqlite_db();
                    super::$name(&ctx.db);
                }
            )*
        }
    };
}

backend_tests![
    add_duplicate_conflicts,
    add_skip_if_exists_counts_skipped,
    backup_cadence,
    bucket_isolation,
    bucket_routing_is_validated,
    clear_records_wipes_one_store,
    ensure_bootstrap_is_idempotent,
    get_by_ids_is_positional,
    read_only_transaction_rejects_writes,
    remove_records_checks_existence,
    round_trip,
    update_and_remove_through_read_pairs,
    update_applies_updater_exactly_once,
];

macro_rules! migration_tests {
    ($($name:ident),* $(,)?) => {
        mod inmemory_migration {
            use super::*;
            $(
                #[test]
                fn $name() {
                    let db = inmemory_db();
                    // Clones of the handle share state, standing in for the
                    // on-disk legacy database
                    let legacy = InMemory::new();
                    super::$name(&db, &move || legacy.clone());
                }
            )*
        }
        mod sqlite_migration {
            use super::*;
            $(
                #[test]
                fn $name() {
                    let ctx = sqlite_db();
                    let legacy_dir = tempfile::TempDir::new().unwrap();
                    let legacy_file =
                        legacy_dir.path().join(format!("{}.sqlite", consts::LEGACY_DB_NAME));
                    super::$name(&ctx.db, &move || Sqlite::new(legacy_file.clone()));
                }
            )*
        }
    };
}

migration_tests![
    migration_example_scenario,
    migration_guard_trips_on_user_data,
    migration_guard_trips_without_bootstrap,
    migration_without_legacy_is_noop,
];

#[rstest]
#[case(RecordsQuery::default(), &["a-0", "a-1", "a-2", "a-3", "a-4"])]
#[case(RecordsQuery { limit: Some(2), offset: None }, &["a-0", "a-1"])]
#[case(RecordsQuery { limit: Some(2), offset: Some(3) }, &["a-3", "a-4"])]
#[case(RecordsQuery { limit: None, offset: Some(4) }, &["a-4"])]
#[case(RecordsQuery { limit: Some(3), offset: Some(10) }, &[])]
fn all_records_query_pagination(#[case] query: RecordsQuery, #[case] expected: &[&str]) {
    let db = inmemory_db();
    db.with_transaction(TransactionOptions::read_write(), |tx| {
        let wallets = (0..5).map(|i| sample_wallet(&format!("a-{i}"))).collect();
        tx.add_records(wallets, AddOptions::default())?;
        Ok(())
    })
    .unwrap();

    let ids: Vec<String> =
        db.get_all_records::<Wallet>(query).unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn migration_failure_does_not_block_startup() {
    let db = inmemory_db();
    db.ensure_bootstrap().unwrap();

    // A legacy database holding an undecodable record makes the copy fail;
    // the startup wrapper logs it and returns normally
    let legacy = InMemory::new();
    {
        let legacy_db = legacy.clone().open(DbDesc::legacy()).unwrap();
        let mut tx = legacy_db.transaction_rw().unwrap();
        tx.put(StoreName::Wallet, "hd-1", b"garbage".to_vec()).unwrap();
        tx.commit().unwrap();
    }

    run_startup_migration(&db, Some(legacy));
    assert_eq!(db.get_records_count::<Wallet>().unwrap(), consts::BOOTSTRAP_WALLET_COUNT);
}

#[test]
fn backup_failure_does_not_reach_the_scheduler() {
    // Without a context record the backup gate cannot even be read; the
    // scheduler wrapper logs the failure and returns normally
    let db = inmemory_db();
    run_scheduled_backup(&db, 1_700_000_000_000);
    assert_eq!(count_in::<Wallet, _>(&db, BucketName::BackupAccount), 0);

    // Once bootstrapped the wrapper performs the regular backup
    db.ensure_bootstrap().unwrap();
    run_scheduled_backup(&db, 1_700_000_000_000);
    assert_eq!(
        count_in::<Wallet, _>(&db, BucketName::BackupAccount),
        consts::BOOTSTRAP_WALLET_COUNT,
    );
}
