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

use super::*;
use localdb_core::backend::{Backend, ReadOps, TransactionalRo, TransactionalRw, TxRw, WriteOps};
use localdb_types::BucketName;

fn open_account_db() -> InMemoryImpl {
    InMemory::new()
        .open(DbDesc::for_bucket(BucketName::Account))
        .expect("open to succeed")
}

#[test]
fn clones_share_physical_state() {
    let handle = InMemory::new();
    let db = handle.clone().open(DbDesc::for_bucket(BucketName::Account)).unwrap();

    let mut tx = db.transaction_rw().unwrap();
    tx.put(StoreName::Wallet, "hd-1", b"{}".to_vec()).unwrap();
    tx.commit().unwrap();

    assert!(handle.exists().unwrap());

    let db2 = handle.open(DbDesc::for_bucket(BucketName::Account)).unwrap();
    let tx = db2.transaction_ro().unwrap();
    assert_eq!(tx.get(StoreName::Wallet, "hd-1").unwrap(), Some(b"{}".to_vec()));
}

#[test]
fn fresh_database_does_not_exist() {
    assert!(!InMemory::new().exists().unwrap());
}

#[test]
fn clear_inside_transaction_hides_base_records() {
    let db = open_account_db();

    let mut tx = db.transaction_rw().unwrap();
    tx.put(StoreName::Account, "acc-1", b"a".to_vec()).unwrap();
    tx.put(StoreName::Account, "acc-2", b"b".to_vec()).unwrap();
    tx.commit().unwrap();

    let mut tx = db.transaction_rw().unwrap();
    tx.clear(StoreName::Account).unwrap();
    assert_eq!(tx.count(StoreName::Account).unwrap(), 0);
    tx.put(StoreName::Account, "acc-3", b"c".to_vec()).unwrap();
    assert_eq!(tx.count(StoreName::Account).unwrap(), 1);
    tx.commit().unwrap();

    let tx = db.transaction_ro().unwrap();
    assert_eq!(tx.count(StoreName::Account).unwrap(), 1);
    assert_eq!(tx.get(StoreName::Account, "acc-1").unwrap(), None);
}

#[test]
fn dropped_transaction_discards_delta() {
    let db = open_account_db();

    let mut tx = db.transaction_rw().unwrap();
    tx.put(StoreName::Device, "dev-1", b"x".to_vec()).unwrap();
    drop(tx);

    let tx = db.transaction_ro().unwrap();
    assert_eq!(tx.get(StoreName::Device, "dev-1").unwrap(), None);
}
