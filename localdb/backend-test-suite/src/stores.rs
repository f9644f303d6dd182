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

//! Tests exercising the interaction of multiple stores in one database

use crate::prelude::*;

fn stores_are_isolated<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Same id in two stores holds two independent values
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Wallet, "shared-id", val("wallet")).unwrap();
    dbtx.put(StoreName::Account, "shared-id", val("account")).unwrap();
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "shared-id"), Ok(Some(val("wallet"))));
    assert_eq!(dbtx.get(StoreName::Account, "shared-id"), Ok(Some(val("account"))));
    dbtx.close();

    // Deleting from one store leaves the other untouched
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.del(StoreName::Wallet, "shared-id").unwrap();
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "shared-id"), Ok(None));
    assert_eq!(dbtx.get(StoreName::Account, "shared-id"), Ok(Some(val("account"))));
}

fn get_all_ordered_by_id<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Insert out of order, read back ordered by id
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::IndexedAccount, "hd-1--2", val("2")).unwrap();
    dbtx.put(StoreName::IndexedAccount, "hd-1--0", val("0")).unwrap();
    dbtx.put(StoreName::IndexedAccount, "hd-1--1", val("1")).unwrap();
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    let all = dbtx.get_all(StoreName::IndexedAccount).unwrap();
    assert_eq!(all, vec![val("0"), val("1"), val("2")]);
}

fn count_tracks_mutations<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.count(StoreName::Credential), Ok(0));
    dbtx.close();

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Credential, "hd-1", val("c1")).unwrap();
    dbtx.put(StoreName::Credential, "hd-2", val("c2")).unwrap();
    assert_eq!(dbtx.count(StoreName::Credential), Ok(2));
    // Overwriting an existing id does not change the count
    dbtx.put(StoreName::Credential, "hd-1", val("c1b")).unwrap();
    assert_eq!(dbtx.count(StoreName::Credential), Ok(2));
    dbtx.del(StoreName::Credential, "hd-2").unwrap();
    assert_eq!(dbtx.count(StoreName::Credential), Ok(1));
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.count(StoreName::Credential), Ok(1));
}

fn clear_then_repopulate<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Account, "acc-1", val("a")).unwrap();
    dbtx.put(StoreName::Account, "acc-2", val("b")).unwrap();
    dbtx.put(StoreName::Wallet, "hd-1", val("w")).unwrap();
    dbtx.commit().expect("commit to succeed");

    // Clear one store and repopulate it within the same transaction
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.clear(StoreName::Account).unwrap();
    assert_eq!(dbtx.count(StoreName::Account), Ok(0));
    dbtx.put(StoreName::Account, "acc-3", val("c")).unwrap();
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Account, "acc-1"), Ok(None));
    assert_eq!(dbtx.get(StoreName::Account, "acc-3"), Ok(Some(val("c"))));
    // Other stores are untouched
    assert_eq!(dbtx.get(StoreName::Wallet, "hd-1"), Ok(Some(val("w"))));
}

fn clear_aborted_keeps_entries<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Account, "acc-1", val("a")).unwrap();
    dbtx.commit().expect("commit to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.clear(StoreName::Account).unwrap();
    dbtx.abort();

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Account, "acc-1"), Ok(Some(val("a"))));
}

fn commits_accumulate<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    for i in 0..5 {
        let mut dbtx = store.transaction_rw().unwrap();
        dbtx.put(StoreName::Wallet, &format!("hd-{i}"), val(&i.to_string())).unwrap();
        dbtx.commit().expect("commit to succeed");
    }

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.count(StoreName::Wallet), Ok(5));
    for i in 0..5 {
        assert_eq!(
            dbtx.get(StoreName::Wallet, &format!("hd-{i}")),
            Ok(Some(val(&i.to_string())))
        );
    }
}

tests![
    clear_aborted_keeps_entries,
    clear_then_repopulate,
    commits_accumulate,
    count_tracks_mutations,
    get_all_ordered_by_id,
    stores_are_isolated,
];
