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

//! Some basic tests

use crate::prelude::*;

fn put_and_commit<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Create a transaction, modify storage and commit
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Wallet, "hd-1", val("world")).unwrap();
    dbtx.commit().expect("commit to succeed");

    // Check the modification is visible
    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "hd-1"), Ok(Some(val("world"))));
    dbtx.close();
}

fn put_and_abort<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Create a transaction, modify storage and abort transaction
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Wallet, "hd-1", val("world")).unwrap();
    dbtx.abort();

    // Check the modification did not happen
    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "hd-1"), Ok(None));
    dbtx.close();
}

fn put_and_drop<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Dropping the transaction without committing behaves like an abort
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Wallet, "hd-1", val("world")).unwrap();
    drop(dbtx);

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "hd-1"), Ok(None));
    dbtx.close();
}

fn put_two_under_different_ids<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    // Create a transaction, modify storage and commit
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Account, "a", val("0")).unwrap();
    dbtx.put(StoreName::Account, "b", val("1")).unwrap();
    dbtx.commit().expect("commit to succeed");

    // Check the values are in place
    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Account, "a"), Ok(Some(val("0"))));
    assert_eq!(dbtx.get(StoreName::Account, "b"), Ok(Some(val("1"))));
    dbtx.close();

    // Create a transaction, modify storage and abort
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Account, "a", val("00")).unwrap();
    dbtx.put(StoreName::Account, "b", val("11")).unwrap();
    dbtx.abort();

    // Check the modification did not happen
    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Account, "a"), Ok(Some(val("0"))));
    assert_eq!(dbtx.get(StoreName::Account, "b"), Ok(Some(val("1"))));
    dbtx.close();
}

fn put_twice_then_commit_read_last<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Context, "mainContext", val("a")).unwrap();
    assert_eq!(dbtx.get(StoreName::Context, "mainContext"), Ok(Some(val("a"))));
    dbtx.put(StoreName::Context, "mainContext", val("b")).unwrap();
    assert_eq!(dbtx.get(StoreName::Context, "mainContext"), Ok(Some(val("b"))));
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Context, "mainContext"), Ok(Some(val("b"))));
}

fn del_then_commit<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Device, "dev-1", val("x")).unwrap();
    dbtx.put(StoreName::Device, "dev-2", val("y")).unwrap();
    dbtx.commit().expect("commit to succeed");

    // Delete one entry, the deletion is visible within the transaction
    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.del(StoreName::Device, "dev-1").unwrap();
    assert_eq!(dbtx.get(StoreName::Device, "dev-1"), Ok(None));
    assert_eq!(dbtx.get(StoreName::Device, "dev-2"), Ok(Some(val("y"))));
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Device, "dev-1"), Ok(None));
    assert_eq!(dbtx.get(StoreName::Device, "dev-2"), Ok(Some(val("y"))));
}

fn del_aborted_keeps_entry<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.put(StoreName::Device, "dev-1", val("x")).unwrap();
    dbtx.commit().expect("commit to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.del(StoreName::Device, "dev-1").unwrap();
    dbtx.abort();

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Device, "dev-1"), Ok(Some(val("x"))));
}

fn del_missing_id_is_noop<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let mut dbtx = store.transaction_rw().unwrap();
    dbtx.del(StoreName::Device, "no-such-id").unwrap();
    dbtx.commit().expect("commit to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.count(StoreName::Device), Ok(0));
}

fn get_missing_id<B: Backend, F: BackendFn<B>>(backend_fn: Arc<F>) {
    let store = backend_fn().open(desc()).expect("db open to succeed");

    let dbtx = store.transaction_ro().unwrap();
    assert_eq!(dbtx.get(StoreName::Wallet, "no-such-id"), Ok(None));
}

tests![
    del_aborted_keeps_entry,
    del_missing_id_is_noop,
    del_then_commit,
    get_missing_id,
    put_and_abort,
    put_and_commit,
    put_and_drop,
    put_twice_then_commit_read_last,
    put_two_under_different_ids,
];
