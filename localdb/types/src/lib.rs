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

//! Record schema for the local wallet database.
//!
//! The database is a collection of logical stores (one per record type),
//! sharded into named buckets. This crate defines the record types, the
//! closed enumerations of store and bucket names, the fixed store-to-bucket
//! mapping and the constants that gate bootstrap and migration. It is pure
//! data; all behavior lives in the `localdb` crate and its backends.

pub mod consts;
mod names;
mod records;

pub use names::{BucketName, StoreName};
pub use records::{
    Account, AccountDerivation, AccountKind, Address, CloudSyncItem, ConnectedSite, Context,
    Credential, Device, IndexedAccount, SignedMessage, SignedTransaction, Wallet, WalletNextIdKey,
    WalletType,
};

/// A record persisted in one of the logical stores.
///
/// Every record carries a string id unique within its store. The store a
/// record type belongs to is fixed at compile time.
pub trait LocalDbRecord:
    Clone + std::fmt::Debug + serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static
{
    /// The logical store this record type lives in
    const STORE: StoreName;

    /// Unique id of this record within its store
    fn id(&self) -> &str;
}
