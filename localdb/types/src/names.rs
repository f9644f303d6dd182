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

//! Store and bucket naming contract.
//!
//! Both enumerations are closed and the mapping between them is fixed at
//! build time. Changing either requires a new migration path.

use serde::{Deserialize, Serialize};

/// Name of one logical record store
#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Clone,
    Copy,
    Debug,
    Hash,
    Serialize,
    Deserialize,
    enum_iterator::Sequence,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum StoreName {
    Context,
    Credential,
    Wallet,
    Account,
    AccountDerivation,
    IndexedAccount,
    Device,
    Address,
    SignedMessage,
    SignedTransaction,
    ConnectedSite,
    CloudSyncItem,
}

impl StoreName {
    /// All store names, in a fixed order
    pub fn all() -> impl Iterator<Item = StoreName> {
        enum_iterator::all::<StoreName>()
    }

    /// Store name as used for physical table/object-store naming
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// The bucket that owns this store
    pub const fn bucket(&self) -> BucketName {
        match self {
            StoreName::Context
            | StoreName::Credential
            | StoreName::Wallet
            | StoreName::Account
            | StoreName::AccountDerivation
            | StoreName::IndexedAccount
            | StoreName::Device
            | StoreName::CloudSyncItem => BucketName::Account,
            StoreName::Address => BucketName::Address,
            StoreName::SignedMessage | StoreName::SignedTransaction | StoreName::ConnectedSite => {
                BucketName::Archive
            }
        }
    }
}

/// Name of one bucket, a separately-opened physical database instance
#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Clone,
    Copy,
    Debug,
    Hash,
    Serialize,
    Deserialize,
    enum_iterator::Sequence,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum BucketName {
    /// Primary bucket holding wallet/account data
    #[serde(rename = "account")]
    #[strum(serialize = "account")]
    Account,
    /// Daily snapshot mirror of the `account` bucket
    #[serde(rename = "backupAccount")]
    #[strum(serialize = "backupAccount")]
    BackupAccount,
    /// Reverse address index
    #[serde(rename = "address")]
    #[strum(serialize = "address")]
    Address,
    /// Signed message/transaction and connected-site history
    #[serde(rename = "archive")]
    #[strum(serialize = "archive")]
    Archive,
    /// Reserved for cloud-sync data; owns no stores yet
    #[serde(rename = "cloudSync")]
    #[strum(serialize = "cloudSync")]
    CloudSync,
}

impl BucketName {
    /// All bucket names, in a fixed order
    pub fn all() -> impl Iterator<Item = BucketName> {
        enum_iterator::all::<BucketName>()
    }

    /// Bucket name as a static string
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// The fixed set of stores this bucket's physical database holds.
    ///
    /// The `backupAccount` bucket mirrors the stores of the `account` bucket;
    /// for those stores [StoreName::bucket] still points at `account`, the
    /// mirror is only ever addressed explicitly by the migration engine and
    /// the backup job.
    pub const fn stores(&self) -> &'static [StoreName] {
        match self {
            BucketName::Account | BucketName::BackupAccount => &[
                StoreName::Context,
                StoreName::Credential,
                StoreName::Wallet,
                StoreName::Account,
                StoreName::AccountDerivation,
                StoreName::IndexedAccount,
                StoreName::Device,
                StoreName::CloudSyncItem,
            ],
            BucketName::Address => &[StoreName::Address],
            BucketName::Archive => &[
                StoreName::SignedMessage,
                StoreName::SignedTransaction,
                StoreName::ConnectedSite,
            ],
            BucketName::CloudSync => &[],
        }
    }

    /// Whether this bucket's database holds the given store
    pub fn holds(&self, store: StoreName) -> bool {
        self.stores().contains(&store)
    }
}
