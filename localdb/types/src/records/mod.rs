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

//! Record type definitions, one module per store.
//!
//! Records serialize as camelCase JSON documents for compatibility with data
//! written by older application versions; fields added later default when
//! absent.

mod account;
mod address;
mod cloud_sync;
mod context;
mod credential;
mod device;
mod history;
mod wallet;

pub use account::{Account, AccountDerivation, AccountKind, IndexedAccount};
pub use address::Address;
pub use cloud_sync::CloudSyncItem;
pub use context::Context;
pub use credential::Credential;
pub use device::Device;
pub use history::{ConnectedSite, SignedMessage, SignedTransaction};
pub use wallet::{Wallet, WalletNextIdKey, WalletType};
