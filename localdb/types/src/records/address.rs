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

use serde::{Deserialize, Serialize};

use crate::{LocalDbRecord, StoreName};

/// Separator inside composite address-record ids
const ID_SEPARATOR: &str = "--";

/// Reverse index answering "which of my wallets owns this address".
///
/// The id is composite: `networkId--address` for network-scoped entries or
/// `impl--address` for chain-implementation-scoped ones.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    /// walletId -> accountId or indexedAccountId
    pub wallets: BTreeMap<String, String>,
}

impl Address {
    /// Composite id for a network-scoped entry
    pub fn id_for_network(network_id: &str, address: &str) -> String {
        format!("{network_id}{ID_SEPARATOR}{address}")
    }

    /// Composite id for a chain-implementation-scoped entry
    pub fn id_for_impl(chain_impl: &str, address: &str) -> String {
        format!("{chain_impl}{ID_SEPARATOR}{address}")
    }
}

impl LocalDbRecord for Address {
    const STORE: StoreName = StoreName::Address;

    fn id(&self) -> &str {
        &self.id
    }
}
