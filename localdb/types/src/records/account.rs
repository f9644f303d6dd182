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

/// One HD derivation index under a wallet.
///
/// Many [Account] records (one per network) can point back to a single
/// indexed account through [Account::indexed_account_id].
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedAccount {
    pub id: String,
    pub name: String,
    pub wallet_id: String,
    pub index: u32,
    pub id_hash: String,
}

impl LocalDbRecord for IndexedAccount {
    const STORE: StoreName = StoreName::IndexedAccount;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Chain-specific shape of an account
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AccountKind {
    /// Single-address account
    #[serde(rename_all = "camelCase")]
    Simple { pub_key: String, address: String },
    /// UTXO account with an address set keyed by relative derivation path
    #[serde(rename_all = "camelCase")]
    Utxo {
        xpub: String,
        /// Display/selected address
        address: String,
        /// relPath -> address
        addresses: BTreeMap<String, String>,
        #[serde(default)]
        custom_addresses: Option<BTreeMap<String, String>>,
    },
    /// Multi-network account with an address per network
    #[serde(rename_all = "camelCase")]
    Variant {
        pub_key: String,
        /// Base address
        address: String,
        /// networkId -> address
        addresses: BTreeMap<String, String>,
    },
    /// External wallet-bridge session
    #[serde(rename_all = "camelCase")]
    External {
        /// Empty for wallet-connect sessions
        address: String,
        #[serde(default)]
        connection_info_raw: Option<String>,
        /// networkId or impl -> comma-joined addresses
        #[serde(default)]
        connected_addresses: BTreeMap<String, String>,
        /// networkId -> index into the connected address list
        #[serde(default)]
        selected_address: BTreeMap<String, u32>,
    },
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Derivation path of this account
    pub path: String,
    #[serde(default)]
    pub path_index: Option<u32>,
    #[serde(default)]
    pub rel_path: Option<String>,
    pub coin_type: String,
    /// Chain implementation tag this account belongs to
    pub chain_impl: String,
    #[serde(default)]
    pub indexed_account_id: Option<String>,
    /// Networks the account is restricted to, if any
    #[serde(default)]
    pub networks: Option<Vec<String>>,
    #[serde(default)]
    pub create_at_network: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(flatten)]
    pub kind: AccountKind,
}

impl LocalDbRecord for Account {
    const STORE: StoreName = StoreName::Account;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Wallet/network/template derivation bookkeeping.
///
/// Kept for compatibility with old installations; the legacy migration
/// deliberately does not copy this store.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDerivation {
    pub id: String,
    pub wallet_id: String,
    pub accounts: Vec<String>,
    pub template: String,
}

impl LocalDbRecord for AccountDerivation {
    const STORE: StoreName = StoreName::AccountDerivation;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_kind_round_trips_through_tagged_json() {
        let account = Account {
            id: "hd-1--m/44'/60'/0'/0/0".into(),
            name: "Account #1".into(),
            path: "m/44'/60'/0'/0/0".into(),
            path_index: Some(0),
            rel_path: None,
            coin_type: "60".into(),
            chain_impl: "evm".into(),
            indexed_account_id: Some("hd-1--0".into()),
            networks: None,
            create_at_network: None,
            template: None,
            kind: AccountKind::Simple {
                pub_key: "02abc".into(),
                address: "0xdead".into(),
            },
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "simple");
        let back: Account = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);
    }
}
