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

use crate::{consts, LocalDbRecord, StoreName};

/// How a wallet's keys are held
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    /// HD-derived from a locally stored seed
    Hd,
    /// Hardware device
    Hw,
    /// QR-code air-gapped device
    Qr,
    /// Imported single private keys (singleton wallet)
    Imported,
    /// Watch-only addresses (singleton wallet)
    Watching,
    /// External wallet-bridge sessions (singleton wallet)
    External,
}

impl WalletType {
    /// Singleton wallet types exist exactly once, with a fixed id, and track
    /// their accounts in [Wallet::accounts].
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            WalletType::Imported | WalletType::Watching | WalletType::External
        )
    }
}

/// Per-purpose derivation counters of a wallet
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletNextIdKey {
    /// Next HD account index
    AccountHdIndex,
    /// Next global account number (singleton wallets)
    AccountGlobalNum,
    /// Next hidden (passphrase) wallet number
    HiddenWalletNum,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub backuped: bool,
    /// Account ids, only populated for singleton wallet types
    #[serde(default)]
    pub accounts: Vec<String>,
    /// Per-purpose counters used for path derivation
    #[serde(default)]
    pub next_ids: BTreeMap<WalletNextIdKey, u32>,
    /// Back-reference to the [crate::Device] this wallet belongs to
    #[serde(default)]
    pub associated_device: Option<String>,
    /// Passphrase-derived sub-wallets, read-only projection
    #[serde(default)]
    pub hidden_wallets: Option<Vec<Wallet>>,
    #[serde(default)]
    pub passphrase_state: Option<String>,
    /// Wallet sequence number, assigned from [crate::Context::next_wallet_no]
    pub wallet_no: u32,
    /// Hashed mnemonic, HD wallets only
    #[serde(default)]
    pub hash: Option<String>,
    /// Wallet fingerprint, HD/hardware wallets only
    #[serde(default)]
    pub xfp: Option<String>,
    /// Hardware wallets only
    #[serde(default)]
    pub deprecated: Option<bool>,
}

impl Wallet {
    /// A freshly bootstrapped singleton wallet
    pub fn new_singleton(wallet_type: WalletType, wallet_no: u32) -> Self {
        let id = match wallet_type {
            WalletType::Imported => consts::WALLET_ID_IMPORTED,
            WalletType::Watching => consts::WALLET_ID_WATCHING,
            WalletType::External => consts::WALLET_ID_EXTERNAL,
            WalletType::Hd | WalletType::Hw | WalletType::Qr => {
                debug_assert!(false, "not a singleton wallet type");
                consts::WALLET_ID_IMPORTED
            }
        };
        Wallet {
            id: id.to_string(),
            name: id.to_string(),
            wallet_type,
            backuped: true,
            accounts: Vec::new(),
            next_ids: BTreeMap::new(),
            associated_device: None,
            hidden_wallets: None,
            passphrase_state: None,
            wallet_no,
            hash: None,
            xfp: None,
            deprecated: None,
        }
    }
}

impl LocalDbRecord for Wallet {
    const STORE: StoreName = StoreName::Wallet;

    fn id(&self) -> &str {
        &self.id
    }
}
