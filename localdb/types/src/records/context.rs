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

use serde::{Deserialize, Serialize};

use crate::{consts, LocalDbRecord, StoreName};

/// Application-lifetime database context.
///
/// Created once at first launch under [consts::DB_MAIN_CONTEXT_ID] and
/// mutated in place afterwards (counters incremented, backup timestamp
/// advanced). `verify_string` holds the password-verification ciphertext;
/// its [consts::DEFAULT_VERIFY_STRING] value marks a database where no
/// password has been set yet, which the migration guard relies on.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub id: String,
    pub next_hd: u32,
    pub next_wallet_no: u32,
    pub verify_string: String,
    pub backup_uuid: String,
    pub next_signature_message_id: u32,
    pub next_signature_transaction_id: u32,
    pub next_connected_site_id: u32,
    /// When the daily database backup last ran, unix millis
    #[serde(default)]
    pub last_db_backup_time: Option<i64>,
}

impl Context {
    /// The context of a freshly initialized database
    pub fn bootstrap() -> Self {
        Context {
            id: consts::DB_MAIN_CONTEXT_ID.to_string(),
            next_hd: 1,
            next_wallet_no: 1,
            verify_string: consts::DEFAULT_VERIFY_STRING.to_string(),
            backup_uuid: String::new(),
            next_signature_message_id: 1,
            next_signature_transaction_id: 1,
            next_connected_site_id: 1,
            last_db_backup_time: None,
        }
    }
}

impl LocalDbRecord for Context {
    const STORE: StoreName = StoreName::Context;

    fn id(&self) -> &str {
        &self.id
    }
}
