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

//! Append-mostly history records kept in the `archive` bucket. Pruning is
//! driven by retention policies outside this layer.

use serde::{Deserialize, Serialize};

use crate::{LocalDbRecord, StoreName};

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub id: String,
    pub network_id: String,
    pub address: String,
    pub message: String,
    pub content_type: String,
    #[serde(default)]
    pub title: Option<String>,
    pub created_at: i64,
}

impl LocalDbRecord for SignedMessage {
    const STORE: StoreName = StoreName::SignedMessage;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub id: String,
    pub network_id: String,
    pub address: String,
    pub title: String,
    pub hash: String,
    /// Raw signed transaction payload, stringified by the signer
    #[serde(default)]
    pub data_stringify: Option<String>,
    pub created_at: i64,
}

impl LocalDbRecord for SignedTransaction {
    const STORE: StoreName = StoreName::SignedTransaction;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedSite {
    pub id: String,
    pub url: String,
    pub network_ids: Vec<String>,
    pub address: String,
    pub created_at: i64,
}

impl LocalDbRecord for ConnectedSite {
    const STORE: StoreName = StoreName::ConnectedSite;

    fn id(&self) -> &str {
        &self.id
    }
}
