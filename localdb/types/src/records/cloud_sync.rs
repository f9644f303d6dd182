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

use crate::{LocalDbRecord, StoreName};

/// Cloud-sync envelope.
///
/// Stored locally on behalf of the cloud-sync service; reconciliation and
/// conflict resolution happen outside this layer, which only persists the
/// envelope as-is. `data_type` is the sync service's own taxonomy and is
/// opaque here.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSyncItem {
    pub id: String,
    pub raw_key: String,
    #[serde(default)]
    pub raw_data: Option<String>,
    pub data_type: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub data_time: Option<i64>,
    pub is_deleted: bool,
    pub pwd_hash: String,
    /// Whether the local scene has consumed this item
    pub local_scene_updated: bool,
    /// Whether the server has acknowledged this item
    pub server_uploaded: bool,
}

impl LocalDbRecord for CloudSyncItem {
    const STORE: StoreName = StoreName::CloudSyncItem;

    fn id(&self) -> &str {
        &self.id
    }
}
