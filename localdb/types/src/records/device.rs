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

/// Hardware wallet identity.
///
/// `connect_id` is the transport-level identifier (BLE MAC / USB serial) and
/// stays stable for the device's lifetime; `device_id` comes out of the
/// device's feature blob and changes after a factory reset.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    /// Raw serialized capability blob as reported by the device
    pub features: String,
    pub connect_id: String,
    pub uuid: String,
    pub device_id: String,
    pub device_type: String,
    #[serde(default)]
    pub settings_raw: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub verified_at_version: Option<String>,
}

impl Device {
    /// Parsed view of the raw feature blob, read-only and not persisted
    pub fn features_info(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.features).ok()
    }
}

impl LocalDbRecord for Device {
    const STORE: StoreName = StoreName::Device;

    fn id(&self) -> &str {
        &self.id
    }
}
