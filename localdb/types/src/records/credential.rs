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

/// Encrypted seed or private-key blob, keyed by wallet/account id.
///
/// The blob is opaque to this layer; decryption happens elsewhere and the
/// plaintext only ever exists transiently in memory there. The manual
/// [std::fmt::Debug] impl keeps the ciphertext out of logs.
#[derive(Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub credential: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("credential", &"<redacted>")
            .finish()
    }
}

impl LocalDbRecord for Credential {
    const STORE: StoreName = StoreName::Credential;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_ciphertext() {
        let credential = Credential {
            id: "hd-1".into(),
            credential: "deadbeef".into(),
        };
        let out = format!("{credential:?}");
        assert!(!out.contains("deadbeef"));
        assert!(out.contains("<redacted>"));
    }
}
