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

//! Record serialization. Records are stored as JSON documents for
//! compatibility with data written by older application versions.

use localdb_core::{Data, Error};
use localdb_types::LocalDbRecord;

pub(crate) fn encode<R: LocalDbRecord>(record: &R) -> crate::Result<Data> {
    serde_json::to_vec(record).map_err(|e| Error::Corrupted {
        store: R::STORE,
        reason: e.to_string(),
    })
}

pub(crate) fn decode<R: LocalDbRecord>(data: &[u8]) -> crate::Result<R> {
    serde_json::from_slice(data).map_err(|e| Error::Corrupted {
        store: R::STORE,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use localdb_types::{Context, StoreName};

    #[test]
    fn decode_failure_reports_corrupted_store() {
        let err = decode::<Context>(b"not json").unwrap_err();
        assert!(matches!(
            err,
            Error::Corrupted {
                store: StoreName::Context,
                ..
            }
        ));
    }

    #[test]
    fn encode_decode_identity() {
        let context = Context::bootstrap();
        let data = encode(&context).unwrap();
        assert_eq!(decode::<Context>(&data).unwrap(), context);
    }
}
