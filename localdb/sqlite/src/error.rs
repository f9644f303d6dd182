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

use localdb_core::Error;

/// Map an SQLite error to the storage error taxonomy
pub fn process_sqlite_error(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) => {
            let msg = msg.unwrap_or_else(|| e.to_string());
            match e.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    Error::TransactionAborted(msg)
                }
                _ => Error::BackendUnavailable(msg),
            }
        }
        err => Error::BackendUnavailable(err.to_string()),
    }
}

pub fn process_io_error(err: std::io::Error) -> Error {
    Error::BackendUnavailable(err.to_string())
}
