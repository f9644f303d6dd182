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

//! Storage errors.
//!
//! The taxonomy is backend-independent: adapters translate their native
//! failures into these variants and callers never see backend-specific
//! error types. The agent and adapter layers propagate these errors as-is;
//! only the maintenance tasks (migration, backup) catch and log them at
//! their own boundary.

use localdb_types::{BucketName, StoreName};

/// Database error
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum Error {
    /// Requested record id is absent
    #[error("record `{id}` not found in store `{store}`")]
    NotFound { store: StoreName, id: String },

    /// Inserted record id collides with an existing one
    #[error("record `{id}` already exists in store `{store}`")]
    Conflict { store: StoreName, id: String },

    /// Backend-level failure mid-transaction; effects have not taken place
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),

    /// Physical connection could not be opened (storage quota, permissions,
    /// missing parent directory and the like)
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Write operation issued through a read-only transaction
    #[error("write operation in a read-only transaction")]
    ReadOnlyTransaction,

    /// Operation addressed a store through a bucket that does not hold it
    #[error("store `{store}` is not held by bucket `{bucket}`")]
    StoreNotInBucket {
        store: StoreName,
        bucket: BucketName,
    },

    /// Stored bytes could not be decoded into the record type
    #[error("corrupted record in store `{store}`: {reason}")]
    Corrupted { store: StoreName, reason: String },
}
