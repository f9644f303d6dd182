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

//! Store-to-bucket routing and bucket connection lifecycle.

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;

use localdb_core::{Backend, DbDesc};
use localdb_types::BucketName;

/// Recipe for the physical database of one bucket
type BucketFactory<B> = Box<dyn Fn(BucketName) -> B + Send + Sync>;

/// Maps each bucket to its physical database connection.
///
/// Pure lookup and lifecycle, no CRUD: each bucket's database is opened
/// lazily on first use with the store layout that bucket owns, and the
/// connection then stays open for the process lifetime. The backend factory
/// is injected by the process entry point; there are no global handles.
pub struct BucketRouter<B: Backend> {
    factory: BucketFactory<B>,
    buckets: BTreeMap<BucketName, OnceCell<B::Impl>>,
}

impl<B: Backend> BucketRouter<B> {
    pub fn new(factory: impl Fn(BucketName) -> B + Send + Sync + 'static) -> Self {
        BucketRouter {
            factory: Box::new(factory),
            buckets: BucketName::all().map(|b| (b, OnceCell::new())).collect(),
        }
    }

    /// The open database of the given bucket, opening it on first use
    pub fn bucket(&self, name: BucketName) -> crate::Result<&B::Impl> {
        self.buckets
            .get(&name)
            .expect("a cell per bucket")
            .get_or_try_init(|| (self.factory)(name).open(DbDesc::for_bucket(name)))
    }
}
