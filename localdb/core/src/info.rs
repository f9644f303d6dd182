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

//! Physical database layout description

use itertools::Itertools;
use localdb_types::{BucketName, StoreName};

/// Description of one physical database: the ordered list of record stores
/// it holds. Backends create the stores listed here on open.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct DbDesc(Vec<StoreName>);

#[allow(clippy::len_without_is_empty)]
impl DbDesc {
    /// Layout of one bucket's database
    pub fn for_bucket(bucket: BucketName) -> Self {
        DbDesc(bucket.stores().to_vec())
    }

    /// Layout of the pre-bucket single database: every store in one place
    pub fn legacy() -> Self {
        DbDesc(StoreName::all().collect())
    }

    /// Number of stores
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the stores of this database
    pub fn iter(&self) -> impl '_ + Iterator<Item = StoreName> + ExactSizeIterator {
        self.0.iter().copied()
    }

    /// Whether this database holds the given store
    pub fn holds(&self, store: StoreName) -> bool {
        self.0.contains(&store)
    }
}

impl FromIterator<StoreName> for DbDesc {
    fn from_iter<T: IntoIterator<Item = StoreName>>(iter: T) -> Self {
        let stores: Vec<_> = iter.into_iter().collect();
        debug_assert!(
            stores.iter().all_unique(),
            "duplicate store in database description"
        );
        DbDesc(stores)
    }
}
