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

// Re-export a bunch of often used items
pub use localdb_core::{
    backend::{
        Backend, BackendImpl, ReadOps, TransactionalRo, TransactionalRw, TxRo, TxRw, WriteOps,
    },
    Data, DbDesc,
};
pub use localdb_types::{BucketName, StoreName};

pub use std::{mem::drop, sync::Arc};

/// A function to construct a backend
pub trait BackendFn<B>: Fn() -> B + Send + Sync + 'static {}
impl<B, F: Fn() -> B + Send + Sync + 'static> BackendFn<B> for F {}

/// The store layout tests run against: the account bucket carries enough
/// distinct stores to exercise per-store isolation
pub fn desc() -> DbDesc {
    DbDesc::for_bucket(BucketName::Account)
}

/// Byte value helper
pub fn val(s: &str) -> Data {
    s.as_bytes().to_vec()
}

/// Test helper functions not exported with the prelude
pub mod support {
    use super::*;
    use libtest_mimic::Trial;

    /// Create the test list
    pub fn create_tests<B: Backend + 'static, F: BackendFn<B>>(
        backend_fn: Arc<F>,
        tests: impl IntoIterator<Item = (&'static str, fn(Arc<F>))>,
    ) -> impl Iterator<Item = Trial> {
        tests.into_iter().map(move |(name, test)| {
            let backend_fn = Arc::clone(&backend_fn);
            let test_fn = move || {
                test(backend_fn);
                Ok(())
            };
            Trial::test(name, test_fn)
        })
    }
}

macro_rules! tests {
    ($($name:path),* $(,)?) => {
        pub fn tests<B: $crate::prelude::Backend + 'static, F: $crate::prelude::BackendFn<B>>(
            backend_fn: Arc<F>,
        ) -> impl std::iter::Iterator<Item = libtest_mimic::Trial> {
            $crate::prelude::support::create_tests(backend_fn, [
                $((concat!(module_path!(), "::", stringify!($name)), $name as fn(Arc<F>)),)*
            ])
        }
    }
}
