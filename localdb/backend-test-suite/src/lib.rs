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

//! Conformance tests shared by all bucket storage backends.
//!
//! A backend integration test is a `harness = false` binary that builds a
//! backend construction closure and hands it to [`main`]:
//!
//! ```ignore
//! fn main() {
//!     localdb_backend_test_suite::main(|| MyBackend::new()).exit()
//! }
//! ```

#[macro_use]
pub mod prelude;

mod basic;
mod stores;

use prelude::{Backend, BackendFn};
use std::sync::Arc;

/// Collect the full test list and run it under the standard test harness
pub fn main<B: Backend + 'static, F: BackendFn<B>>(
    backend_fn: F,
) -> libtest_mimic::Conclusion {
    let backend_fn = Arc::new(backend_fn);
    let args = libtest_mimic::Arguments::from_args();
    let tests = basic::tests(Arc::clone(&backend_fn))
        .chain(stores::tests(backend_fn))
        .collect();
    libtest_mimic::run(&args, tests)
}
