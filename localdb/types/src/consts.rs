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

//! Well-known database constants.
//!
//! The bootstrap defaults below gate the legacy-migration idempotency check,
//! so they must stay in sync with [crate::Context] creation and the singleton
//! wallets created on first launch.

/// Id of the single [crate::Context] record
pub const DB_MAIN_CONTEXT_ID: &str = "mainContext";

/// `verify_string` value of a freshly initialized database, before the user
/// has set a password
pub const DEFAULT_VERIFY_STRING: &str = "OK";

/// Well-known name of the pre-bucket single-database installation. Only the
/// migration engine reads it; it is never written to after migration.
pub const LEGACY_DB_NAME: &str = "v4-wallet";

/// Prefix of the per-bucket physical database names
pub const BUCKET_DB_NAME_PREFIX: &str = "v5-wallet";

/// Id of the singleton wallet holding imported private-key accounts
pub const WALLET_ID_IMPORTED: &str = "imported";
/// Id of the singleton wallet holding watch-only accounts
pub const WALLET_ID_WATCHING: &str = "watching";
/// Id of the singleton wallet holding external (wallet-bridge) accounts
pub const WALLET_ID_EXTERNAL: &str = "external";

/// Number of wallets a freshly bootstrapped database contains (the three
/// singleton wallets above). A wallet count above this means user data has
/// landed in the bucketed database.
pub const BOOTSTRAP_WALLET_COUNT: usize = 3;

/// Minimum interval between two database backup runs
pub const DB_BACKUP_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000;
