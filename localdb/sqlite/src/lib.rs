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

//! SQLite storage backend.
//!
//! Each record store maps to one table with a `TEXT` primary key and a
//! `BLOB` value holding the serialized record. Transactions are plain
//! SQLite transactions taken over an exclusively locked connection; a
//! read-write transaction starts with `BEGIN IMMEDIATE` so the write lock
//! is acquired up front.

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OpenFlags, OptionalExtension};

use localdb_core::backend::{self, TransactionalRo, TransactionalRw};
use localdb_core::{Data, DbDesc};
use localdb_types::StoreName;

use crate::error::{process_io_error, process_sqlite_error};

/// The version of the record store schema
const SQLITE_USER_VERSION: i32 = 1;

/// Table name of a record store
fn table(store: StoreName) -> &'static str {
    store.into()
}

/// An open transaction over the locked connection. Rolled back on drop
/// unless committed or aborted explicitly.
pub struct DbTx<'m> {
    connection: MutexGuard<'m, Connection>,
    done: bool,
}

impl<'m> DbTx<'m> {
    fn start(connection: MutexGuard<'m, Connection>, write: bool) -> localdb_core::Result<Self> {
        let begin = if write { "BEGIN IMMEDIATE" } else { "BEGIN" };
        connection.execute_batch(begin).map_err(process_sqlite_error)?;
        Ok(DbTx {
            connection,
            done: false,
        })
    }

    fn finish(&mut self, sql: &str) -> localdb_core::Result<()> {
        self.done = true;
        self.connection.execute_batch(sql).map_err(process_sqlite_error)
    }
}

impl Drop for DbTx<'_> {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.connection.execute_batch("ROLLBACK");
        }
    }
}

impl backend::ReadOps for DbTx<'_> {
    fn get(&self, store: StoreName, id: &str) -> localdb_core::Result<Option<Data>> {
        let mut stmt = self
            .connection
            .prepare_cached(&format!(
                "SELECT value FROM \"{}\" WHERE id = ?",
                table(store)
            ))
            .map_err(process_sqlite_error)?;
        stmt.query_row([id], |row| row.get(0)).optional().map_err(process_sqlite_error)
    }

    fn get_all(&self, store: StoreName) -> localdb_core::Result<Vec<Data>> {
        let mut stmt = self
            .connection
            .prepare_cached(&format!("SELECT value FROM \"{}\" ORDER BY id", table(store)))
            .map_err(process_sqlite_error)?;
        let rows = stmt.query_map([], |row| row.get(0)).map_err(process_sqlite_error)?;
        rows.collect::<rusqlite::Result<Vec<Data>>>().map_err(process_sqlite_error)
    }

    fn count(&self, store: StoreName) -> localdb_core::Result<usize> {
        let mut stmt = self
            .connection
            .prepare_cached(&format!("SELECT COUNT(*) FROM \"{}\"", table(store)))
            .map_err(process_sqlite_error)?;
        let n: i64 = stmt.query_row([], |row| row.get(0)).map_err(process_sqlite_error)?;
        Ok(n as usize)
    }
}

impl backend::WriteOps for DbTx<'_> {
    fn put(&mut self, store: StoreName, id: &str, value: Data) -> localdb_core::Result<()> {
        let mut stmt = self
            .connection
            .prepare_cached(&format!(
                "INSERT OR REPLACE INTO \"{}\" (id, value) VALUES (?, ?)",
                table(store)
            ))
            .map_err(process_sqlite_error)?;
        stmt.execute(rusqlite::params![id, value]).map_err(process_sqlite_error)?;
        Ok(())
    }

    fn del(&mut self, store: StoreName, id: &str) -> localdb_core::Result<()> {
        let mut stmt = self
            .connection
            .prepare_cached(&format!("DELETE FROM \"{}\" WHERE id = ?", table(store)))
            .map_err(process_sqlite_error)?;
        stmt.execute([id]).map_err(process_sqlite_error)?;
        Ok(())
    }

    fn clear(&mut self, store: StoreName) -> localdb_core::Result<()> {
        self.connection
            .execute(&format!("DELETE FROM \"{}\"", table(store)), ())
            .map_err(process_sqlite_error)?;
        Ok(())
    }
}

impl backend::TxRo for DbTx<'_> {
    fn close(self) {}
}

impl backend::TxRw for DbTx<'_> {
    fn commit(mut self) -> localdb_core::Result<()> {
        self.finish("COMMIT")
    }

    fn abort(mut self) {
        let _ = self.finish("ROLLBACK");
    }
}

#[derive(Clone)]
pub struct SqliteImpl {
    /// Handle to an SQLite database connection
    connection: Arc<Mutex<Connection>>,
}

impl SqliteImpl {
    fn start_transaction(&self, write: bool) -> localdb_core::Result<DbTx<'_>> {
        DbTx::start(self.connection.lock(), write)
    }
}

impl<'tx> TransactionalRo<'tx> for SqliteImpl {
    type TxRo = DbTx<'tx>;

    fn transaction_ro<'st: 'tx>(&'st self) -> localdb_core::Result<Self::TxRo> {
        self.start_transaction(false)
    }
}

impl<'tx> TransactionalRw<'tx> for SqliteImpl {
    type TxRw = DbTx<'tx>;

    fn transaction_rw<'st: 'tx>(&'st self) -> localdb_core::Result<Self::TxRw> {
        self.start_transaction(true)
    }
}

impl backend::BackendImpl for SqliteImpl {}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Sqlite {
    path: PathBuf,
}

impl Sqlite {
    /// New SQLite database backend stored in the file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open_db(&self, desc: &DbDesc) -> rusqlite::Result<Connection> {
        let flags = OpenFlags::from_iter([
            OpenFlags::SQLITE_OPEN_FULL_MUTEX,
            OpenFlags::SQLITE_OPEN_READ_WRITE,
            OpenFlags::SQLITE_OPEN_CREATE,
        ]);

        let connection = Connection::open_with_flags(&self.path, flags)?;

        // Set the locking mode to exclusive
        connection.pragma_update(None, "locking_mode", "exclusive")?;

        // Begin a transaction to acquire the exclusive lock
        connection.execute_batch("BEGIN EXCLUSIVE; COMMIT")?;

        // Enable fullfsync
        connection.pragma_update(None, "fullfsync", "true")?;

        // Create the record store tables as needed
        for store in desc.iter() {
            connection.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS \"{}\" (id TEXT PRIMARY KEY NOT NULL, value BLOB NOT NULL)",
                    table(store)
                ),
                (),
            )?;
        }

        // Stamp a fresh database with the schema version
        let version: i32 = {
            let mut stmt = connection.prepare_cached("PRAGMA user_version")?;
            stmt.query_row([], |row| row.get(0)).optional()?.unwrap_or(0)
        };
        if version == 0 {
            connection.pragma_update(None, "user_version", SQLITE_USER_VERSION)?;
        }

        Ok(connection)
    }
}

impl backend::Backend for Sqlite {
    type Impl = SqliteImpl;

    fn exists(&self) -> localdb_core::Result<bool> {
        Ok(self.path.is_file())
    }

    fn open(self, desc: DbDesc) -> localdb_core::Result<Self::Impl> {
        // Attempt to create the parent storage directory
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(process_io_error)?;
        } else {
            return Err(localdb_core::Error::BackendUnavailable(
                "cannot find the parent directory".into(),
            ));
        }

        let connection = self.open_db(&desc).map_err(process_sqlite_error)?;

        Ok(SqliteImpl {
            connection: Arc::new(Mutex::new(connection)),
        })
    }
}
