//! SQLite-backed key-value store over the `kv_entries` table.

use super::{KeyValueStore, KvError, KvResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store borrowing a migrated SQLite connection.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        read_value(self.conn, key)
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        write_value(self.conn, key, value)
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        debug!("event=kv_remove module=kv status=ok key={key}");
        Ok(())
    }

    fn update_entry<T, E, F>(&self, key: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(Option<String>) -> Result<(String, T), E>,
        E: From<KvError>,
    {
        let tx = self.conn.unchecked_transaction().map_err(KvError::from)?;
        let current = read_value(&tx, key)?;
        let (next, output) = f(current)?;
        write_value(&tx, key, &next)?;
        tx.commit().map_err(KvError::from)?;
        Ok(output)
    }
}

fn read_value(conn: &Connection, key: &str) -> KvResult<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [key],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(value)
}

fn write_value(conn: &Connection, key: &str, value: &str) -> KvResult<()> {
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = (strftime('%s', 'now') * 1000);",
        params![key, value],
    )?;
    debug!(
        "event=kv_write module=kv status=ok key={key} bytes={}",
        value.len()
    );
    Ok(())
}
