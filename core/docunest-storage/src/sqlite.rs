//! SQLite-backed document store.

use crate::error::{StorageError, StorageResult};
use crate::repository::DocumentRepository;
use docunest_model::{DocumentMetadata, DocumentRecord, ModelError, PasswordProtection, Visibility};
use docunest_types::{DocumentId, Timestamp, UserId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "id, owner_id, visibility, download_password, resource_locator, \
     title, description, file_name, mime_type, size_bytes, created_at, updated_at";

/// Persistent document store backed by SQLite.
#[derive(Clone)]
pub struct SqliteDocumentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDocumentStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "opened document store");
        Self::with_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                visibility TEXT NOT NULL,
                download_password TEXT,
                resource_locator TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                file_name TEXT NOT NULL,
                mime_type TEXT NOT NULL,
                size_bytes INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_documents_owner ON documents(owner_id);
            CREATE INDEX IF NOT EXISTS idx_documents_visibility ON documents(visibility);
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

/// Raw column values, converted to a record outside the rusqlite closure so
/// that conversion failures surface as `InvalidData`.
struct StoredRow {
    id: String,
    owner_id: String,
    visibility: String,
    download_password: Option<String>,
    resource_locator: String,
    title: String,
    description: Option<String>,
    file_name: String,
    mime_type: String,
    size_bytes: i64,
    created_at: i64,
    updated_at: i64,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            visibility: row.get(2)?,
            download_password: row.get(3)?,
            resource_locator: row.get(4)?,
            title: row.get(5)?,
            description: row.get(6)?,
            file_name: row.get(7)?,
            mime_type: row.get(8)?,
            size_bytes: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    fn into_record(self) -> StorageResult<DocumentRecord> {
        let id = DocumentId::parse(&self.id)
            .map_err(|e| StorageError::InvalidData(format!("document id {}: {e}", self.id)))?;
        let owner_id = UserId::parse(&self.owner_id)
            .map_err(|e| StorageError::InvalidData(format!("owner of {id}: {e}")))?;
        let visibility = self
            .visibility
            .parse::<Visibility>()
            .map_err(|e| StorageError::InvalidData(format!("visibility of {id}: {e}")))?;
        let size_bytes = u64::try_from(self.size_bytes)
            .map_err(|_| StorageError::InvalidData(format!("negative size for {id}")))?;

        Ok(DocumentRecord {
            id,
            owner_id,
            visibility,
            password_protection: PasswordProtection::from_stored(self.download_password),
            resource_locator: self.resource_locator,
            metadata: DocumentMetadata {
                title: self.title,
                description: self.description,
                file_name: self.file_name,
                mime_type: self.mime_type,
                size_bytes,
            },
            created_at: Timestamp::from_millis(self.created_at),
            updated_at: Timestamp::from_millis(self.updated_at),
        })
    }
}

fn fetch(conn: &Connection, id: &DocumentId) -> StorageResult<Option<DocumentRecord>> {
    let row = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM documents WHERE id = ?1"),
            params![id.to_string()],
            StoredRow::from_row,
        )
        .optional()?;
    row.map(StoredRow::into_record).transpose()
}

fn fetch_owned(
    conn: &Connection,
    id: &DocumentId,
    owner: &UserId,
) -> StorageResult<Option<DocumentRecord>> {
    let row = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM documents WHERE id = ?1 AND owner_id = ?2"),
            params![id.to_string(), owner.as_str()],
            StoredRow::from_row,
        )
        .optional()?;
    row.map(StoredRow::into_record).transpose()
}

fn query_list(
    conn: &Connection,
    where_clause: &str,
    param: &str,
) -> StorageResult<Vec<DocumentRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM documents WHERE {where_clause} \
         ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![param], StoredRow::from_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?.into_record()?);
    }
    Ok(records)
}

fn not_found(id: &DocumentId) -> StorageError {
    StorageError::NotFound(id.to_string())
}

impl DocumentRepository for SqliteDocumentStore {
    fn find_document(&self, id: &DocumentId) -> StorageResult<Option<DocumentRecord>> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    fn find_document_owned_by(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> StorageResult<Option<DocumentRecord>> {
        let conn = self.lock()?;
        fetch_owned(&conn, id, owner)
    }

    fn update_visibility(
        &self,
        id: &DocumentId,
        owner: &UserId,
        visibility: Visibility,
    ) -> StorageResult<DocumentRecord> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE documents SET visibility = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
            params![
                visibility.as_str(),
                Timestamp::now().as_millis(),
                id.to_string(),
                owner.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(not_found(id));
        }
        fetch(&conn, id)?.ok_or_else(|| not_found(id))
    }

    fn update_password_protection(
        &self,
        id: &DocumentId,
        owner: &UserId,
        protection: PasswordProtection,
    ) -> StorageResult<DocumentRecord> {
        if let PasswordProtection::Enabled(token) = &protection {
            if token.is_empty() {
                return Err(ModelError::EmptyToken.into());
            }
        }

        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE documents SET download_password = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
            params![
                protection.token(),
                Timestamp::now().as_millis(),
                id.to_string(),
                owner.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(not_found(id));
        }
        fetch(&conn, id)?.ok_or_else(|| not_found(id))
    }

    fn insert_document(&self, record: &DocumentRecord) -> StorageResult<()> {
        record.validate()?;
        let size_bytes = i64::try_from(record.metadata.size_bytes)
            .map_err(|_| StorageError::InvalidData("size exceeds i64".to_string()))?;

        let conn = self.lock()?;
        let result = conn.execute(
            &format!("INSERT INTO documents ({SELECT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"),
            params![
                record.id.to_string(),
                record.owner_id.as_str(),
                record.visibility.as_str(),
                record.password_protection.token(),
                record.resource_locator,
                record.metadata.title,
                record.metadata.description,
                record.metadata.file_name,
                record.metadata.mime_type,
                size_bytes,
                record.created_at.as_millis(),
                record.updated_at.as_millis(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(StorageError::Duplicate(record.id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_document(&self, id: &DocumentId, owner: &UserId) -> StorageResult<DocumentRecord> {
        let conn = self.lock()?;
        let record = fetch_owned(&conn, id, owner)?.ok_or_else(|| not_found(id))?;
        conn.execute(
            "DELETE FROM documents WHERE id = ?1 AND owner_id = ?2",
            params![id.to_string(), owner.as_str()],
        )?;
        Ok(record)
    }

    fn list_owned_by(&self, owner: &UserId) -> StorageResult<Vec<DocumentRecord>> {
        let conn = self.lock()?;
        query_list(&conn, "owner_id = ?1", owner.as_str())
    }

    fn list_public(&self) -> StorageResult<Vec<DocumentRecord>> {
        let conn = self.lock()?;
        query_list(&conn, "visibility = ?1", Visibility::Public.as_str())
    }
}
