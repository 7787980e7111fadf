use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{NewTask, NewUser, Task, User};

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL,
        full_name TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

    CREATE TABLE IF NOT EXISTS todolist (
        id INTEGER PRIMARY KEY,
        task_name TEXT NOT NULL,
        task_description TEXT NOT NULL,
        status TEXT NOT NULL,
        owner_username TEXT NOT NULL REFERENCES users(username)
    );
    CREATE INDEX IF NOT EXISTS idx_todolist_owner ON todolist(owner_username);
";

/// Credential and task store on top of a pooled SQLite database.
///
/// Every operation checks a connection out of the pool, runs on the blocking
/// thread pool, and returns the connection when it finishes.
#[derive(Clone)]
pub struct DbService {
    pool: DbPool,
}

impl DbService {
    /// Open the database file, creating the tables if they are missing.
    pub fn open(config: &DatabaseConfig) -> AppResult<Self> {
        let manager = SqliteConnectionManager::file(&config.path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        });
        let pool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .build(manager)?;

        let conn = pool.get()?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch(SCHEMA)?;
        tracing::info!("Database ready at {}", config.path.display());

        Ok(Self { pool })
    }

    async fn with_conn<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await?
    }

    pub async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        let username = username.to_string();
        self.with_conn(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, username, hashed_password, full_name FROM users WHERE username = ?1",
                    params![username],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            username: row.get(1)?,
                            password_hash: row.get(2)?,
                            full_name: row.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
        .await
    }

    /// Insert a user. A taken username comes back as `AppError::Conflict`,
    /// including when a concurrent insert wins the race.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        self.with_conn(move |conn| {
            let result = conn.execute(
                "INSERT INTO users (username, hashed_password, full_name) VALUES (?1, ?2, ?3)",
                params![new_user.username, new_user.password_hash, new_user.full_name],
            );

            match result {
                Ok(_) => Ok(User {
                    id: conn.last_insert_rowid(),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    full_name: new_user.full_name,
                }),
                Err(e) => Err(user_insert_error(e)),
            }
        })
        .await
    }

    pub async fn create_task(&self, new_task: NewTask) -> AppResult<Task> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO todolist (task_name, task_description, status, owner_username)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    new_task.task_name,
                    new_task.task_description,
                    new_task.status,
                    new_task.owner_username
                ],
            )?;

            Ok(Task {
                id: conn.last_insert_rowid(),
                task_name: new_task.task_name,
                task_description: new_task.task_description,
                status: new_task.status,
                owner_username: new_task.owner_username,
            })
        })
        .await
    }

    /// Tasks owned by `owner`, in insertion order.
    pub async fn list_tasks(&self, owner: &str) -> AppResult<Vec<Task>> {
        let owner = owner.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, task_name, task_description, status, owner_username
                 FROM todolist WHERE owner_username = ?1 ORDER BY id",
            )?;
            let tasks = stmt
                .query_map(params![owner], |row| {
                    Ok(Task {
                        id: row.get(0)?,
                        task_name: row.get(1)?,
                        task_description: row.get(2)?,
                        status: row.get(3)?,
                        owner_username: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
        .await
    }
}

// Only the username uniqueness constraint means "taken"; NOT NULL, foreign
// key and other constraint failures stay database errors.
fn user_insert_error(err: rusqlite::Error) -> AppError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            AppError::Conflict("Username already registered".into())
        }
        err => AppError::Database(err),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Fresh database in a temporary directory. Keep the `TempDir` alive for
    /// as long as the service is used.
    pub(crate) fn test_db() -> (DbService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("test.db"),
            pool_size: 2,
        };
        (DbService::open(&config).unwrap(), dir)
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
        }
    }

    fn new_task(name: &str, owner: &str) -> NewTask {
        NewTask {
            task_name: name.to_string(),
            task_description: "desc".to_string(),
            status: "open".to_string(),
            owner_username: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_user() {
        let (db, _dir) = test_db();
        let created = db
            .create_user(NewUser {
                full_name: Some("Alice Liddell".into()),
                ..new_user("alice")
            })
            .await
            .unwrap();

        let fetched = db.get_user("alice").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.full_name.as_deref(), Some("Alice Liddell"));
        assert!(db.get_user("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let (db, _dir) = test_db();
        db.create_user(new_user("alice")).await.unwrap();
        let err = db.create_user(new_user("alice")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    fn sqlite_failure(extended_code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(extended_code), None)
    }

    #[test]
    fn only_unique_violations_become_conflicts() {
        let unique = user_insert_error(sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE));
        assert!(matches!(unique, AppError::Conflict(_)));

        for code in [
            rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL,
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            rusqlite::ffi::SQLITE_CONSTRAINT_CHECK,
        ] {
            let err = user_insert_error(sqlite_failure(code));
            assert!(matches!(err, AppError::Database(_)), "code {} became {:?}", code, err);
        }
    }

    #[tokio::test]
    async fn user_ids_are_unique() {
        let (db, _dir) = test_db();
        let a = db.create_user(new_user("alice")).await.unwrap();
        let b = db.create_user(new_user("bob")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn list_tasks_filters_by_owner_in_insertion_order() {
        let (db, _dir) = test_db();
        db.create_user(new_user("alice")).await.unwrap();
        db.create_user(new_user("bob")).await.unwrap();

        let first = db.create_task(new_task("first", "alice")).await.unwrap();
        db.create_task(new_task("theirs", "bob")).await.unwrap();
        let second = db.create_task(new_task("second", "alice")).await.unwrap();

        let tasks = db.list_tasks("alice").await.unwrap();
        assert_eq!(tasks, vec![first, second]);
        assert!(tasks.iter().all(|t| t.owner_username == "alice"));
    }

    #[tokio::test]
    async fn list_tasks_for_user_without_tasks_is_empty() {
        let (db, _dir) = test_db();
        db.create_user(new_user("alice")).await.unwrap();
        assert!(db.list_tasks("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn task_owner_must_exist() {
        let (db, _dir) = test_db();
        let err = db.create_task(new_task("orphan", "nobody")).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
