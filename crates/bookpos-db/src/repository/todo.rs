//! Todo list scaffolding, persisted on the store like everything else so it
//! survives restarts.

use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};
use bookpos_core::validation::validate_todo_title;
use bookpos_core::Todo;

#[derive(Debug, Clone)]
pub struct TodoRepository {
    pool: SqlitePool,
}

impl TodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TodoRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Todo>> {
        let todos =
            sqlx::query_as::<_, Todo>("SELECT id, title, completed FROM todos ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(todos)
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Todo>> {
        let todo =
            sqlx::query_as::<_, Todo>("SELECT id, title, completed FROM todos WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(todo)
    }

    pub async fn create(&self, title: &str) -> DbResult<Todo> {
        let title = validate_todo_title(title)?;

        let result = sqlx::query("INSERT INTO todos (title, completed) VALUES (?1, 0)")
            .bind(&title)
            .execute(&self.pool)
            .await?;

        Ok(Todo {
            id: result.last_insert_rowid(),
            title,
            completed: false,
        })
    }

    /// Partial update: only the provided fields change.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        completed: Option<bool>,
    ) -> DbResult<Todo> {
        let mut todo = self.get(id).await?.ok_or_else(|| DbError::not_found("Todo", id))?;

        if let Some(title) = title {
            todo.title = validate_todo_title(title)?;
        }
        if let Some(completed) = completed {
            todo.completed = completed;
        }

        sqlx::query("UPDATE todos SET title = ?2, completed = ?3 WHERE id = ?1")
            .bind(id)
            .bind(&todo.title)
            .bind(todo.completed)
            .execute(&self.pool)
            .await?;

        Ok(todo)
    }

    /// Deletes a todo and returns the deleted row.
    pub async fn delete(&self, id: i64) -> DbResult<Todo> {
        let todo = self.get(id).await?.ok_or_else(|| DbError::not_found("Todo", id))?;

        sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_todo_lifecycle() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let todos = db.todos();

        let created = todos.create("Restock pens").await.unwrap();
        assert!(!created.completed);

        let updated = todos.update(created.id, None, Some(true)).await.unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Restock pens");

        let deleted = todos.delete(created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(todos.list().await.unwrap().is_empty());

        assert!(matches!(
            todos.delete(created.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_title_required() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(matches!(
            db.todos().create("  ").await.unwrap_err(),
            DbError::Validation(_)
        ));
    }
}
