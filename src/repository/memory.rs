use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Task, User};
use crate::error::AppError;
use crate::repository::{TaskRepository, UserRepository};

/// In-memory implementation of [`UserRepository`].
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), AppError> {
        self.users.write().unwrap().push(user.clone());
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().unwrap();
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().unwrap().clone())
    }
}

/// In-memory implementation of [`TaskRepository`].
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.write().unwrap().push(task.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().unwrap();
        Ok(tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.tasks.write().unwrap().retain(|task| task.id() != id);
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().unwrap();
        if let Some(existing) = tasks.iter_mut().find(|existing| existing.id() == task.id()) {
            *existing = task.clone();
        }
        Ok(())
    }

    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().unwrap();
        Ok(tasks
            .iter()
            .filter(|task| match user_id {
                Some(user_id) => task.users.contains(&user_id),
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn user(name: &str) -> User {
        User::new(
            name.to_string(),
            format!("{}@example.com", name),
            "hashed-password".to_string(),
            true,
        )
        .unwrap()
    }

    fn task_for(user_id: Uuid) -> Task {
        let mut users = BTreeSet::new();
        users.insert(user_id);
        Task::new("A task".to_string(), "Something to do.".to_string(), users).unwrap()
    }

    #[actix_rt::test]
    async fn test_user_round_trip() {
        let repo = InMemoryUserRepository::new();
        let user = user("alice");
        repo.save(&user).await.unwrap();

        let by_id = repo.get_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(by_id, user);

        let by_email = repo.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, user);

        let by_username = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_username, user);

        assert!(repo.get_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_task_round_trip_and_delete() {
        let repo = InMemoryTaskRepository::new();
        let task = task_for(Uuid::new_v4());
        repo.save(&task).await.unwrap();

        let fetched = repo.get_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(fetched, task);

        repo.delete(task.id()).await.unwrap();
        assert!(repo.get_by_id(task.id()).await.unwrap().is_none());
    }

    #[actix_rt::test]
    async fn test_task_update_replaces_existing() {
        let repo = InMemoryTaskRepository::new();
        let mut task = task_for(Uuid::new_v4());
        repo.save(&task).await.unwrap();

        task.update(Some("Renamed".to_string()), None, None).unwrap();
        repo.update(&task).await.unwrap();

        let fetched = repo.get_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Renamed");
    }

    #[actix_rt::test]
    async fn test_list_scoped_to_user() {
        let repo = InMemoryTaskRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mine = task_for(alice);
        let theirs = task_for(bob);
        repo.save(&mine).await.unwrap();
        repo.save(&theirs).await.unwrap();

        let visible = repo.list(Some(alice)).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0], mine);

        let all = repo.list(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
