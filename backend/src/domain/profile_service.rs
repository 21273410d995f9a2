//! Profile of the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserProfileQuery, UserRepository};
use crate::domain::{Error, User, UserId};

/// Profile service backed by the user repository.
pub struct ProfileService<U> {
    users: Arc<U>,
}

impl<U> ProfileService<U> {
    /// Create a new service over `users`.
    pub const fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserProfileQuery for ProfileService<U>
where
    U: UserRepository,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn returns_the_stored_user() {
        let user = User::try_from_strings(
            "123e4567-e89b-12d3-a456-426614174000",
            "admin@pantrie.local",
            "Pantrie Admin",
        )
        .expect("user");
        let expected = user.clone();
        let mut users = MockUserRepository::new();
        users.expect_find().return_once(move |_| Ok(Some(user)));

        let service = ProfileService::new(Arc::new(users));
        let profile = service
            .fetch_profile(expected.id())
            .await
            .expect("profile");
        assert_eq!(profile, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_are_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find().return_once(|_| Ok(None));

        let service = ProfileService::new(Arc::new(users));
        let err = service
            .fetch_profile(&UserId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
