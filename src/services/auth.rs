use crate::{
    error::{AppError, AppResult},
    models::{Session, User},
    storage::{Storage, StorageKey},
};

/// Local user registry with a single persisted session
#[derive(Clone)]
pub struct AuthService {
    storage: Storage,
}

fn required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

impl AuthService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    async fn users(&self) -> AppResult<Vec<User>> {
        Ok(self
            .storage
            .load::<Vec<User>>(&StorageKey::Users)
            .await?
            .unwrap_or_default())
    }

    async fn start_session(&self, session: &Session) -> AppResult<()> {
        self.storage.save(&StorageKey::Session, session).await
    }

    /// Adds a user and signs them in. Emails are unique ignoring case.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Session> {
        required("Name", name)?;
        required("Email", email)?;
        required("Password", password)?;

        let email = email.trim();
        let mut users = self.users().await?;
        if users.iter().any(|u| u.has_email(email)) {
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            name: name.trim().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let session = user.session();
        users.push(user);

        self.storage.save(&StorageKey::Users, &users).await?;
        self.start_session(&session).await?;

        tracing::info!(email = %session.email, "User registered");
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let users = self.users().await?;
        let user = users
            .iter()
            .find(|u| u.has_email(email.trim()))
            .filter(|u| u.password == password)
            .ok_or(AppError::InvalidCredentials)?;

        let session = user.session();
        self.start_session(&session).await?;

        tracing::info!(email = %session.email, "User logged in");
        Ok(session)
    }

    /// Ends the session. Profiles and library data stay in storage.
    pub async fn logout(&self) -> AppResult<()> {
        self.storage.remove(&StorageKey::Session).await?;
        tracing::info!("User logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> AppResult<Option<Session>> {
        self.storage.load(&StorageKey::Session).await
    }
}
