use std::sync::Arc;
use uuid::Uuid;

use crate::auth;
use crate::db::UserRepository;
use crate::db::entity::user;
use crate::error::{ AppError, Result };

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub country: String,
    pub phone: String,
    pub password: String,
}

pub struct AccountService {
    users: Arc<UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, input: NewUser) -> Result<user::Model> {
        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();
        let country = input.country.trim().to_string();
        let phone = input.phone.trim().to_string();
        let email = input.email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        validate_name("first_name", &first_name)?;
        validate_name("last_name", &last_name)?;
        if country.is_empty() {
            return Err(AppError::field("country", "Country is required"));
        }
        validate_phone(&phone)?;
        if let Some(email) = &email {
            validate_email(email)?;
        }
        validate_password(&input.password)?;

        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::field("phone", "User already exists with this phone number"));
        }
        if let Some(email) = &email {
            if self.users.find_by_email(email).await?.is_some() {
                return Err(
                    AppError::field("email", "User already exists with this email address")
                );
            }
        }

        let password_hash = auth::hash_password(&input.password)?;

        self.users.create(first_name, last_name, email, country, phone, password_hash).await
    }

    /// One failure message for unknown phone and bad password alike.
    pub async fn login(&self, phone: &str, password: &str) -> Result<user::Model> {
        let user = self.users
            .find_by_phone(phone.trim()).await?
            .ok_or(AppError::Unauthorized("Invalid credentials"))?;

        if !auth::verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid credentials"));
        }

        Ok(user)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<user::Model> {
        self.users.find_by_id(user_id).await
    }
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.len() < 2 || value.len() > 50 {
        return Err(AppError::field(field, "Must be between 2 and 50 characters"));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<()> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::field("phone", "Please provide a valid phone number"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(AppError::field("email", "Please provide a valid email address"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AppError::field("password", "Password must be at least 8 characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("4915123456789").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("+1555-123-4567").is_err());
        assert!(validate_phone("not a phone").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("trader@example.com").is_ok());
        assert!(validate_email("trader").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("trader@nodot").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("S3cure-pass!").is_ok());
        assert!(validate_password("short").is_err());
    }
}
