use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::ResetError;

/// Row of the `verification_codes` table. Records are created and deleted,
/// never updated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCodeRecord {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationCodeRecord {
    pub fn issue(
        email: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            email: email.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }
}

/// A record is usable strictly before its expiry instant.
pub fn is_code_valid(record: &VerificationCodeRecord, now: DateTime<Utc>) -> bool {
    now < record.expires_at
}

/// Random numeric code of `len` digits, drawn from v4 UUIDs (the browser's
/// CSPRNG on wasm).
pub fn generate_code(len: usize) -> String {
    let mut code = String::with_capacity(len);
    while code.len() < len {
        let mut entropy = Uuid::new_v4().as_u128();
        for _ in 0..30 {
            if code.len() == len {
                break;
            }
            code.push(char::from(b'0' + (entropy % 10) as u8));
            entropy /= 10;
        }
    }
    code
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait(?Send)]
pub trait CodeStore {
    async fn store_code(
        &self,
        record: VerificationCodeRecord,
    ) -> Result<VerificationCodeRecord, ResetError>;
    async fn lookup_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationCodeRecord>, ResetError>;
    async fn delete_code(&self, email: &str) -> Result<(), ResetError>;
}

/// Delivers a freshly issued code to the user.
#[async_trait(?Send)]
pub trait CodeMailer {
    async fn send_code(&self, email: &str, code: &str) -> Result<(), ResetError>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Keyed by normalized email; storing a new code replaces the previous one.
#[derive(Debug, Default)]
pub struct MemoryCodeStore {
    records: RefCell<HashMap<String, VerificationCodeRecord>>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn get(&self, email: &str) -> Option<VerificationCodeRecord> {
        self.records.borrow().get(&normalize_email(email)).cloned()
    }
}

#[async_trait(?Send)]
impl CodeStore for MemoryCodeStore {
    async fn store_code(
        &self,
        record: VerificationCodeRecord,
    ) -> Result<VerificationCodeRecord, ResetError> {
        self.records
            .borrow_mut()
            .insert(normalize_email(&record.email), record.clone());
        Ok(record)
    }

    async fn lookup_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationCodeRecord>, ResetError> {
        Ok(self
            .records
            .borrow()
            .get(&normalize_email(email))
            .filter(|record| record.code == code)
            .cloned())
    }

    async fn delete_code(&self, email: &str) -> Result<(), ResetError> {
        self.records.borrow_mut().remove(&normalize_email(email));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, h, m, s).unwrap()
    }

    #[test]
    fn issued_record_expires_after_ttl() {
        let record = VerificationCodeRecord::issue(
            "a@b.com",
            "123456",
            at(10, 0, 0),
            Duration::minutes(30),
        );
        assert_eq!(record.created_at, at(10, 0, 0));
        assert_eq!(record.expires_at, at(10, 30, 0));
    }

    #[test]
    fn validity_is_strict_at_the_expiry_instant() {
        let record = VerificationCodeRecord::issue(
            "a@b.com",
            "123456",
            at(10, 0, 0),
            Duration::minutes(30),
        );
        assert!(is_code_valid(&record, at(10, 29, 59)));
        assert!(!is_code_valid(&record, at(10, 30, 0)));
        assert!(!is_code_valid(&record, at(10, 30, 1)));
    }

    #[test]
    fn validity_compares_instants_across_offsets() {
        let record = VerificationCodeRecord::issue(
            "a@b.com",
            "123456",
            at(10, 0, 0),
            Duration::minutes(30),
        );
        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let local = tokyo.with_ymd_and_hms(2026, 3, 1, 19, 29, 0).unwrap();
        assert!(is_code_valid(&record, local.with_timezone(&Utc)));
    }

    #[test]
    fn generated_codes_are_numeric_with_requested_length() {
        for len in [4, 6, 8, 40] {
            let code = generate_code(len);
            assert_eq!(code.len(), len);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, h, m, s).unwrap()
    }

    #[tokio::test]
    async fn memory_store_keeps_one_record_per_email() {
        let store = MemoryCodeStore::new();
        let ttl = Duration::minutes(30);
        let first = VerificationCodeRecord::issue("A@b.com", "111111", at(10, 0, 0), ttl);
        let second = VerificationCodeRecord::issue("a@b.com ", "222222", at(10, 5, 0), ttl);
        store.store_code(first).await.unwrap();
        store.store_code(second).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.lookup_code("a@b.com", "111111").await.unwrap().is_none());
        let found = store
            .lookup_code("a@b.com", "222222")
            .await
            .unwrap()
            .expect("latest code");
        assert_eq!(found.created_at, at(10, 5, 0));
    }

    #[tokio::test]
    async fn memory_store_delete_removes_record() {
        let store = MemoryCodeStore::new();
        store
            .store_code(VerificationCodeRecord::issue(
                "a@b.com",
                "123456",
                at(10, 0, 0),
                Duration::minutes(30),
            ))
            .await
            .unwrap();
        store.delete_code("a@b.com").await.unwrap();
        assert!(store.is_empty());
        assert!(store.get("a@b.com").is_none());
    }
}
