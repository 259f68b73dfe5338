//! In-memory saloon store mirrored to a snapshot after every mutation.
//!
//! Records keep insertion order and all lookups are linear scans. Each
//! mutating operation holds the write lock across the change and the
//! following persist, so snapshots are written in the same order the
//! changes were made. A failed persist does not roll the change back.

use std::sync::Arc;

use chrono::Utc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use super::SnapshotBackend;
use crate::errors::AppError;
use crate::models::{NewSaloon, Saloon, SaloonSetup, SaloonUpdate, DEFAULT_STATUS};

const ID_PREFIX: &str = "SAL-";

/// Canonical set of saloon records for the process lifetime.
pub struct SaloonStore {
    state: RwLock<StoreState>,
    snapshot: Arc<dyn SnapshotBackend>,
}

struct StoreState {
    saloons: Vec<Saloon>,
    /// Highest millisecond value handed out in an id, or found in a loaded one.
    last_id_millis: i64,
}

impl SaloonStore {
    /// Load the snapshot and build the store around it.
    pub async fn open(snapshot: Arc<dyn SnapshotBackend>) -> Result<Self, AppError> {
        let saloons = snapshot.load().await?;
        let last_id_millis = saloons
            .iter()
            .filter_map(|s| s.saloon_id.strip_prefix(ID_PREFIX)?.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Ok(Self {
            state: RwLock::new(StoreState {
                saloons,
                last_id_millis,
            }),
            snapshot,
        })
    }

    /// All saloons in insertion order.
    pub async fn list_all(&self) -> Vec<Saloon> {
        self.state.read().await.saloons.clone()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Saloon> {
        let state = self.state.read().await;
        state.saloons.iter().find(|s| s.saloon_id == id).cloned()
    }

    /// First saloon whose email and password both match exactly.
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> Option<Saloon> {
        let state = self.state.read().await;
        state
            .saloons
            .iter()
            .find(|s| {
                let email_match = s.email.as_bytes().ct_eq(email.as_bytes());
                let password_match = s.password.as_bytes().ct_eq(password.as_bytes());
                (email_match & password_match).into()
            })
            .cloned()
    }

    /// Register a new saloon with a fresh id and the default status.
    pub async fn create(&self, new_saloon: NewSaloon) -> Result<Saloon, AppError> {
        let mut state = self.state.write().await;

        let millis = Utc::now()
            .timestamp_millis()
            .max(state.last_id_millis + 1);
        state.last_id_millis = millis;

        let saloon = Saloon {
            saloon_id: format!("{}{}", ID_PREFIX, millis),
            saloon_name: new_saloon.saloon_name,
            email: new_saloon.email,
            contact: new_saloon.contact,
            password: new_saloon.password,
            status: DEFAULT_STATUS.to_string(),
            setup: None,
        };
        state.saloons.push(saloon.clone());
        tracing::info!(saloon_id = %saloon.saloon_id, "Saloon created");

        self.snapshot.persist(&state.saloons).await?;
        Ok(saloon)
    }

    /// Replace the five base fields of a saloon, keeping its id and setup.
    pub async fn update(&self, id: &str, update: SaloonUpdate) -> Result<Saloon, AppError> {
        let mut state = self.state.write().await;

        let saloon = state
            .saloons
            .iter_mut()
            .find(|s| s.saloon_id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        saloon.saloon_name = update.saloon_name;
        saloon.email = update.email;
        saloon.contact = update.contact;
        saloon.password = update.password;
        saloon.status = update.status;
        let updated = saloon.clone();
        tracing::info!(saloon_id = %id, "Saloon updated");

        self.snapshot.persist(&state.saloons).await?;
        Ok(updated)
    }

    /// Attach setup data, overwriting any earlier setup.
    pub async fn attach_setup(&self, id: &str, setup: SaloonSetup) -> Result<Saloon, AppError> {
        let mut state = self.state.write().await;

        let saloon = state
            .saloons
            .iter_mut()
            .find(|s| s.saloon_id == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        saloon.setup = Some(setup);
        let configured = saloon.clone();
        tracing::info!(saloon_id = %id, "Saloon setup attached");

        self.snapshot.persist(&state.saloons).await?;
        Ok(configured)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::store::memory::MemorySnapshot;
    use crate::store::JsonFileSnapshot;

    fn new_saloon(name: &str, email: &str, password: &str) -> NewSaloon {
        NewSaloon {
            saloon_name: name.to_string(),
            email: email.to_string(),
            contact: "123".to_string(),
            password: password.to_string(),
        }
    }

    fn update_with_status(status: &str) -> SaloonUpdate {
        SaloonUpdate {
            saloon_name: "Renamed".to_string(),
            email: "new@b.com".to_string(),
            contact: "456".to_string(),
            password: "pw2".to_string(),
            status: status.to_string(),
        }
    }

    fn setup() -> SaloonSetup {
        SaloonSetup {
            facebook_link: String::new(),
            geo_location: "0,0".to_string(),
            address: "X".to_string(),
            district: "Y".to_string(),
            city: "Z".to_string(),
            open_hours: vec![json!("9-5")],
        }
    }

    async fn memory_store() -> (SaloonStore, Arc<MemorySnapshot>) {
        let backend = Arc::new(MemorySnapshot::default());
        let store = SaloonStore::open(backend.clone()).await.unwrap();
        (store, backend)
    }

    #[tokio::test]
    async fn test_create_assigns_live_status_and_persists() {
        let (store, backend) = memory_store().await;

        let saloon = store
            .create(new_saloon("Joe's", "a@b.com", "pw"))
            .await
            .unwrap();

        assert!(saloon.saloon_id.starts_with("SAL-"));
        assert_eq!(saloon.status, "Live");
        assert!(saloon.setup.is_none());
        assert_eq!(backend.saved(), vec![saloon]);
    }

    #[tokio::test]
    async fn test_ids_are_unique_in_a_burst() {
        let (store, _backend) = memory_store().await;

        let mut ids = HashSet::new();
        for i in 0..50 {
            let saloon = store
                .create(new_saloon(&format!("Saloon {}", i), "a@b.com", "pw"))
                .await
                .unwrap();
            ids.insert(saloon.saloon_id);
        }

        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn test_ids_continue_after_loaded_records() {
        let future_millis = Utc::now().timestamp_millis() + 60_000;
        let existing = Saloon {
            saloon_id: format!("SAL-{}", future_millis),
            saloon_name: "Old".to_string(),
            email: "old@b.com".to_string(),
            contact: "123".to_string(),
            password: "pw".to_string(),
            status: DEFAULT_STATUS.to_string(),
            setup: None,
        };

        let backend = Arc::new(MemorySnapshot::with(vec![existing]));
        let store = SaloonStore::open(backend).await.unwrap();
        let created = store
            .create(new_saloon("New", "new@b.com", "pw"))
            .await
            .unwrap();

        assert_eq!(created.saloon_id, format!("SAL-{}", future_millis + 1));
    }

    #[tokio::test]
    async fn test_duplicate_emails_are_allowed() {
        let (store, _backend) = memory_store().await;

        store.create(new_saloon("A", "a@b.com", "pw")).await.unwrap();
        store.create(new_saloon("B", "a@b.com", "pw")).await.unwrap();

        assert_eq!(store.list_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (store, _backend) = memory_store().await;

        for name in ["Zeta", "Alpha", "Mid"] {
            store.create(new_saloon(name, "a@b.com", "pw")).await.unwrap();
        }

        let names: Vec<_> = store
            .list_all()
            .await
            .into_iter()
            .map(|s| s.saloon_name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn test_find_by_credentials_is_exact() {
        let (store, _backend) = memory_store().await;
        let saloon = store
            .create(new_saloon("Joe's", "a@b.com", "pw"))
            .await
            .unwrap();

        assert_eq!(
            store.find_by_credentials("a@b.com", "pw").await,
            Some(saloon)
        );
        assert!(store.find_by_credentials("A@B.com", "pw").await.is_none());
        assert!(store.find_by_credentials("a@b.com", "PW").await.is_none());
        assert!(store.find_by_credentials("x@b.com", "pw").await.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_unchanged() {
        let (store, backend) = memory_store().await;
        store.create(new_saloon("Joe's", "a@b.com", "pw")).await.unwrap();
        let before = store.list_all().await;

        let result = store.update("SAL-0", update_with_status("Closed")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(store.list_all().await, before);
        assert_eq!(backend.saved(), before);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_setup() {
        let (store, _backend) = memory_store().await;
        let saloon = store
            .create(new_saloon("Joe's", "a@b.com", "pw"))
            .await
            .unwrap();
        store.attach_setup(&saloon.saloon_id, setup()).await.unwrap();

        let updated = store
            .update(&saloon.saloon_id, update_with_status("Closed"))
            .await
            .unwrap();

        assert_eq!(updated.saloon_id, saloon.saloon_id);
        assert_eq!(updated.saloon_name, "Renamed");
        assert_eq!(updated.email, "new@b.com");
        assert_eq!(updated.contact, "456");
        assert_eq!(updated.password, "pw2");
        assert_eq!(updated.status, "Closed");
        assert_eq!(updated.setup, Some(setup()));
    }

    #[tokio::test]
    async fn test_attach_setup_overwrites_previous_setup() {
        let (store, _backend) = memory_store().await;
        let saloon = store
            .create(new_saloon("Joe's", "a@b.com", "pw"))
            .await
            .unwrap();
        store.attach_setup(&saloon.saloon_id, setup()).await.unwrap();

        let mut second = setup();
        second.city = "Elsewhere".to_string();
        second.facebook_link = "https://facebook.com/joes".to_string();
        store
            .attach_setup(&saloon.saloon_id, second.clone())
            .await
            .unwrap();

        let stored = store.find_by_id(&saloon.saloon_id).await.unwrap();
        assert_eq!(stored.saloon_name, "Joe's");
        assert_eq!(stored.setup, Some(second));
    }

    #[tokio::test]
    async fn test_attach_setup_unknown_id() {
        let (store, _backend) = memory_store().await;

        let result = store.attach_setup("SAL-404", setup()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_persist_keeps_in_memory_change() {
        let (store, backend) = memory_store().await;
        backend.fail_writes(true);

        let result = store.create(new_saloon("Joe's", "a@b.com", "pw")).await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
        assert_eq!(store.list_all().await.len(), 1);
        assert!(backend.saved().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_from_file_restores_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saloons.json");

        let first = SaloonStore::open(Arc::new(JsonFileSnapshot::new(&path)))
            .await
            .unwrap();
        let a = first.create(new_saloon("A", "a@b.com", "pw")).await.unwrap();
        let b = first.create(new_saloon("B", "b@b.com", "pw")).await.unwrap();
        first.attach_setup(&b.saloon_id, setup()).await.unwrap();
        let expected = first.list_all().await;

        let reopened = SaloonStore::open(Arc::new(JsonFileSnapshot::new(&path)))
            .await
            .unwrap();

        assert_eq!(reopened.list_all().await, expected);
        assert_eq!(reopened.find_by_id(&a.saloon_id).await, Some(a));
    }
}
