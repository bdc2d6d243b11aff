//! Shared fixtures for the HTTP tests: in-memory backends, a bootstrapped
//! superadmin and small request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use serde_json::Value;

use bo_api::AppState;
use bo_api::Backends;
use bo_core::domain::entities::admin::Admin;
use bo_core::domain::entities::contractor::{Contractor, ContractorProfile};
use bo_core::domain::entities::store::{Store, StoreProfile};
use bo_core::repositories::{
    ContractorRepository, InMemoryAdminRepository, InMemoryContractorRepository,
    InMemoryLookupRepository, InMemoryStoreRepository, InMemoryTestimonialRepository,
    InMemoryUserRepository, StoreRepository,
};
use bo_core::services::auth::{BcryptPasswordHasher, InMemoryLoginRateLimiter};
use bo_core::services::notification::RecordingPublisher;
use bo_core::services::storage::InMemoryAssetStorage;
use bo_shared::{AppConfig, BootstrapConfig, Environment, LoginLockConfig};

pub const SUPERADMIN_EMAIL: &str = "root@backoffice.test";
pub const SUPERADMIN_PASSWORD: &str = "RootPassw0rd!";
pub const BOUNDARY: &str = "----backoffice-test-boundary";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub config: AppConfig,
    pub events: Arc<RecordingPublisher>,
    pub storage: Arc<InMemoryAssetStorage>,
    pub admins: Arc<InMemoryAdminRepository>,
    pub contractors: Arc<InMemoryContractorRepository>,
    pub stores: Arc<InMemoryStoreRepository>,
    pub superadmin: Admin,
}

impl TestContext {
    pub async fn new() -> Self {
        let mut config = AppConfig::for_environment(Environment::Development);
        config.auth.bcrypt_cost = 4;
        config.auth.login_lock = LoginLockConfig {
            max_failures: 3,
            window_seconds: 60,
            lock_seconds: 60,
        };

        let events = Arc::new(RecordingPublisher::new());
        let storage = Arc::new(InMemoryAssetStorage::new());
        let admins = Arc::new(InMemoryAdminRepository::new());
        let contractors = Arc::new(InMemoryContractorRepository::new());
        let stores = Arc::new(InMemoryStoreRepository::new());

        let backends = Backends {
            admins: admins.clone(),
            users: Arc::new(InMemoryUserRepository::new()),
            contractors: contractors.clone(),
            stores: stores.clone(),
            lookups: Arc::new(InMemoryLookupRepository::new()),
            testimonials: Arc::new(InMemoryTestimonialRepository::new()),
            login_limiter: Arc::new(InMemoryLoginRateLimiter::new(
                config.auth.login_lock.clone(),
            )),
            storage: storage.clone(),
            hasher: Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
            notifier: events.clone(),
            health_checks: Vec::new(),
        };
        let state = web::Data::new(AppState::new(&config, backends));

        let superadmin = state
            .admins
            .bootstrap(&BootstrapConfig {
                fullname: "Root Admin".to_string(),
                email: SUPERADMIN_EMAIL.to_string(),
                password: SUPERADMIN_PASSWORD.to_string(),
                unique_id: "ADM-001".to_string(),
            })
            .await
            .expect("bootstrap")
            .expect("superadmin created");

        Self {
            state,
            config,
            events,
            storage,
            admins,
            contractors,
            stores,
            superadmin,
        }
    }

    /// Session token for the bootstrapped superadmin
    pub async fn superadmin_token(&self) -> String {
        self.login(SUPERADMIN_EMAIL, SUPERADMIN_PASSWORD).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        self.state
            .auth
            .login(email, password)
            .await
            .expect("login")
            .token
    }

    pub async fn seed_store(&self, name: &str) -> Store {
        self.stores
            .create(Store::new(StoreProfile {
                store_name: name.to_string(),
                owner_name: "Priya Nair".to_string(),
                email: format!("{}@stores.test", name.to_lowercase().replace(' ', "-")),
                phone: "0400111222".to_string(),
                address: "12 Market Street".to_string(),
                city: "Kochi".to_string(),
                state: "Kerala".to_string(),
                country: "India".to_string(),
                gst_number: "32ABCDE1234F1Z5".to_string(),
                store_license: "licences/store.pdf".to_string(),
                gst_document: "gst/store.pdf".to_string(),
            }))
            .await
            .expect("seed store")
    }

    pub async fn seed_contractor(&self, company: &str) -> Contractor {
        self.contractors
            .create(Contractor::new(ContractorProfile {
                company_name: company.to_string(),
                contractor_name: "Arun Kumar".to_string(),
                email: format!("{}@contractors.test", company.to_lowercase().replace(' ', "-")),
                phone: "0400333444".to_string(),
                gst_number: "29ABCDE1234F1Z5".to_string(),
                job_types: vec!["Plumbing".to_string()],
                number_of_employees: 12,
                address: "4 Lake Road".to_string(),
                city: "Bengaluru".to_string(),
                state: "Karnataka".to_string(),
                country: "India".to_string(),
            }))
            .await
            .expect("seed contractor")
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// One part of a hand-built multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub fn image_part<'a>(bytes: &'a [u8]) -> Part<'a> {
    Part::File {
        name: "image",
        file_name: "photo.png",
        content_type: "image/png",
        bytes,
    }
}

/// Content-Type header value and body for a multipart form
pub fn multipart(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// `data.items` of a listing response
pub fn items(body: &Value) -> &Vec<Value> {
    body["data"]["items"].as_array().expect("items array")
}
