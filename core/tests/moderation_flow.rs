//! End-to-end moderation flow: service → outbox → worker → email sender

use std::sync::Arc;
use std::time::Duration;

use bo_core::domain::entities::contractor::{Contractor, ContractorProfile, RegistrationStep};
use bo_core::domain::entities::store::{Store, StoreProfile};
use bo_core::repositories::{
    ContractorRepository, InMemoryContractorRepository, InMemoryStoreRepository, StoreRepository,
};
use bo_core::services::contractor::ContractorService;
use bo_core::services::notification::{
    NotificationWorker, Outbox, RecordingEmailSender, RetryPolicy,
};
use bo_core::services::store::StoreService;

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn store_review_emails_owner_once_per_change() {
    let (outbox, receiver) = Outbox::channel(16);
    let sender = Arc::new(RecordingEmailSender::new());
    let worker = tokio::spawn(NotificationWorker::new(receiver, sender.clone(), fast_policy()).run());

    let stores = Arc::new(InMemoryStoreRepository::new());
    let store = stores
        .create(Store::new(StoreProfile {
            store_name: "Corner Hardware".to_string(),
            owner_name: "Olive".to_string(),
            email: "olive@corner.test".to_string(),
            ..StoreProfile::default()
        }))
        .await
        .unwrap();

    let service = StoreService::new(stores.clone(), Arc::new(outbox));
    service.reject(store.id, "Incomplete documents").await.unwrap();
    service.reject(store.id, "Incomplete documents").await.unwrap();
    service.reopen(store.id).await.unwrap();
    service.approve(store.id).await.unwrap();
    service.approve(store.id).await.unwrap();

    // Dropping the last outbox handle lets the worker drain and stop
    drop(service);
    worker.await.unwrap();

    let sent = sender.sent_messages();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "olive@corner.test");
    assert_eq!(sent[0].subject, "Your store registration was not approved");
    assert!(sent[0].text.contains("Reason: Incomplete documents"));
    assert_eq!(sent[1].subject, "Your store registration has been approved");
}

#[tokio::test]
async fn contractor_emails_mention_the_step() {
    let (outbox, receiver) = Outbox::channel(16);
    let sender = Arc::new(RecordingEmailSender::new());
    let worker = tokio::spawn(NotificationWorker::new(receiver, sender.clone(), fast_policy()).run());

    let contractors = Arc::new(InMemoryContractorRepository::new());
    let contractor = contractors
        .create(Contractor::new(ContractorProfile {
            company_name: "Acme Builders".to_string(),
            contractor_name: "Ada".to_string(),
            email: "ada@acme.test".to_string(),
            ..ContractorProfile::default()
        }))
        .await
        .unwrap();

    let service = ContractorService::new(contractors.clone(), Arc::new(outbox));
    service
        .approve_step(RegistrationStep::One, contractor.id)
        .await
        .unwrap();
    service
        .submit_documents(
            contractor.id,
            "https://files.test/license.pdf",
            "https://files.test/gst.pdf",
        )
        .await
        .unwrap();
    service
        .reject_step(RegistrationStep::Two, contractor.id, "Licence expired")
        .await
        .unwrap();

    drop(service);
    worker.await.unwrap();

    let sent = sender.sent_messages();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].text.contains("registration step 1"));
    assert!(sent[1].text.contains("registration step 2"));
    assert!(sent[1].text.contains("Reason: Licence expired"));
}
