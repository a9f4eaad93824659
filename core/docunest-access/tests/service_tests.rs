use docunest_access::{
    AccessEngine, AccessError, Caller, Decision, Denial, DocumentService, NewUpload, Operation,
    PasswordSetting,
};
use docunest_blobstore::{MemoryStorage, StorageProvider, UploadPolicy};
use docunest_crypto::{KdfParams, PasswordCipher, PasswordVerifier, ServerSecret};
use docunest_model::Visibility;
use docunest_storage::{DocumentRepository, MemoryDocumentStore};
use docunest_types::{DocumentId, UserId};
use std::sync::Arc;

struct Fixture {
    documents: Arc<MemoryDocumentStore>,
    storage: Arc<MemoryStorage>,
    service: DocumentService,
    engine: AccessEngine,
}

impl Fixture {
    fn new() -> Self {
        Self::with_policy(UploadPolicy::default())
    }

    fn with_policy(policy: UploadPolicy) -> Self {
        let secret = ServerSecret::new("service-secret").unwrap();
        let cipher = Arc::new(PasswordCipher::with_params(&secret, &KdfParams::fast()).unwrap());
        let documents = Arc::new(MemoryDocumentStore::new());
        let storage = Arc::new(MemoryStorage::new());
        let service = DocumentService::new(documents.clone(), storage.clone(), cipher.clone(), policy);
        let engine = AccessEngine::new(
            documents.clone(),
            storage.clone(),
            PasswordVerifier::new(cipher),
        );
        Self {
            documents,
            storage,
            service,
            engine,
        }
    }
}

fn alice() -> Caller {
    Caller::user(UserId::parse("alice").unwrap())
}

fn bob() -> Caller {
    Caller::user(UserId::parse("bob").unwrap())
}

fn pdf_upload() -> NewUpload {
    NewUpload {
        title: "  Contract  ".into(),
        description: Some("Signed copy".into()),
        file_name: "contract final.pdf".into(),
        content_type: "application/pdf".into(),
        bytes: b"%PDF-1.7 body".to_vec(),
        visibility: Visibility::Private,
        password: None,
    }
}

// ── Upload ──────────────────────────────────────────────────────

#[tokio::test]
async fn upload_stores_bytes_and_private_record() {
    let fx = Fixture::new();
    let view = fx.service.upload(&alice(), pdf_upload()).await.unwrap();

    assert_eq!(view.summary.title, "Contract");
    assert_eq!(view.summary.file_size, 13);
    assert_eq!(view.visibility, Visibility::Private);
    assert!(!view.summary.password_enabled);
    assert!(view.file_url.starts_with("memory://alice_"));
    assert!(view.file_url.ends_with("_contract_final_pdf"));

    let (bytes, content_type) = fx.storage.get(&view.file_url).await.unwrap();
    assert_eq!(bytes, b"%PDF-1.7 body");
    assert_eq!(content_type, "application/pdf");

    let record = fx.documents.find_document(&view.summary.id).unwrap().unwrap();
    assert_eq!(record.owner_id.as_str(), "alice");
    assert_eq!(record.resource_locator, view.file_url);
}

#[tokio::test]
async fn upload_with_password_stores_ciphertext_only() {
    let fx = Fixture::new();
    let mut upload = pdf_upload();
    upload.visibility = Visibility::Public;
    upload.password = Some("hunter2".into());
    let view = fx.service.upload(&alice(), upload).await.unwrap();
    assert!(view.summary.password_enabled);
    assert!(view.summary.is_public);

    let record = fx.documents.find_document(&view.summary.id).unwrap().unwrap();
    let token = record.password_protection.token().unwrap();
    assert!(!token.contains("hunter2"));
    assert!(token.contains(':'));

    let decision = fx
        .engine
        .decide(&Caller::Anonymous, &view.summary.id, Operation::Download, Some("hunter2"))
        .unwrap();
    assert!(decision.is_allowed());
}

#[tokio::test]
async fn anonymous_upload_is_rejected() {
    let fx = Fixture::new();
    let err = fx.service.upload(&Caller::Anonymous, pdf_upload()).await.unwrap_err();
    assert!(matches!(err, AccessError::Unauthenticated));
    assert!(fx.storage.is_empty().await);
}

#[tokio::test]
async fn upload_validation_failures_store_nothing() {
    let fx = Fixture::with_policy(UploadPolicy::new(8));
    let cases: Vec<Box<dyn Fn(&mut NewUpload)>> = vec![
        Box::new(|u: &mut NewUpload| u.title = "   ".into()),
        Box::new(|u: &mut NewUpload| u.file_name = String::new()),
        Box::new(|u: &mut NewUpload| u.content_type = "image/png".into()),
        Box::new(|u: &mut NewUpload| u.password = Some(String::new())),
        Box::new(|_: &mut NewUpload| {}),
    ];

    for mutate in cases {
        let mut upload = pdf_upload();
        mutate(&mut upload);
        let err = fx.service.upload(&alice(), upload).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidInput(_)), "{err}");
    }
    assert!(fx.storage.is_empty().await);
    assert!(fx.documents.is_empty().unwrap());
}

#[tokio::test]
async fn blank_description_is_dropped() {
    let fx = Fixture::new();
    let mut upload = pdf_upload();
    upload.description = Some("  ".into());
    let view = fx.service.upload(&alice(), upload).await.unwrap();
    assert_eq!(view.summary.description, None);
}

// ── Visibility ──────────────────────────────────────────────────

#[tokio::test]
async fn owner_toggles_visibility() {
    let fx = Fixture::new();
    let id = fx.service.upload(&alice(), pdf_upload()).await.unwrap().summary.id;

    let view = fx.service.set_visibility(&alice(), &id, Visibility::Public).unwrap();
    assert!(view.summary.is_public);
    assert!(fx
        .engine
        .decide(&Caller::Anonymous, &id, Operation::Metadata, None)
        .unwrap()
        .is_allowed());

    fx.service.set_visibility(&alice(), &id, Visibility::Private).unwrap();
    assert_eq!(
        fx.engine
            .decide(&Caller::Anonymous, &id, Operation::Metadata, None)
            .unwrap(),
        Decision::Deny(Denial::NotFound)
    );
}

#[tokio::test]
async fn non_owner_changes_look_like_missing_documents() {
    let fx = Fixture::new();
    let id = fx.service.upload(&alice(), pdf_upload()).await.unwrap().summary.id;

    let err = fx.service.set_visibility(&bob(), &id, Visibility::Public).unwrap_err();
    assert!(matches!(err, AccessError::NotFound));
    let err = fx
        .service
        .set_password(&bob(), &id, PasswordSetting::Enable(Some("x".into())))
        .unwrap_err();
    assert!(matches!(err, AccessError::NotFound));
    let err = fx.service.get(&bob(), &id).unwrap_err();
    assert!(matches!(err, AccessError::NotFound));
    let err = fx.service.delete(&bob(), &id).await.unwrap_err();
    assert!(matches!(err, AccessError::NotFound));

    let err = fx
        .service
        .set_visibility(&alice(), &DocumentId::new(), Visibility::Public)
        .unwrap_err();
    assert!(matches!(err, AccessError::NotFound));

    let record = fx.documents.find_document(&id).unwrap().unwrap();
    assert!(!record.is_public());
    assert!(!record.password_enabled());
}

#[tokio::test]
async fn anonymous_settings_changes_are_unauthenticated() {
    let fx = Fixture::new();
    let id = fx.service.upload(&alice(), pdf_upload()).await.unwrap().summary.id;
    assert!(matches!(
        fx.service.set_visibility(&Caller::Anonymous, &id, Visibility::Public),
        Err(AccessError::Unauthenticated)
    ));
    assert!(matches!(
        fx.service.list_mine(&Caller::Anonymous),
        Err(AccessError::Unauthenticated)
    ));
}

// ── Password settings ───────────────────────────────────────────

#[tokio::test]
async fn password_enable_replace_and_disable() {
    let fx = Fixture::new();
    let id = fx.service.upload(&alice(), pdf_upload()).await.unwrap().summary.id;
    fx.service.set_visibility(&alice(), &id, Visibility::Public).unwrap();
    let download = |pw: Option<&str>| {
        fx.engine
            .decide(&Caller::Anonymous, &id, Operation::Download, pw)
            .unwrap()
    };

    let view = fx
        .service
        .set_password(&alice(), &id, PasswordSetting::Enable(Some("first".into())))
        .unwrap();
    assert!(view.summary.password_enabled);
    assert!(download(Some("first")).is_allowed());

    fx.service
        .set_password(&alice(), &id, PasswordSetting::Enable(Some("second".into())))
        .unwrap();
    assert_eq!(download(Some("first")).denial(), Some(Denial::InvalidPassword));
    assert!(download(Some("second")).is_allowed());

    let view = fx
        .service
        .set_password(&alice(), &id, PasswordSetting::Disable)
        .unwrap();
    assert!(!view.summary.password_enabled);
    assert!(download(None).is_allowed());
}

#[tokio::test]
async fn enable_without_password_keeps_existing_token() {
    let fx = Fixture::new();
    let mut upload = pdf_upload();
    upload.password = Some("keep-me".into());
    let id = fx.service.upload(&alice(), upload).await.unwrap().summary.id;
    let before = fx.documents.find_document(&id).unwrap().unwrap();

    let view = fx
        .service
        .set_password(&alice(), &id, PasswordSetting::Enable(None))
        .unwrap();
    assert!(view.summary.password_enabled);
    let after = fx.documents.find_document(&id).unwrap().unwrap();
    assert_eq!(before.password_protection, after.password_protection);
}

#[tokio::test]
async fn enable_without_password_or_existing_token_is_invalid() {
    let fx = Fixture::new();
    let id = fx.service.upload(&alice(), pdf_upload()).await.unwrap().summary.id;
    let err = fx
        .service
        .set_password(&alice(), &id, PasswordSetting::Enable(None))
        .unwrap_err();
    assert!(matches!(err, AccessError::InvalidInput(_)));

    let err = fx
        .service
        .set_password(&alice(), &id, PasswordSetting::Enable(Some(String::new())))
        .unwrap_err();
    assert!(matches!(err, AccessError::InvalidInput(_)));
}

#[test]
fn password_setting_debug_is_redacted() {
    let rendered = format!("{:?}", PasswordSetting::Enable(Some("hunter2".into())));
    assert!(!rendered.contains("hunter2"));
    let mut upload = pdf_upload();
    upload.password = Some("hunter2".into());
    assert!(!format!("{upload:?}").contains("hunter2"));
}

// ── Delete and listing ──────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record_and_bytes() {
    let fx = Fixture::new();
    let view = fx.service.upload(&alice(), pdf_upload()).await.unwrap();

    fx.service.delete(&alice(), &view.summary.id).await.unwrap();
    assert!(fx.documents.find_document(&view.summary.id).unwrap().is_none());
    assert!(fx.storage.get(&view.file_url).await.is_none());
}

#[tokio::test]
async fn delete_succeeds_when_bytes_are_already_gone() {
    let fx = Fixture::new();
    let view = fx.service.upload(&alice(), pdf_upload()).await.unwrap();
    fx.storage.delete(&view.file_url).await.unwrap();

    fx.service.delete(&alice(), &view.summary.id).await.unwrap();
    assert!(fx.documents.is_empty().unwrap());
}

#[tokio::test]
async fn listings_are_scoped() {
    let fx = Fixture::new();
    let mut public = pdf_upload();
    public.visibility = Visibility::Public;
    public.file_name = "public.pdf".into();
    fx.service.upload(&alice(), public).await.unwrap();
    fx.service.upload(&alice(), pdf_upload()).await.unwrap();
    fx.service.upload(&bob(), pdf_upload()).await.unwrap();

    assert_eq!(fx.service.list_mine(&alice()).unwrap().len(), 2);
    assert_eq!(fx.service.list_mine(&bob()).unwrap().len(), 1);

    let public = fx.documents.list_public().unwrap();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0].metadata.file_name, "public.pdf");
}
