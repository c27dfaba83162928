use stockroom_domain::account::Role;
use stockroom_domain::validation::ValidationError;
use stockroom_inventory::error::InventoryServiceError;
use stockroom_inventory::usecase::account::{
    CreateAccountInput, CreateAccountUseCase, DeleteAccountUseCase, GetOwnProfileUseCase,
    UpdateAccountInput, UpdateAccountUseCase, UpdateOwnProfileInput, UpdateOwnProfileUseCase,
};
use stockroom_inventory::usecase::authorize::AuthorizeUseCase;
use stockroom_inventory::usecase::session::AuthenticateUseCase;

use crate::helpers::{MockAccountRepo, PlainHasher, details, profile};

fn seeded() -> MockAccountRepo {
    MockAccountRepo::new(vec![
        profile(1, "admin", "root-pass", Role::Admin),
        profile(2, "clerk", "clerk-pass", Role::Normal),
    ])
}

fn create_input(username: &str, role: Option<&str>) -> CreateAccountInput {
    CreateAccountInput {
        username: username.into(),
        password: "s3cret".into(),
        role: role.map(str::to_owned),
        details: details("Ana"),
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_account_with_hashed_password() {
    let repo = MockAccountRepo::empty();
    let usecase = CreateAccountUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    let created = usecase
        .execute(create_input("  ana  ", Some("admin")))
        .await
        .unwrap();

    assert_eq!(created.account.username, "ana");
    assert_eq!(created.account.role, Role::Admin);
    let stored = repo.get("ana").unwrap();
    assert_eq!(stored.account.password_hash, "plain:s3cret");
    assert_eq!(stored.details, Some(details("Ana")));
}

#[tokio::test]
async fn should_default_to_normal_role() {
    let usecase = CreateAccountUseCase {
        repo: MockAccountRepo::empty(),
        hasher: PlainHasher,
    };
    let created = usecase.execute(create_input("ana", None)).await.unwrap();
    assert_eq!(created.account.role, Role::Normal);
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let usecase = CreateAccountUseCase {
        repo: seeded(),
        hasher: PlainHasher,
    };
    let err = usecase
        .execute(create_input("clerk", None))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::DuplicateUsername(ref name)) if name == "clerk"
    ));
}

#[tokio::test]
async fn should_reject_unknown_role_and_blank_names() {
    let usecase = CreateAccountUseCase {
        repo: MockAccountRepo::empty(),
        hasher: PlainHasher,
    };

    let err = usecase
        .execute(create_input("ana", Some("root")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::InvalidRole(_))
    ));

    let mut input = create_input("ana", None);
    input.details.first_name = "   ".into();
    let err = usecase.execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::EmptyField("first_name"))
    ));
}

// ── Own profile ──────────────────────────────────────────────────────────────

fn own_update(current: &str, new: Option<&str>, confirm: Option<&str>) -> UpdateOwnProfileInput {
    UpdateOwnProfileInput {
        details: details("Clara"),
        current_password: current.into(),
        new_password: new.map(str::to_owned),
        confirm_password: confirm.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_update_own_profile_and_password() {
    let repo = seeded();
    let usecase = UpdateOwnProfileUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    usecase
        .execute(
            "clerk",
            own_update("clerk-pass", Some("fresh-pass"), Some("fresh-pass")),
        )
        .await
        .unwrap();

    let stored = repo.get("clerk").unwrap();
    assert_eq!(stored.account.password_hash, "plain:fresh-pass");
    assert_eq!(stored.details.unwrap().first_name, "Clara");
}

#[tokio::test]
async fn should_keep_password_when_new_password_blank() {
    let repo = seeded();
    let usecase = UpdateOwnProfileUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    usecase
        .execute("clerk", own_update("clerk-pass", Some(""), None))
        .await
        .unwrap();

    assert_eq!(
        repo.get("clerk").unwrap().account.password_hash,
        "plain:clerk-pass"
    );
}

#[tokio::test]
async fn should_reject_wrong_current_password() {
    let repo = seeded();
    let usecase = UpdateOwnProfileUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    let err = usecase
        .execute("clerk", own_update("guess", Some("x"), Some("x")))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::IncorrectPassword)
    ));
    assert_eq!(
        repo.get("clerk").unwrap().details.unwrap().first_name,
        "clerk"
    );
}

#[tokio::test]
async fn should_reject_mismatched_confirmation() {
    let repo = seeded();
    let usecase = UpdateOwnProfileUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    let err = usecase
        .execute(
            "clerk",
            own_update("clerk-pass", Some("one"), Some("two")),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InventoryServiceError::Validation(ValidationError::PasswordMismatch)
    ));
    assert_eq!(
        repo.get("clerk").unwrap().account.password_hash,
        "plain:clerk-pass"
    );
}

#[tokio::test]
async fn should_return_own_profile() {
    let usecase = GetOwnProfileUseCase { repo: seeded() };
    let profile = usecase.execute("clerk").await.unwrap();
    assert_eq!(profile.account.id, 2);

    let err = usecase.execute("ghost").await.unwrap_err();
    assert!(matches!(err, InventoryServiceError::AccountNotFound));
}

// ── Admin management ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reset_password_on_admin_update() {
    let repo = seeded();
    let usecase = UpdateAccountUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };

    let updated = usecase
        .execute(
            2,
            UpdateAccountInput {
                details: details("Renamed"),
                new_password: Some("reset".into()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.details.unwrap().first_name, "Renamed");
    assert_eq!(
        repo.get("clerk").unwrap().account.password_hash,
        "plain:reset"
    );
}

#[tokio::test]
async fn should_report_missing_account_on_update_and_delete() {
    let repo = seeded();
    let update = UpdateAccountUseCase {
        repo: repo.clone(),
        hasher: PlainHasher,
    };
    let err = update
        .execute(
            99,
            UpdateAccountInput {
                details: details("X"),
                new_password: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryServiceError::AccountNotFound));

    let delete = DeleteAccountUseCase { repo: repo.clone() };
    let err = delete.execute(99).await.unwrap_err();
    assert!(matches!(err, InventoryServiceError::AccountNotFound));

    delete.execute(2).await.unwrap();
    assert!(repo.get("clerk").is_none());
}

// ── Authentication and authorization ─────────────────────────────────────────

#[tokio::test]
async fn should_fail_login_uniformly() {
    let usecase = AuthenticateUseCase {
        repo: seeded(),
        hasher: PlainHasher,
    };

    let unknown = usecase.execute("ghost", "whatever").await.unwrap_err();
    let wrong = usecase.execute("clerk", "whatever").await.unwrap_err();

    assert_eq!(unknown.to_string(), wrong.to_string());
    assert!(matches!(unknown, InventoryServiceError::InvalidCredentials));
    assert!(matches!(wrong, InventoryServiceError::InvalidCredentials));
    assert_eq!(
        usecase.execute("clerk", "clerk-pass").await.unwrap().id,
        2
    );
}

#[tokio::test]
async fn should_gate_admin_operations_by_role() {
    let usecase = AuthorizeUseCase { repo: seeded() };

    assert_eq!(
        usecase.execute("admin", Role::Admin).await.unwrap().username,
        "admin"
    );
    assert!(usecase.execute("clerk", Role::Normal).await.is_ok());

    let err = usecase.execute("clerk", Role::Admin).await.unwrap_err();
    assert!(matches!(err, InventoryServiceError::Forbidden));

    let err = usecase.execute("ghost", Role::Normal).await.unwrap_err();
    assert!(matches!(err, InventoryServiceError::Unauthenticated));
}
