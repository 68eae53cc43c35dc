//! Identity integration tests on the in-memory store.

use crate::application::change_password::{ChangePasswordUseCase, SetNewPasswordUseCase};
use crate::application::config::IdentityConfig;
use crate::application::directory::{PrincipalInput, UserDirectory};
use crate::application::login::LoginUseCase;
use crate::application::policy::AccessPolicy;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::principal::Principal;
use crate::domain::repository::UserStore;
use crate::domain::value_object::user_role::UserRole;
use crate::error::IdentityError;
use crate::infra::memory::InMemoryUserStore;
use platform::password::ClearTextPassword;
use std::sync::Arc;

const PASSWORD: &str = "orange-crate-9";

struct Harness {
    store: Arc<InMemoryUserStore>,
    config: Arc<IdentityConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryUserStore::new()),
            config: Arc::new(IdentityConfig::default()),
        }
    }

    fn directory(&self) -> UserDirectory<InMemoryUserStore> {
        UserDirectory::new(Arc::clone(&self.store))
    }

    fn login(&self) -> LoginUseCase<InMemoryUserStore> {
        LoginUseCase::new(self.directory(), Arc::clone(&self.config))
    }

    fn register(&self) -> RegisterUseCase<InMemoryUserStore> {
        RegisterUseCase::new(
            Arc::clone(&self.store),
            self.directory(),
            Arc::clone(&self.config),
        )
    }

    fn change_password(&self) -> ChangePasswordUseCase<InMemoryUserStore> {
        ChangePasswordUseCase::new(
            Arc::clone(&self.store),
            self.directory(),
            Arc::clone(&self.config),
        )
    }

    fn set_new_password(&self) -> SetNewPasswordUseCase<InMemoryUserStore> {
        SetNewPasswordUseCase::new(
            Arc::clone(&self.store),
            self.directory(),
            Arc::clone(&self.config),
        )
    }

    fn policy(&self) -> AccessPolicy<InMemoryUserStore> {
        AccessPolicy::new(Arc::clone(&self.store))
    }

    async fn register_user(&self, email: &str) {
        let created = self
            .register()
            .execute(RegisterInput {
                email: email.to_string(),
                password: PASSWORD.to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();
        assert!(created);
    }

    async fn promote_to_admin(&self, email: &str) {
        let mut record = self.store.find_by_email(email).await.unwrap().unwrap();
        record.role = UserRole::Admin;
        self.store.save(&record).await.unwrap();
    }

    fn principal_for(&self, email: &str, role: UserRole) -> Principal {
        Principal::new(email, [role.authority().to_string()])
    }
}

mod registration {
    use super::*;
    use crate::domain::entity::user::UserRecord;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_register_then_login() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        assert!(h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_forces_user_role() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let record = h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_false() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let again = h
            .register()
            .execute(RegisterInput {
                email: "alice@example.com".to_string(),
                password: "another-password-1".to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();
        assert!(!again);

        // The original credential still works.
        assert!(h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }

    /// A lookup surface that pretends the account does not exist for the
    /// first query only, so a record seeded beforehand behaves like a
    /// concurrent registration landing between two consecutive lookups.
    struct RacingStore {
        inner: InMemoryUserStore,
        hide_first_lookup: AtomicBool,
    }

    impl UserStore for RacingStore {
        async fn find_by_email(&self, email: &str) -> crate::error::IdentityResult<Option<UserRecord>> {
            if self.hide_first_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_email(email).await
        }

        async fn find_by_id(
            &self,
            user_id: &kernel::id::UserId,
        ) -> crate::error::IdentityResult<Option<UserRecord>> {
            self.inner.find_by_id(user_id).await
        }

        async fn save(&self, record: &UserRecord) -> crate::error::IdentityResult<UserRecord> {
            self.inner.save(record).await
        }

        async fn delete_by_email(&self, email: &str) -> crate::error::IdentityResult<()> {
            self.inner.delete_by_email(email).await
        }
    }

    #[tokio::test]
    async fn test_lost_registration_race_reads_as_false() {
        let seed = Harness::new();
        seed.register_user("alice@example.com").await;
        let taken = seed
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        let store = Arc::new(RacingStore {
            inner: InMemoryUserStore::new(),
            hide_first_lookup: AtomicBool::new(false),
        });
        store.save(&taken).await.unwrap();
        store.hide_first_lookup.store(true, Ordering::SeqCst);

        let register = RegisterUseCase::new(
            Arc::clone(&store),
            UserDirectory::new(Arc::clone(&store)),
            Arc::new(IdentityConfig::default()),
        );
        let created = register
            .execute(RegisterInput {
                email: "alice@example.com".to_string(),
                password: "another-password-1".to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();
        assert!(!created);
    }

    #[tokio::test]
    async fn test_invalid_email_reads_as_false() {
        let h = Harness::new();
        let created = h
            .register()
            .execute(RegisterInput {
                email: "not-an-email".to_string(),
                password: PASSWORD.to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();
        assert!(!created);
    }

    #[tokio::test]
    async fn test_short_password_reads_as_false() {
        let h = Harness::new();
        let created = h
            .register()
            .execute(RegisterInput {
                email: "alice@example.com".to_string(),
                password: "short".to_string(),
                first_name: None,
                last_name: None,
                phone: None,
            })
            .await
            .unwrap();
        assert!(!created);
        assert!(!h.directory().exists("alice@example.com").await.unwrap());
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn test_unknown_identifier_is_false() {
        let h = Harness::new();
        assert!(!h
            .login()
            .execute("ghost@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_is_false() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        assert!(!h
            .login()
            .execute("alice@example.com", "wrong-password-1".to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_identifier_match_is_case_sensitive() {
        let h = Harness::new();
        h.register_user("Alice@Example.com").await;

        assert!(h
            .login()
            .execute("Alice@Example.com", PASSWORD.to_string())
            .await
            .unwrap());
        assert!(!h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }
}

mod password_change {
    use super::*;

    #[tokio::test]
    async fn test_change_password_rotates_credential() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let changed = h
            .change_password()
            .execute(
                "alice@example.com",
                PASSWORD.to_string(),
                "new-password-42".to_string(),
            )
            .await
            .unwrap();
        assert!(changed);

        assert!(!h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
        assert!(h
            .login()
            .execute("alice@example.com", "new-password-42".to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_change_password_requires_current() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let changed = h
            .change_password()
            .execute(
                "alice@example.com",
                "wrong-current-1".to_string(),
                "new-password-42".to_string(),
            )
            .await
            .unwrap();
        assert!(!changed);

        assert!(h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_change_password_unknown_account_is_false() {
        let h = Harness::new();
        let changed = h
            .change_password()
            .execute(
                "ghost@example.com",
                PASSWORD.to_string(),
                "new-password-42".to_string(),
            )
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn test_set_new_password_skips_proof() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let changed = h
            .set_new_password()
            .execute("alice@example.com", "reset-password-7".to_string())
            .await
            .unwrap();
        assert!(changed);

        assert!(h
            .login()
            .execute("alice@example.com", "reset-password-7".to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_password_change_preserves_role() {
        let h = Harness::new();
        h.register_user("root@example.com").await;
        h.promote_to_admin("root@example.com").await;

        h.set_new_password()
            .execute("root@example.com", "reset-password-7".to_string())
            .await
            .unwrap();

        let record = h
            .store
            .find_by_email("root@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_weak_replacement_reads_as_false() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let changed = h
            .change_password()
            .execute("alice@example.com", PASSWORD.to_string(), "short".to_string())
            .await
            .unwrap();
        assert!(!changed);

        assert!(h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
    }
}

mod full_flow {
    use super::*;

    #[tokio::test]
    async fn test_register_login_change_login() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        assert!(h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());

        assert!(h
            .change_password()
            .execute(
                "alice@example.com",
                PASSWORD.to_string(),
                "rotated-password-3".to_string(),
            )
            .await
            .unwrap());

        assert!(!h
            .login()
            .execute("alice@example.com", PASSWORD.to_string())
            .await
            .unwrap());
        assert!(h
            .login()
            .execute("alice@example.com", "rotated-password-3".to_string())
            .await
            .unwrap());
    }
}

mod directory {
    use super::*;

    fn hashed(password: &str) -> platform::password::HashedPassword {
        ClearTextPassword::new(password.to_string())
            .unwrap()
            .hash(None)
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_exposes_prefixed_authority() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        let view = h
            .directory()
            .load_by_identifier("alice@example.com")
            .await
            .unwrap();
        assert_eq!(view.identifier, "alice@example.com");
        assert_eq!(view.authority, "ROLE_USER");
    }

    #[tokio::test]
    async fn test_load_unknown_is_not_found() {
        let h = Harness::new();
        let err = h
            .directory()
            .load_by_identifier("ghost@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound));
    }

    #[tokio::test]
    async fn test_create_strips_authority_prefix() {
        let h = Harness::new();
        let record = h
            .directory()
            .create(PrincipalInput {
                identifier: "root@example.com".to_string(),
                password_hash: hashed(PASSWORD),
                authorities: vec!["ROLE_ADMIN".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(record.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_create_rejects_unprefixed_authority() {
        let h = Harness::new();
        let err = h
            .directory()
            .create(PrincipalInput {
                identifier: "root@example.com".to_string(),
                password_hash: hashed(PASSWORD),
                authorities: vec!["ADMIN".to_string()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidAuthority(_)));
    }

    #[tokio::test]
    async fn test_update_is_unsupported() {
        let h = Harness::new();
        let err = h
            .directory()
            .update(PrincipalInput {
                identifier: "alice@example.com".to_string(),
                password_hash: hashed(PASSWORD),
                authorities: vec!["ROLE_USER".to_string()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::UnsupportedOperation(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_account() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;

        h.directory().delete("alice@example.com").await.unwrap();
        assert!(!h.directory().exists("alice@example.com").await.unwrap());
        assert!(h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_account_is_ok() {
        let h = Harness::new();
        h.directory().delete("ghost@example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_registration_is_immediately_visible() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;
        assert!(h.directory().exists("alice@example.com").await.unwrap());
    }
}

mod policy {
    use super::*;

    #[tokio::test]
    async fn test_resolve_without_principal_is_unauthenticated() {
        let h = Harness::new();
        let err = h.policy().resolve_current_user(None).await.unwrap_err();
        assert!(matches!(err, IdentityError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_resolve_vanished_account_is_not_found() {
        let h = Harness::new();
        let principal = h.principal_for("ghost@example.com", UserRole::User);
        let err = h
            .policy()
            .resolve_current_user(Some(&principal))
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::UserNotFound));
    }

    #[tokio::test]
    async fn test_is_admin_from_authorities() {
        let h = Harness::new();
        let admin = h.principal_for("root@example.com", UserRole::Admin);
        let user = h.principal_for("alice@example.com", UserRole::User);

        assert!(h.policy().is_admin(Some(&admin)));
        assert!(!h.policy().is_admin(Some(&user)));
        assert!(!h.policy().is_admin(None));
    }

    #[tokio::test]
    async fn test_owner_may_mutate() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;
        let owner = h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        let principal = h.principal_for("alice@example.com", UserRole::User);
        h.policy()
            .check_owner_or_admin(Some(&principal), &owner)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_admin_may_mutate_foreign_resource() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;
        h.register_user("root@example.com").await;
        h.promote_to_admin("root@example.com").await;

        let owner = h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        let principal = h.principal_for("root@example.com", UserRole::Admin);

        h.policy()
            .check_owner_or_admin(Some(&principal), &owner)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_stranger_is_forbidden() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;
        h.register_user("bob@example.com").await;

        let owner = h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        let principal = h.principal_for("bob@example.com", UserRole::User);

        let err = h
            .policy()
            .check_owner_or_admin(Some(&principal), &owner)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Forbidden));
    }

    #[tokio::test]
    async fn test_is_owner_never_throws() {
        let h = Harness::new();
        h.register_user("alice@example.com").await;
        let owner = h
            .store
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();

        let principal = h.principal_for("alice@example.com", UserRole::User);
        assert!(h.policy().is_owner(Some(&principal), Some(&owner.id)).await);

        // Missing resource, unauthenticated caller, vanished account:
        // all read as plain false.
        assert!(!h.policy().is_owner(Some(&principal), None).await);
        assert!(!h.policy().is_owner(None, Some(&owner.id)).await);
        let ghost = h.principal_for("ghost@example.com", UserRole::User);
        assert!(!h.policy().is_owner(Some(&ghost), Some(&owner.id)).await);
    }
}
