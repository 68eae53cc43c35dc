//! Listings integration tests on the in-memory stores.

use crate::application::ads::{AdInput, AdUseCase};
use crate::application::comments::CommentUseCase;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::ListingsError;
use crate::infra::memory::{InMemoryAdRepository, InMemoryCommentRepository};
use identity::infra::memory::InMemoryUserStore;
use identity::{Email, IdentityError, Principal, UserRecord, UserRole, UserStore};
use kernel::id::AdId;
use platform::password::ClearTextPassword;
use std::sync::Arc;

struct Harness {
    users: Arc<InMemoryUserStore>,
    ads: Arc<InMemoryAdRepository>,
    comments: Arc<InMemoryCommentRepository>,
}

impl Harness {
    fn new() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            ads: Arc::new(InMemoryAdRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
        }
    }

    fn ad_use_case(&self) -> AdUseCase<InMemoryUserStore, InMemoryAdRepository, InMemoryCommentRepository> {
        AdUseCase::new(
            Arc::clone(&self.users),
            Arc::clone(&self.ads),
            Arc::clone(&self.comments),
        )
    }

    fn comment_use_case(
        &self,
    ) -> CommentUseCase<InMemoryUserStore, InMemoryAdRepository, InMemoryCommentRepository> {
        CommentUseCase::new(
            Arc::clone(&self.users),
            Arc::clone(&self.ads),
            Arc::clone(&self.comments),
        )
    }

    async fn seed_user(&self, email: &str, role: UserRole) -> Principal {
        let hash = ClearTextPassword::new("orange-crate-9".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let record = UserRecord::new(Email::new(email.to_string()).unwrap(), hash, role);
        self.users.save(&record).await.unwrap();
        Principal::new(email, [role.authority().to_string()])
    }

    fn sample_input(title: &str) -> AdInput {
        AdInput {
            title: title.to_string(),
            price: 1500,
            description: Some("barely used".to_string()),
        }
    }
}

mod ads {
    use super::*;

    #[tokio::test]
    async fn test_create_requires_authentication() {
        let h = Harness::new();
        let err = h
            .ad_use_case()
            .create(None, Harness::sample_input("Bicycle"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListingsError::Identity(IdentityError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_create_and_get_extended() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;

        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();

        let (found, author) = h.ad_use_case().get_extended(&ad.id).await.unwrap();
        assert_eq!(found.title, "Bicycle");
        assert_eq!(author.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_extended_missing_ad() {
        let h = Harness::new();
        let err = h.ad_use_case().get_extended(&AdId::new()).await.unwrap_err();
        assert!(matches!(err, ListingsError::AdNotFound));
    }

    #[tokio::test]
    async fn test_empty_title_rejected() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;

        let err = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ListingsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stranger_cannot_update() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let bob = h.seed_user("bob@example.com", UserRole::User).await;

        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();

        let err = h
            .ad_use_case()
            .update(Some(&bob), &ad.id, Harness::sample_input("Stolen bicycle"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListingsError::Identity(IdentityError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_admin_can_delete_foreign_ad() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let root = h.seed_user("root@example.com", UserRole::Admin).await;

        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();

        h.ad_use_case().delete(Some(&root), &ad.id).await.unwrap();
        assert!(h.ads.find_by_id(&ad.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_comments() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;

        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        let view = h
            .comment_use_case()
            .add(Some(&alice), &ad.id, "still available?".to_string())
            .await
            .unwrap();

        h.ad_use_case().delete(Some(&alice), &ad.id).await.unwrap();
        assert!(h
            .comments
            .find_by_id(&view.comment.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_mine_filters_by_author() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let bob = h.seed_user("bob@example.com", UserRole::User).await;

        h.ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        h.ad_use_case()
            .create(Some(&bob), Harness::sample_input("Kettle"))
            .await
            .unwrap();

        let mine = h.ad_use_case().list_mine(Some(&alice)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Bicycle");
    }

    #[tokio::test]
    async fn test_is_owner_missing_ad_is_false() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        assert!(!h.ad_use_case().is_owner(Some(&alice), &AdId::new()).await);
    }

    #[tokio::test]
    async fn test_is_owner_for_author() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let bob = h.seed_user("bob@example.com", UserRole::User).await;

        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();

        assert!(h.ad_use_case().is_owner(Some(&alice), &ad.id).await);
        assert!(!h.ad_use_case().is_owner(Some(&bob), &ad.id).await);
        assert!(!h.ad_use_case().is_owner(None, &ad.id).await);
    }
}

mod comments {
    use super::*;

    #[tokio::test]
    async fn test_add_requires_existing_ad() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;

        let err = h
            .comment_use_case()
            .add(Some(&alice), &AdId::new(), "hello".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ListingsError::AdNotFound));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();

        h.comment_use_case()
            .add(Some(&alice), &ad.id, "first".to_string())
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        h.comment_use_case()
            .add(Some(&alice), &ad.id, "second".to_string())
            .await
            .unwrap();

        let views = h.comment_use_case().list_for_ad(&ad.id).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].comment.text, "second");
        assert_eq!(views[1].comment.text, "first");
    }

    #[tokio::test]
    async fn test_update_under_wrong_ad_is_not_found() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        let other_ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Kettle"))
            .await
            .unwrap();
        let view = h
            .comment_use_case()
            .add(Some(&alice), &ad.id, "hello".to_string())
            .await
            .unwrap();

        let err = h
            .comment_use_case()
            .update(
                Some(&alice),
                &other_ad.id,
                &view.comment.id,
                "edited".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ListingsError::CommentNotFound));
    }

    #[tokio::test]
    async fn test_stranger_cannot_delete_comment() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let bob = h.seed_user("bob@example.com", UserRole::User).await;
        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        let view = h
            .comment_use_case()
            .add(Some(&alice), &ad.id, "hello".to_string())
            .await
            .unwrap();

        let err = h
            .comment_use_case()
            .delete(Some(&bob), &ad.id, &view.comment.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListingsError::Identity(IdentityError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_admin_can_edit_foreign_comment() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let root = h.seed_user("root@example.com", UserRole::Admin).await;
        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        let view = h
            .comment_use_case()
            .add(Some(&alice), &ad.id, "hello".to_string())
            .await
            .unwrap();

        let updated = h
            .comment_use_case()
            .update(Some(&root), &ad.id, &view.comment.id, "moderated".to_string())
            .await
            .unwrap();
        assert_eq!(updated.comment.text, "moderated");
    }

    #[tokio::test]
    async fn test_comment_is_owner_checks_ad_binding() {
        let h = Harness::new();
        let alice = h.seed_user("alice@example.com", UserRole::User).await;
        let ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Bicycle"))
            .await
            .unwrap();
        let other_ad = h
            .ad_use_case()
            .create(Some(&alice), Harness::sample_input("Kettle"))
            .await
            .unwrap();
        let view = h
            .comment_use_case()
            .add(Some(&alice), &ad.id, "hello".to_string())
            .await
            .unwrap();

        assert!(
            h.comment_use_case()
                .is_owner(Some(&alice), &ad.id, &view.comment.id)
                .await
        );
        assert!(
            !h.comment_use_case()
                .is_owner(Some(&alice), &other_ad.id, &view.comment.id)
                .await
        );
    }
}
