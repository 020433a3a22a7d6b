use std::sync::Arc;

use waffle::domain::{DashboardConfig, RoleId, UserId};
use waffle::ports::AssumeYes;
use waffle::services::{MemoryUserRepository, load_role_content_catalog};
use waffle::{AppContext, AppError, UserFields};

fn offline_context() -> AppContext {
    let mut config = DashboardConfig::default();
    config.ui.resource_lookup_delay_ms = 0;
    AppContext::new(
        config,
        Arc::new(MemoryUserRepository::seeded().unwrap()),
        load_role_content_catalog().unwrap(),
    )
}

fn syrup() -> UserFields {
    UserFields {
        first_name: Some("Syrup".into()),
        last_name: Some("Drizzle".into()),
        email: Some("syrup@waffle.tech".into()),
        hire_date: Some("2025-02-14".into()),
        role: Some("Designer".into()),
        bio: Some("  ".into()),
    }
}

#[test]
fn create_grows_list_by_one() {
    let ctx = offline_context();
    let before = waffle::users(&ctx).unwrap().0.len();

    let user = waffle::add_user(&ctx, &syrup()).unwrap();
    assert_eq!(user.role_id, RoleId::new(6));
    assert_eq!(user.bio, None);

    let (users, _) = waffle::users(&ctx).unwrap();
    assert_eq!(users.len(), before + 1);
    assert_eq!(users.last().unwrap().email, "syrup@waffle.tech");
}

#[test]
fn delete_shrinks_list_by_one() {
    let ctx = offline_context();
    let user = waffle::add_user(&ctx, &syrup()).unwrap();
    let before = waffle::users(&ctx).unwrap().0.len();

    assert!(waffle::delete_user(&ctx, user.user_id, &AssumeYes).unwrap());
    let (users, _) = waffle::users(&ctx).unwrap();
    assert_eq!(users.len(), before - 1);
    assert!(users.get(user.user_id).is_none());
}

#[test]
fn rejection_leaves_list_unchanged() {
    let ctx = offline_context();
    waffle::add_user(&ctx, &syrup()).unwrap();
    let before = waffle::users(&ctx).unwrap().0.len();

    let err = waffle::add_user(&ctx, &syrup()).unwrap_err();
    assert!(matches!(err, AppError::Request(ref detail) if detail == "Email already registered"));
    assert_eq!(waffle::users(&ctx).unwrap().0.len(), before);
}

#[test]
fn missing_user_cannot_be_edited() {
    let ctx = offline_context();
    let err = waffle::edit_user(&ctx, UserId::new(999), &UserFields::default()).unwrap_err();
    assert_eq!(err.to_string(), "User 999 not found");
}

#[test]
fn every_seed_role_resolves_to_curated_content() {
    let ctx = offline_context();
    let roles = waffle::roles(&ctx).unwrap();
    for role in roles.as_slice() {
        let content = waffle::content(&ctx, Some(&role.role_name)).unwrap();
        assert_eq!(&content, ctx.content().curated(&role.role_name).unwrap(), "{}", role.role_name);
    }
}
