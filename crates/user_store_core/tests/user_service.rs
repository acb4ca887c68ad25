use user_store_core::db::open_db_in_memory;
use user_store_core::{ErrorKind, ServiceError, SqliteUserRepository, User, UserId, UserService};

#[test]
fn save_then_find_by_id_returns_saved_user() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    service.save_user(Some("Bob"), Some(18)).unwrap();

    let user = service.find_user_by_id(Some(UserId(1))).unwrap();
    assert_eq!(user, Some(User::new(UserId(1), "Bob", 18)));
}

#[test]
fn save_update_then_find_returns_updated_user() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    service.save_user(Some("Bob"), Some(18)).unwrap();
    service
        .update_user(Some(UserId(1)), Some("Ted"), Some(18))
        .unwrap();

    let user = service.find_user_by_id(Some(UserId(1))).unwrap();
    assert_eq!(user, Some(User::new(UserId(1), "Ted", 18)));
}

#[test]
fn find_all_users_after_three_saves_returns_three() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    assert!(service.find_all_users().unwrap().is_empty());

    service.save_user(Some("Bob"), Some(18)).unwrap();
    service.save_user(Some("Ted"), Some(20)).unwrap();
    service.save_user(Some("Bob"), Some(20)).unwrap();

    assert_eq!(service.find_all_users().unwrap().len(), 3);
}

#[test]
fn invalid_input_leaves_table_empty() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let blank = service.save_user(Some("  "), Some(30)).unwrap_err();
    let negative = service.save_user(Some("Bob"), Some(-1)).unwrap_err();
    let missing_age = service.save_user(Some("Bob"), None).unwrap_err();

    for err in [blank, negative, missing_age] {
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
    assert!(service.find_all_users().unwrap().is_empty());
}

#[test]
fn update_missing_user_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let err = service
        .update_user(Some(UserId(999)), Some("Bob"), Some(18))
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(UserId(999))));
    assert!(service.find_all_users().unwrap().is_empty());
}

#[test]
fn delete_then_find_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let id = service.save_user(Some("Bob"), Some(18)).unwrap();
    service.delete_user(Some(id)).unwrap();

    assert!(service.find_user_by_id(Some(id)).unwrap().is_none());
}

#[test]
fn delete_missing_user_is_storage_failure_unlike_update() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service.save_user(Some("Bob"), Some(18)).unwrap();

    let err = service.delete_user(Some(UserId(999))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::StorageFailure);
    assert_eq!(service.find_all_users().unwrap().len(), 1);
}

#[test]
fn is_adult_user_uses_legal_age_threshold() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let adult = service.save_user(Some("Bob"), Some(18)).unwrap();
    let minor = service.save_user(Some("Tim"), Some(17)).unwrap();

    assert!(service.is_adult_user(Some(adult)).unwrap());
    assert!(!service.is_adult_user(Some(minor)).unwrap());

    let err = service.is_adult_user(Some(UserId(999))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "User with id 999 not found");
}
