use credmap_core::db::open_db_in_memory;
use credmap_core::{
    AccountRepository, MapRepository, RepoError, SqliteAccountRepository, SqliteMapRepository,
};

#[test]
fn create_map_trims_name_and_assigns_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    let map = repo.create_map("  Work  ").unwrap();
    assert_eq!(map.name, "Work");
    assert!(map.id > 0);
    assert!(map.created_at > 0);
}

#[test]
fn create_map_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    let err = repo.create_map("   ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn create_map_rejects_case_insensitive_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    repo.create_map("Work").unwrap();
    let err = repo.create_map("  wOrK ").unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[test]
fn get_map_by_name_trims_and_ignores_case() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    let created = repo.create_map("Personal").unwrap();

    let found = repo.get_map_by_name("  personal ").unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Personal");

    assert!(repo.get_map_by_name("nope").unwrap().is_none());
}

#[test]
fn get_map_by_id_absent_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    assert!(repo.get_map_by_id(4242).unwrap().is_none());
}

#[test]
fn delete_map_cascades_to_owned_accounts() {
    let conn = open_db_in_memory().unwrap();
    let maps = SqliteMapRepository::new(&conn);
    let accounts = SqliteAccountRepository::new(&conn);

    let map = maps.create_map("doomed").unwrap();
    let a1 = accounts.add_account(map.id, "alice", "pw1", None).unwrap();
    let a2 = accounts.add_account(map.id, "bob", "pw2", None).unwrap();
    let a3 = accounts.add_account(map.id, "carol", "pw3", None).unwrap();

    assert_eq!(maps.delete_map(map.id).unwrap(), 1);

    for id in [a1.id, a2.id, a3.id] {
        assert!(accounts.get_account_by_id(id).unwrap().is_none());
    }
    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM accounts WHERE map_id = ?1;",
            [map.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn delete_nonexistent_map_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    assert_eq!(repo.delete_map(999).unwrap(), 0);
}

#[test]
fn list_maps_with_counts_orders_by_name_and_includes_empty_maps() {
    let conn = open_db_in_memory().unwrap();
    let maps = SqliteMapRepository::new(&conn);
    let accounts = SqliteAccountRepository::new(&conn);

    let bravo = maps.create_map("bravo").unwrap();
    maps.create_map("Alpha").unwrap();
    maps.create_map("charlie").unwrap();

    accounts.add_account(bravo.id, "u1", "p1", None).unwrap();
    accounts.add_account(bravo.id, "u2", "p2", None).unwrap();

    let overview = maps.list_maps_with_counts().unwrap();
    let names: Vec<_> = overview.iter().map(|entry| entry.map.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "bravo", "charlie"]);

    let counts: Vec<_> = overview.iter().map(|entry| entry.account_count).collect();
    assert_eq!(counts, [0, 2, 0]);
}

#[test]
fn list_maps_with_counts_on_empty_catalog_returns_empty_vec() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMapRepository::new(&conn);

    assert!(repo.list_maps_with_counts().unwrap().is_empty());
}
