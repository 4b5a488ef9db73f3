use storage::repository::BestScoreRepository;
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_best_score() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_best_score?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.best_score().await.unwrap(), None);

    repo.record_best_score(3).await.unwrap();
    assert_eq!(repo.best_score().await.unwrap(), Some(3));

    // Overwrites keep a single row.
    repo.record_best_score(9).await.unwrap();
    assert_eq!(repo.best_score().await.unwrap(), Some(9));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.record_best_score(1).await.unwrap();
    assert_eq!(repo.best_score().await.unwrap(), Some(1));
}
