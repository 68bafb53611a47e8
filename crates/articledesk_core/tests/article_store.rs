use articledesk_core::db::open_db_in_memory;
use articledesk_core::{
    Article, ArticleFields, ArticleId, ArticleRepository, Category, FileAttachment,
    KeyValueStore, KvArticleRepository, RepoError, SqliteKvStore, ARTICLES_KEY,
};
use chrono::NaiveDate;
use std::collections::HashSet;

fn fields(title: &str) -> ArticleFields {
    ArticleFields::new(title, "Author", "Body")
}

fn fixed_clock() -> i64 {
    1_700_000_000_000
}

#[test]
fn list_on_fresh_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));

    assert!(repo.list_articles().unwrap().is_empty());
}

#[test]
fn create_appends_and_preserves_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    repo.create_article(fields("existing")).unwrap();

    let mut submitted = fields("  padded title  ");
    submitted.category = Some(Category::Health);
    submitted.date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
    submitted.attachment = Some(FileAttachment {
        name: "scan.pdf".to_string(),
        size: 4096,
    });
    let created = repo.create_article(submitted.clone()).unwrap();

    let articles = repo.list_articles().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1], created);
    assert!(!created.id.as_str().is_empty());
    assert_eq!(created.fields(), submitted);
}

#[test]
fn ids_stay_unique_when_clock_does_not_advance() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::with_clock(SqliteKvStore::new(&conn), fixed_clock);

    let ids: Vec<ArticleId> = (0..5)
        .map(|n| repo.create_article(fields(&format!("n{n}"))).unwrap().id)
        .collect();

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids[0].as_str(), "1700000000000");
    assert_eq!(ids[4].as_str(), "1700000000004");
}

#[test]
fn find_returns_record_or_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    let created = repo.create_article(fields("findable")).unwrap();

    assert_eq!(repo.find_article(&created.id).unwrap(), created);
    let missing = ArticleId::from("missing");
    let err = repo.find_article(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn update_keeps_id_position_and_length() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    let a = repo.create_article(fields("a")).unwrap();
    let b = repo.create_article(fields("b")).unwrap();
    let c = repo.create_article(fields("c")).unwrap();

    let mut replacement = fields("b2");
    replacement.category = Some(Category::Other);
    let updated = repo.update_article(&b.id, replacement.clone()).unwrap();

    assert_eq!(updated.id, b.id);
    assert_eq!(repo.find_article(&b.id).unwrap().fields(), replacement);
    let ids: Vec<_> = repo
        .list_articles()
        .unwrap()
        .into_iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[test]
fn update_unknown_id_fails_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    repo.create_article(fields("only")).unwrap();
    let before = store.get(ARTICLES_KEY).unwrap();

    let missing = ArticleId::from("nope");
    let err = repo.update_article(&missing, fields("x")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(store.get(ARTICLES_KEY).unwrap(), before);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    let keep = repo.create_article(fields("keep")).unwrap();
    let gone = repo.create_article(fields("gone")).unwrap();

    repo.delete_article(&gone.id).unwrap();
    let once = repo.list_articles().unwrap();
    repo.delete_article(&gone.id).unwrap();
    let twice = repo.list_articles().unwrap();

    assert_eq!(once, twice);
    assert_eq!(once, vec![keep]);
}

#[test]
fn write_rejects_invalid_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));

    let err = repo.create_article(fields("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_articles().unwrap().is_empty());
}

#[test]
fn unparsable_collection_is_corrupt_not_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    store.set(ARTICLES_KEY, "[{\"id\": 1").unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));

    assert!(matches!(repo.list_articles(), Err(RepoError::Corrupt(_))));
    assert!(matches!(
        repo.create_article(fields("x")),
        Err(RepoError::Corrupt(_))
    ));
    assert_eq!(
        store.get(ARTICLES_KEY).unwrap().as_deref(),
        Some("[{\"id\": 1")
    );
}

#[test]
fn stored_collection_with_duplicate_ids_is_corrupt() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let twin = Article::from_fields(ArticleId::from("7"), fields("twin"));
    store
        .set(
            ARTICLES_KEY,
            &serde_json::to_string(&vec![twin.clone(), twin]).unwrap(),
        )
        .unwrap();

    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    assert!(matches!(repo.list_articles(), Err(RepoError::Corrupt(_))));
}

#[test]
fn reads_collections_written_by_earlier_clients() {
    let conn = open_db_in_memory().unwrap();
    let legacy = r#"[
        {"id":"1712345678901","title":"T","author":"A","category":"","date":"2024-04-05",
         "content":"C","file":null,"fileSize":null,"fileName":null},
        {"id":"1712345678999","title":"T2","author":"A2","category":"Business",
         "date":"2024-04-06","content":"C2","file":{},"fileSize":2048,"fileName":"a.txt"}
    ]"#;
    SqliteKvStore::new(&conn).set(ARTICLES_KEY, legacy).unwrap();

    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    let articles = repo.list_articles().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].category, None);
    assert_eq!(articles[0].attachment(), None);
    assert_eq!(articles[1].category, Some(Category::Business));
    assert_eq!(
        articles[1].attachment(),
        Some(FileAttachment {
            name: "a.txt".to_string(),
            size: 2048
        })
    );
}

#[test]
fn records_failing_form_rules_stay_readable_and_writable() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let legacy = r#"[
        {"id":"1","title":" ","author":"A","category":"","date":"","content":"C"},
        {"id":"2","title":"T","author":"A","category":"","date":"2024-04-06",
         "content":"C","fileName":"big.iso","fileSize":52428800}
    ]"#;
    store.set(ARTICLES_KEY, legacy).unwrap();
    let repo = KvArticleRepository::with_clock(SqliteKvStore::new(&conn), fixed_clock);

    let articles = repo.list_articles().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, " ");
    assert_eq!(articles[0].date, None);
    assert_eq!(articles[1].file_size, Some(50 * 1024 * 1024));

    let created = repo.create_article(fields("new")).unwrap();
    repo.update_article(&ArticleId::from("2"), fields("fixed")).unwrap();
    repo.delete_article(&created.id).unwrap();

    let articles = repo.list_articles().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].date, None);
    assert_eq!(articles[1].title, "fixed");
    assert_eq!(articles[1].attachment(), None);

    let raw: serde_json::Value =
        serde_json::from_str(&store.get(ARTICLES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(raw[0]["date"], "");
}

#[test]
fn half_set_attachment_in_store_is_corrupt() {
    let conn = open_db_in_memory().unwrap();
    SqliteKvStore::new(&conn)
        .set(
            ARTICLES_KEY,
            r#"[{"id":"1","title":"T","author":"A","category":"","date":"2024-04-06",
                 "content":"C","fileName":"a.txt","fileSize":null}]"#,
        )
        .unwrap();

    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    assert!(matches!(repo.list_articles(), Err(RepoError::Corrupt(_))));
}

#[test]
fn create_fails_instead_of_spinning_when_ids_run_out() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    let last = Article::from_fields(ArticleId::from(i64::MAX.to_string()), fields("last"));
    let seeded = serde_json::to_string(&vec![last]).unwrap();
    store.set(ARTICLES_KEY, &seeded).unwrap();
    let repo = KvArticleRepository::with_clock(SqliteKvStore::new(&conn), fixed_clock);

    assert!(matches!(
        repo.create_article(fields("one more")),
        Err(RepoError::IdSpaceExhausted)
    ));
    assert_eq!(store.get(ARTICLES_KEY).unwrap().as_deref(), Some(seeded.as_str()));
    assert_eq!(repo.list_articles().unwrap().len(), 1);
}

#[test]
fn collection_roundtrips_through_json() {
    let conn = open_db_in_memory().unwrap();
    let repo = KvArticleRepository::new(SqliteKvStore::new(&conn));
    let a = repo.create_article(fields("a")).unwrap();
    let b = repo.create_article(fields("b")).unwrap();
    repo.update_article(&a.id, fields("a2")).unwrap();
    repo.delete_article(&b.id).unwrap();
    repo.create_article(fields("c")).unwrap();

    let articles = repo.list_articles().unwrap();
    let json = serde_json::to_string(&articles).unwrap();
    let decoded: Vec<Article> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, articles);
}
