// tests/export_pipeline.rs
use async_trait::async_trait;
use goodreads_shelf_sync::feed::GoodreadsRssProvider;
use goodreads_shelf_sync::{
    export_books, BookEntry, BookSource, ExportError, FetchError, FetchOutcome,
};

struct MockSource(Result<FetchOutcome, String>);

#[async_trait]
impl BookSource for MockSource {
    async fn fetch_latest(&self) -> Result<FetchOutcome, FetchError> {
        self.0.clone().map_err(FetchError::Parse)
    }
    fn name(&self) -> &'static str {
        "MockSource"
    }
}

fn book(title: &str) -> BookEntry {
    let mut b = BookEntry::new(title, format!("https://x.test/{title}"));
    b.guid = Some("same-guid".into());
    b.book_description = Some(format!("<p>{title}.Described</p>"));
    b
}

#[tokio::test]
async fn skipped_source_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("data/goodreads.books.json");

    let report = export_books(&MockSource(Ok(FetchOutcome::Skipped)), &out)
        .await
        .unwrap();

    assert!(report.skipped);
    assert_eq!(report.written, 0);
    assert!(!out.exists());
    assert!(!tmp.path().join("data").exists());
}

#[tokio::test]
async fn skipped_source_keeps_previous_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("books.json");
    std::fs::write(&out, "previous").unwrap();

    export_books(&MockSource(Ok(FetchOutcome::Skipped)), &out)
        .await
        .unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");
}

#[tokio::test]
async fn empty_fetch_still_writes_empty_array() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("nested/dir/books.json");

    let report = export_books(&MockSource(Ok(FetchOutcome::Fetched(vec![]))), &out)
        .await
        .unwrap();

    assert!(!report.skipped);
    assert_eq!(report.written, 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "[]");
}

#[tokio::test]
async fn order_and_duplicates_preserved_and_normalized() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("books.json");
    std::fs::write(&out, "old content that is much longer than the new one").unwrap();

    let items = vec![book("A"), book("B"), book("C"), book("A")];
    let report = export_books(&MockSource(Ok(FetchOutcome::Fetched(items))), &out)
        .await
        .unwrap();
    assert_eq!(report.written, 4);

    let text = std::fs::read_to_string(&out).unwrap();
    let back: Vec<BookEntry> = serde_json::from_str(&text).unwrap();
    let titles: Vec<&str> = back.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "A"]);
    assert_eq!(back[1].book_description.as_deref(), Some("B. Described"));
    assert!(back.iter().all(|b| b.guid.as_deref() == Some("same-guid")));
    assert!(!text.ends_with('\n'));
}

#[tokio::test]
async fn fetch_error_aborts_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("books.json");

    let err = export_books(&MockSource(Err("boom".into())), &out)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Fetch(FetchError::Parse(_))));
    assert!(!out.exists());
}

#[tokio::test]
async fn fixture_export_matches_expected_json() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("books.json");
    let provider = GoodreadsRssProvider::from_fixture(include_str!("fixtures/goodreads_rss.xml"));

    let report = export_books(&provider, &out).await.unwrap();
    assert_eq!(report.written, 3);

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let first = &v[0];
    assert_eq!(
        first["bookDescription"],
        "Ryland Grace is the sole survivor on a desperate mission. If he fails, humanity and the earth itself will perish. Except that right now, he doesn't know that."
    );
    assert_eq!(
        first["content"],
        "<a href=\"https://www.goodreads.com/book/show/54493401\"><img alt=\"Project Hail Mary\" src=\"https://i.gr-assets.com/images/S/phm._SY75_.jpg\" /></a><br/> author: Andy Weir<br/> name: Reader<br/> average rating: 4.52<br/>"
    );
    assert_eq!(first["userRating"], "5");
    assert_eq!(v[1]["bookDescription"], "Piranesi lives in the House. Perhaps he always has.");
    assert_eq!(v[1]["isbn"], "");
    assert!(v[1].get("userDateAdded").is_none());
    assert_eq!(v[2].as_object().unwrap().len(), 2);
}
