//! End-to-end regression test exercising the library's basic functionality:
//! version reporting, stemming, document indexing, query construction, and
//! match-set retrieval.

use xiphos::analysis::Stem;
use xiphos::document::Document;
use xiphos::index::{IndexReader, MemoryIndex};
use xiphos::query::{BooleanQuery, PhraseQuery, Query, TermQuery, XorQuery};
use xiphos::search::Searcher;

#[test]
fn smoketest() {
    // The version components joined with dots match the version string.
    let joined = format!(
        "{}.{}.{}",
        xiphos::major_version(),
        xiphos::minor_version(),
        xiphos::patch_version()
    );
    assert_eq!(joined, xiphos::VERSION, "unexpected version output");

    let stem = Stem::new("english").unwrap();
    assert_eq!(stem.description(), "Stem(english)");

    let mut doc = Document::new();
    doc.set_data("is there anybody out there?");
    doc.add_term("XYzzy");
    doc.add_posting(stem.stem_word("is"), 1);
    doc.add_posting(stem.stem_word("there"), 2);
    doc.add_posting(stem.stem_word("anybody"), 3);
    doc.add_posting(stem.stem_word("out"), 4);
    doc.add_posting(stem.stem_word("there"), 5);

    let mut index = MemoryIndex::new();
    index.add_document(doc).unwrap();
    assert_eq!(index.doc_count(), 1, "unexpected doc_count");

    let query = BooleanQuery::or_terms(["smoke", "test", "terms"]);
    assert_eq!(query.description(), "(smoke OR test OR terms)");

    let query1 = PhraseQuery::from_phrase("smoke test tuple");
    assert_eq!(query1.description(), "(smoke PHRASE 3 test PHRASE 3 tuple)");

    let query2 = XorQuery::new(vec![
        Box::new(TermQuery::new("smoke")),
        Box::new(query1.clone()),
        Box::new(TermQuery::new("string")),
    ]);
    assert_eq!(
        query2.description(),
        "(smoke XOR (smoke PHRASE 3 test PHRASE 3 tuple) XOR string)"
    );

    let query3 = BooleanQuery::or_terms(["a", "b"]);
    assert_eq!(query3.description(), "(a OR b)");

    let searcher = Searcher::new(&index);
    let query = BooleanQuery::or_terms(["there", "is"]);
    let mset = searcher.search(&query, 0, 10).unwrap();
    assert_eq!(mset.size(), 1, "unexpected mset.size()");

    let mut msize = 0;
    for _hit in &mset {
        msize += 1;
    }
    assert_eq!(msize, mset.size(), "unexpected number of entries in mset");

    let hit = mset.hit(0).unwrap();
    let terms = searcher.matching_terms(&query, hit.doc_id).unwrap();
    assert_eq!(terms.join(" "), "is there", "unexpected matching terms");
}

#[test]
fn smoketest_stemmed_indexing_and_search() {
    let stem = Stem::new("english").unwrap();
    let mut doc = Document::new();
    doc.set_data("some stemmed words");
    for (i, word) in ["searching", "engines", "ranking"].iter().enumerate() {
        doc.add_posting(stem.stem_word(word), i as u32);
    }

    let mut index = MemoryIndex::new();
    index.add_document(doc).unwrap();

    // Query terms must be stemmed the same way to match.
    let searcher = Searcher::new(&index);
    let query = TermQuery::new(stem.stem_word("searches"));
    let mset = searcher.search(&query, 0, 10).unwrap();
    assert_eq!(mset.size(), 1);
    assert!(mset.hit(0).unwrap().score > 0.0);
}
