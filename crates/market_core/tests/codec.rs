use market_core::{decode, encode, FilterState, Location};
use pretty_assertions::assert_eq;

#[test]
fn decode_keeps_strings_and_unknown_keys() {
    let filters = decode("?category_id=1&page=2&colour=red");

    assert_eq!(filters.len(), 3);
    assert_eq!(filters.get("category_id"), Some("1"));
    assert_eq!(filters.get("page"), Some("2"));
    assert_eq!(filters.get("colour"), Some("red"));
    assert_eq!(filters.get("sort"), None);
}

#[test]
fn decode_handles_plus_percent_and_bare_keys() {
    let filters = decode("query=red+lamp%20shade&x=%26&&flag");

    assert_eq!(filters.get("query"), Some("red lamp shade"));
    assert_eq!(filters.get("x"), Some("&"));
    assert_eq!(filters.get("flag"), Some(""));
    assert_eq!(filters.len(), 3);
}

#[test]
fn malformed_percent_encoding_falls_back_to_raw_text() {
    let filters = decode("query=100%zz&other=%FF");

    assert_eq!(filters.get("query"), Some("100%zz"));
    assert_eq!(filters.get("other"), Some("%FF"));
}

#[test]
fn repeated_key_keeps_position_and_last_value() {
    let filters = decode("page=1&query=a&page=3");

    assert_eq!(encode(&filters), "page=3&query=a");
}

#[test]
fn encode_preserves_insertion_order_and_escapes() {
    let filters: FilterState = [("query", "desk & chair"), ("category_id", "4")]
        .into_iter()
        .collect();

    assert_eq!(encode(&filters), "query=desk%20%26%20chair&category_id=4");
}

#[test]
fn encode_drops_unset_values() {
    let filters = FilterState::from_optional_pairs([
        ("query", Some("lamp")),
        ("category_id", None::<&str>),
        ("page", Some("3")),
    ]);

    let decoded = decode(&encode(&filters));
    assert_eq!(decoded.get("query"), Some("lamp"));
    assert_eq!(decoded.get("page"), Some("3"));
    assert!(!decoded.contains("category_id"));
    assert_eq!(decoded, filters);
}

#[test]
fn decode_encode_decode_is_stable() {
    for query in [
        "",
        "b=2&a=hello+world",
        "c=%zz&d=%E2%9C%93",
        "?sort=price&order=asc&nav=new&min_price=10.5",
        "empty=&=orphan&x=%FF",
    ] {
        let once = decode(query);
        let twice = decode(&encode(&once));
        assert_eq!(twice, once, "query {query:?}");
    }
}

#[test]
fn equality_ignores_key_order() {
    assert_eq!(decode("a=1&b=2"), decode("b=2&a=1"));
    assert_ne!(decode("a=1&b=2"), decode("a=1"));
}

#[test]
fn location_parses_and_prints() {
    let location = Location::parse("/search?query=lamp&page=2#top");
    assert_eq!(location.path, "/search");
    assert_eq!(location.filters.get("page"), Some("2"));
    assert_eq!(location.to_string(), "/search?query=lamp&page=2");

    assert_eq!(Location::parse("/search").to_string(), "/search");
    assert_eq!(Location::parse("").path, "/");
    assert_eq!(Location::parse("?nav=new").to_string(), "/?nav=new");
}
