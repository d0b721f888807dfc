//! Index settings and mappings for the posts index.
//!
//! Two custom analyzers back every text field:
//!
//! - `search_analyzer`: standard tokenizer, lowercase, then ASCII folding
//!   that keeps the original token next to the folded one, so that both
//!   "phở" and "pho" match.
//! - `prefix_analyzer`: the same chain followed by an edge n-gram filter
//!   (2..=20) for incremental prefix matching.
//!
//! Prefix sub-fields are indexed with `prefix_analyzer` and queried with
//! `search_analyzer`, so a query term is matched whole against the stored
//! grams.

use serde_json::{json, Value};

/// The default name of the posts index.
pub const POSTS_INDEX: &str = "posts_index";

/// Name of the query-time analyzer.
pub const SEARCH_ANALYZER: &str = "search_analyzer";

/// Name of the index-time prefix analyzer.
pub const PREFIX_ANALYZER: &str = "prefix_analyzer";

/// Minimum edge n-gram length.
pub const EDGE_NGRAM_MIN: u32 = 2;

/// Maximum edge n-gram length.
pub const EDGE_NGRAM_MAX: u32 = 20;

/// A text sub-field indexed with the prefix analyzer.
fn prefix_subfield() -> Value {
    json!({
        "type": "text",
        "analyzer": PREFIX_ANALYZER,
        "search_analyzer": SEARCH_ANALYZER
    })
}

/// A text field analyzed for search, with a `.ngram` prefix sub-field.
fn text_with_ngram() -> Value {
    json!({
        "type": "text",
        "analyzer": SEARCH_ANALYZER,
        "fields": {
            "ngram": prefix_subfield()
        }
    })
}

/// A keyword field with a `.text` prefix sub-field.
fn keyword_with_text() -> Value {
    json!({
        "type": "keyword",
        "fields": {
            "text": prefix_subfield()
        }
    })
}

/// Get the settings and mappings body used to create the posts index.
pub fn posts_index_body() -> Value {
    json!({
        "settings": {
            "analysis": {
                "filter": {
                    "folding": {
                        "type": "asciifolding",
                        "preserve_original": true
                    },
                    "edge_ngram_filter": {
                        "type": "edge_ngram",
                        "min_gram": EDGE_NGRAM_MIN,
                        "max_gram": EDGE_NGRAM_MAX
                    }
                },
                "analyzer": {
                    SEARCH_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "folding"]
                    },
                    PREFIX_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "folding", "edge_ngram_filter"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },

                "author_id": { "type": "keyword" },
                "author_avatar": { "type": "keyword" },
                "author_username": keyword_with_text(),
                "author_fullname": text_with_ngram(),

                "title": text_with_ngram(),
                "content": text_with_ngram(),

                "hashtags": keyword_with_text(),

                "media": {
                    "type": "nested",
                    "properties": {
                        "mediaUrl": { "type": "keyword" },
                        "mediaType": { "type": "keyword" }
                    }
                },

                "post_type": { "type": "keyword" },
                "visibility": { "type": "keyword" },

                "expired_at": { "type": "date" },
                "created_at": { "type": "date" },
                "updated_at": { "type": "date" },

                "like_count": { "type": "integer" },
                "comment_count": { "type": "integer" },
                "share_count": { "type": "integer" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzers() {
        let body = posts_index_body();
        let analysis = &body["settings"]["analysis"];

        assert_eq!(analysis["filter"]["folding"]["type"], "asciifolding");
        assert_eq!(analysis["filter"]["folding"]["preserve_original"], true);
        assert_eq!(analysis["filter"]["edge_ngram_filter"]["type"], "edge_ngram");
        assert_eq!(analysis["filter"]["edge_ngram_filter"]["min_gram"], 2);
        assert_eq!(analysis["filter"]["edge_ngram_filter"]["max_gram"], 20);

        assert_eq!(analysis["analyzer"][SEARCH_ANALYZER]["tokenizer"], "standard");
        assert_eq!(
            analysis["analyzer"][SEARCH_ANALYZER]["filter"],
            json!(["lowercase", "folding"])
        );
        assert_eq!(analysis["analyzer"][PREFIX_ANALYZER]["tokenizer"], "standard");
        assert_eq!(
            analysis["analyzer"][PREFIX_ANALYZER]["filter"],
            json!(["lowercase", "folding", "edge_ngram_filter"])
        );
    }

    #[test]
    fn test_keyword_fields() {
        let body = posts_index_body();
        let props = &body["mappings"]["properties"];

        for field in ["id", "author_id", "post_type", "visibility", "author_avatar"] {
            assert_eq!(props[field]["type"], "keyword", "{field} should be keyword");
        }
    }

    #[test]
    fn test_text_fields_have_asymmetric_ngram_subfield() {
        let body = posts_index_body();
        let props = &body["mappings"]["properties"];

        for field in ["title", "content", "author_fullname"] {
            assert_eq!(props[field]["type"], "text");
            assert_eq!(props[field]["analyzer"], SEARCH_ANALYZER);
            let ngram = &props[field]["fields"]["ngram"];
            assert_eq!(ngram["analyzer"], PREFIX_ANALYZER, "{field}.ngram");
            assert_eq!(ngram["search_analyzer"], SEARCH_ANALYZER, "{field}.ngram");
        }
    }

    #[test]
    fn test_keyword_fields_with_prefix_text() {
        let body = posts_index_body();
        let props = &body["mappings"]["properties"];

        for field in ["hashtags", "author_username"] {
            assert_eq!(props[field]["type"], "keyword");
            let text = &props[field]["fields"]["text"];
            assert_eq!(text["type"], "text");
            assert_eq!(text["analyzer"], PREFIX_ANALYZER);
            assert_eq!(text["search_analyzer"], SEARCH_ANALYZER);
        }
    }

    #[test]
    fn test_media_is_nested() {
        let body = posts_index_body();
        let media = &body["mappings"]["properties"]["media"];

        assert_eq!(media["type"], "nested");
        assert_eq!(media["properties"]["mediaUrl"]["type"], "keyword");
        assert_eq!(media["properties"]["mediaType"]["type"], "keyword");
    }

    #[test]
    fn test_counters_and_dates() {
        let body = posts_index_body();
        let props = &body["mappings"]["properties"];

        for field in ["like_count", "comment_count", "share_count"] {
            assert_eq!(props[field]["type"], "integer");
        }
        for field in ["created_at", "updated_at", "expired_at"] {
            assert_eq!(props[field]["type"], "date");
        }
    }

    #[test]
    fn test_index_name() {
        assert_eq!(POSTS_INDEX, "posts_index");
    }
}
