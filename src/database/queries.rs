//! Elasticsearch request bodies for the users collection.

use crate::models::UserUpdate;
use serde_json::{json, Value};

const UPDATE_FIELDS_SCRIPT: &str = "\
ctx._source['name'] = params.name; \
ctx._source['email'] = params.email; \
ctx._source['rank'] = params.rank; \
ctx._source['occupation'] = params.occupation; \
ctx._source['address'] = params.address; \
ctx._source['jobHistory'] = params.jobHistory; \
ctx._source['message'] = params.message";

const APPEND_FAVORITE_SCRIPT: &str = "\
if (ctx._source['favorite'] == null) { ctx._source['favorite'] = new ArrayList(); } \
ctx._source['favorite'].add(params.favorite)";

// Removing at indexOf() == -1 is an error in Painless, so a miss becomes a noop.
const REMOVE_FAVORITE_SCRIPT: &str = "\
int i = ctx._source['favorite'] == null ? -1 : ctx._source['favorite'].indexOf(params.favorite); \
if (i >= 0) { ctx._source['favorite'].remove(i); } else { ctx.op = 'noop'; }";

/// Every document, up to `size` hits.
pub fn match_all(size: usize) -> Value {
    json!({
        "size": size,
        "query": { "match_all": {} }
    })
}

/// Exact-value match on a single field.
pub fn term(field: &str, value: &str) -> Value {
    json!({
        "query": {
            "term": { field: value }
        }
    })
}

/// Distinct values of `field`, without returning documents.
pub fn terms_aggregation(name: &str, field: &str) -> Value {
    json!({
        "size": 0,
        "aggs": {
            name: {
                "terms": { "field": field }
            }
        }
    })
}

pub fn update_fields(update: &UserUpdate) -> Value {
    scripted_update(&update.id, UPDATE_FIELDS_SCRIPT, json!(update))
}

pub fn append_favorite(id: &str, favorite: Option<&str>) -> Value {
    scripted_update(id, APPEND_FAVORITE_SCRIPT, json!({ "favorite": favorite }))
}

pub fn remove_favorite(id: &str, favorite: Option<&str>) -> Value {
    scripted_update(id, REMOVE_FAVORITE_SCRIPT, json!({ "favorite": favorite }))
}

fn scripted_update(id: &str, source: &str, params: Value) -> Value {
    json!({
        "script": {
            "lang": "painless",
            "source": source,
            "params": params
        },
        "query": {
            "term": { "id": id }
        }
    })
}
