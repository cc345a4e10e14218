//! # Listing Record Flattening
//!
//! Turns one detail-endpoint payload into a flat field map: a fixed base
//! projection of the listing (title, address, price, seller contact) merged
//! with the free-form `items` attribute list the API returns per listing.
//!
//! Every lookup defaults; a sparse or malformed payload still yields a
//! record, with empty strings where data is missing.

use serde_json::{Map, Value};

/// Base column names, in the order they appear in every record.
pub const BASE_FIELDS: [&str; 9] = [
    "title",
    "description",
    "address",
    "price",
    "seller_name",
    "seller_email",
    "seller_id",
    "code_number",
    "seller_phone",
];

/// One flattened listing: field name to scalar value, insertion ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    fields: Map<String, Value>,
}

impl ListingRecord {
    /// Builds a record from a detail payload.
    ///
    /// Stage one fills the base projection via defaulting lookups. Stage two
    /// folds the `items` name/value pairs over it in order; a pair whose name
    /// collides with a base field overwrites it. That last-write-wins merge
    /// is intentional, mirroring how the source data is meant to be read.
    #[must_use]
    pub fn from_detail(detail: &Value) -> Self {
        let seller = nested(detail, &["_embedded", "seller"]);

        let mut fields = Map::new();
        fields.insert(
            "title".to_owned(),
            string_at(detail, &["name", "value"]),
        );
        fields.insert(
            "description".to_owned(),
            string_at(detail, &["meta_description"]),
        );
        fields.insert(
            "address".to_owned(),
            string_at(detail, &["locality", "value"]),
        );
        fields.insert(
            "price".to_owned(),
            value_at(detail, &["price_czk", "value_raw"]),
        );
        fields.insert("seller_name".to_owned(), string_at(seller, &["user_name"]));
        fields.insert("seller_email".to_owned(), string_at(seller, &["email"]));
        fields.insert("seller_id".to_owned(), value_at(seller, &["user_id"]));

        // Phone fields come from the first entry of the seller's phone list;
        // an absent or empty list leaves both columns empty.
        let first_phone = seller
            .get("phones")
            .and_then(Value::as_array)
            .and_then(|phones| phones.first());
        match first_phone {
            Some(phone) => {
                fields.insert("code_number".to_owned(), string_at(phone, &["code"]));
                fields.insert("seller_phone".to_owned(), string_at(phone, &["number"]));
            }
            None => {
                fields.insert("code_number".to_owned(), Value::String(String::new()));
                fields.insert("seller_phone".to_owned(), Value::String(String::new()));
            }
        }

        // Fold the free-form attribute list over the base projection,
        // last write wins on name collision.
        if let Some(items) = detail.get("items").and_then(Value::as_array) {
            for item in items {
                let Some(name) = item.get("name").and_then(Value::as_str) else {
                    continue;
                };
                let value = item.get("value").cloned().unwrap_or(Value::Null);
                fields.insert(name.to_owned(), value);
            }
        }

        Self { fields }
    }

    /// Field value by name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Renders one field as a CSV cell. Strings pass through verbatim;
    /// numbers and booleans use their JSON form; null and missing are empty.
    #[must_use]
    pub fn cell(&self, name: &str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Walks nested objects, yielding null for anything missing.
fn nested<'a>(value: &'a Value, path: &[&str]) -> &'a Value {
    static EMPTY: Value = Value::Null;
    let mut current = value;
    for key in path {
        current = current.get(key).unwrap_or(&EMPTY);
    }
    current
}

/// Value at a nested path, defaulting to the empty string.
fn value_at(value: &Value, path: &[&str]) -> Value {
    match nested(value, path) {
        Value::Null => Value::String(String::new()),
        found => found.clone(),
    }
}

/// String at a nested path; non-string scalars are rendered, missing is empty.
fn string_at(value: &Value, path: &[&str]) -> Value {
    match nested(value, path) {
        Value::Null => Value::String(String::new()),
        Value::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_detail() -> Value {
        json!({
            "name": { "value": "Prodej bytu 2+kk 45 m²" },
            "meta_description": "Byt v centru Prahy",
            "locality": { "value": "Praha 1 - Nové Město" },
            "price_czk": { "value_raw": 7_500_000 },
            "_embedded": {
                "seller": {
                    "user_name": "Jana Novákova",
                    "email": "jana@example.cz",
                    "user_id": 4711,
                    "phones": [
                        { "code": "+420", "number": "777123456" },
                        { "code": "+420", "number": "602987654" }
                    ]
                }
            },
            "items": [
                { "name": "Stavba", "value": "Cihlová" },
                { "name": "Podlaží", "value": "3. podlaží z 5" }
            ]
        })
    }

    #[test]
    fn base_projection_is_extracted() {
        let record = ListingRecord::from_detail(&sample_detail());

        assert_eq!(record.cell("title"), "Prodej bytu 2+kk 45 m²");
        assert_eq!(record.cell("description"), "Byt v centru Prahy");
        assert_eq!(record.cell("address"), "Praha 1 - Nové Město");
        assert_eq!(record.cell("price"), "7500000");
        assert_eq!(record.cell("seller_name"), "Jana Novákova");
        assert_eq!(record.cell("seller_email"), "jana@example.cz");
        assert_eq!(record.cell("seller_id"), "4711");
        assert_eq!(record.cell("code_number"), "+420");
        assert_eq!(record.cell("seller_phone"), "777123456");
        assert_eq!(record.cell("Stavba"), "Cihlová");
    }

    #[test]
    fn base_fields_lead_in_insertion_order() {
        let record = ListingRecord::from_detail(&sample_detail());
        let keys: Vec<&str> = record.keys().take(BASE_FIELDS.len()).collect();
        assert_eq!(keys, BASE_FIELDS);
    }

    #[test]
    fn flattening_is_idempotent_over_the_same_payload() {
        let detail = sample_detail();
        assert_eq!(
            ListingRecord::from_detail(&detail),
            ListingRecord::from_detail(&detail)
        );
    }

    #[test]
    fn empty_phone_list_yields_empty_phone_columns() {
        let mut detail = sample_detail();
        detail["_embedded"]["seller"]["phones"] = json!([]);

        let record = ListingRecord::from_detail(&detail);
        assert_eq!(record.cell("code_number"), "");
        assert_eq!(record.cell("seller_phone"), "");
    }

    #[test]
    fn attribute_named_price_overwrites_base_price() {
        let mut detail = sample_detail();
        detail["items"] = json!([{ "name": "price", "value": "dohodou" }]);

        let record = ListingRecord::from_detail(&detail);
        assert_eq!(record.cell("price"), "dohodou");
    }

    #[test]
    fn missing_structure_yields_empty_strings_not_errors() {
        let record = ListingRecord::from_detail(&json!({}));

        for field in BASE_FIELDS {
            assert_eq!(record.cell(field), "", "field {field}");
        }
        assert_eq!(record.len(), BASE_FIELDS.len());
    }

    #[test]
    fn attribute_without_name_is_skipped() {
        let mut detail = sample_detail();
        detail["items"] = json!([{ "value": "orphan" }, { "name": "Výtah", "value": true }]);

        let record = ListingRecord::from_detail(&detail);
        assert_eq!(record.len(), BASE_FIELDS.len() + 1);
        assert_eq!(record.cell("Výtah"), "true");
    }
}
