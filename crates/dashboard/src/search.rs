//! Search and filter over a user's generated content.
//!
//! The list is small and already in memory, so this is a linear scan: no
//! index, ranking or pagination. Results keep their original order.

use std::fmt;

use keizok_core::ContentType;

use crate::models::GeneratedContent;

/// Content-type selector on the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentTypeFilter {
    #[default]
    All,
    Only(ContentType),
}

impl ContentTypeFilter {
    /// Options in the order the select lists them.
    pub const OPTIONS: [(Self, &'static str); 3] = [
        (Self::All, "すべて"),
        (Self::Only(ContentType::Image), "画像"),
        (Self::Only(ContentType::Video), "動画"),
    ];

    /// Parse a query value. Unknown or missing values select everything.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("image") => Self::Only(ContentType::Image),
            Some("video") => Self::Only(ContentType::Video),
            _ => Self::All,
        }
    }

    /// Query value for this selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(content_type) => content_type.as_str(),
        }
    }

    /// Whether a record of `content_type` passes the selector.
    #[must_use]
    pub fn accepts(self, content_type: ContentType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == content_type,
        }
    }
}

impl fmt::Display for ContentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `item`'s product name or description contains `query`,
/// ignoring case. An empty query matches everything.
#[must_use]
pub fn matches_query(item: &GeneratedContent, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.product_name.to_lowercase().contains(&needle)
        || item
            .product_description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

/// Records matching both the text query and the type selector, in order.
#[must_use]
pub fn filter_contents<'a>(
    records: &'a [GeneratedContent],
    query: &str,
    filter: ContentTypeFilter,
) -> Vec<&'a GeneratedContent> {
    records
        .iter()
        .filter(|item| matches_query(item, query) && filter.accepts(item.content_type))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use keizok_core::{ContentId, SocialPlatform, UserId};

    use super::*;

    fn item(name: &str, description: Option<&str>, content_type: ContentType) -> GeneratedContent {
        GeneratedContent {
            id: ContentId::generate(),
            user_id: UserId::new("u"),
            ec_site_id: None,
            product_name: name.to_owned(),
            product_description: description.map(String::from),
            product_image_url: None,
            platform: SocialPlatform::Instagram,
            content_type,
            generated_url: String::new(),
            generated_caption: None,
            generated_hashtags: None,
            prompt_used: None,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    fn catalogue() -> Vec<GeneratedContent> {
        vec![
            item("Organic Cotton Tee", Some("soft and breathable"), ContentType::Image),
            item("Leather Bag", Some("Handmade by artisans"), ContentType::Image),
            item("Wireless Earbuds", None, ContentType::Video),
            item("ヨガマット", Some("滑り止め加工"), ContentType::Image),
        ]
    }

    fn names<'a>(items: &[&'a GeneratedContent]) -> Vec<&'a str> {
        items.iter().map(|i| i.product_name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_all_filter_returns_everything() {
        let records = catalogue();
        assert_eq!(filter_contents(&records, "", ContentTypeFilter::All).len(), 4);
    }

    #[test]
    fn test_query_is_case_insensitive_on_name_and_description() {
        let records = catalogue();
        assert_eq!(
            names(&filter_contents(&records, "LEATHER", ContentTypeFilter::All)),
            vec!["Leather Bag"]
        );
        assert_eq!(
            names(&filter_contents(&records, "artisans", ContentTypeFilter::All)),
            vec!["Leather Bag"]
        );
        assert_eq!(
            names(&filter_contents(&records, "滑り止め", ContentTypeFilter::All)),
            vec!["ヨガマット"]
        );
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let records = catalogue();
        assert!(filter_contents(&records, " Bag ", ContentTypeFilter::All).is_empty());
    }

    #[test]
    fn test_type_filter() {
        let records = catalogue();
        let videos = filter_contents(&records, "", ContentTypeFilter::Only(ContentType::Video));
        assert_eq!(names(&videos), vec!["Wireless Earbuds"]);

        // "Wireless Earbuds" matches the text but is a video.
        let images = filter_contents(&records, "a", ContentTypeFilter::Only(ContentType::Image));
        assert_eq!(
            names(&images),
            vec!["Organic Cotton Tee", "Leather Bag"]
        );

        let images = filter_contents(&records, "o", ContentTypeFilter::Only(ContentType::Image));
        assert_eq!(names(&images), vec!["Organic Cotton Tee"]);
    }

    #[test]
    fn test_result_contains_record_iff_it_matches() {
        let records = catalogue();
        let queries = ["", "a", "bag", "SOFT", "zzz", "マット"];
        let filters = [
            ContentTypeFilter::All,
            ContentTypeFilter::Only(ContentType::Image),
            ContentTypeFilter::Only(ContentType::Video),
        ];

        for query in queries {
            for filter in filters {
                let result = filter_contents(&records, query, filter);
                for record in &records {
                    let q = query.to_lowercase();
                    let text_match = query.is_empty()
                        || record.product_name.to_lowercase().contains(&q)
                        || record
                            .product_description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(&q));
                    let type_match = filter == ContentTypeFilter::All
                        || filter == ContentTypeFilter::Only(record.content_type);
                    let present = result.iter().any(|r| r.id == record.id);
                    assert_eq!(present, text_match && type_match, "{query:?} {filter}");
                }
            }
        }
    }

    #[test]
    fn test_filter_parse_is_lenient() {
        assert_eq!(ContentTypeFilter::parse(None), ContentTypeFilter::All);
        assert_eq!(ContentTypeFilter::parse(Some("all")), ContentTypeFilter::All);
        assert_eq!(ContentTypeFilter::parse(Some("gif")), ContentTypeFilter::All);
        assert_eq!(
            ContentTypeFilter::parse(Some("video")),
            ContentTypeFilter::Only(ContentType::Video)
        );
    }
}
