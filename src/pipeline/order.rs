use super::query::SortKey;
use crate::feed::Article;
use std::cmp::Reverse;

/// Order stage.
///
/// Both orderings are stable, so ties keep the relative order produced by the
/// Select stage. Articles whose `date` does not parse sort after every dated
/// article under [`SortKey::Date`].
pub fn order(mut articles: Vec<&Article>, sort_key: SortKey) -> Vec<&Article> {
    match sort_key {
        SortKey::Views => articles.sort_by_key(|a| Reverse(a.views)),
        SortKey::Date => articles.sort_by_cached_key(|a| {
            let published = a.published_at();
            (published.is_none(), Reverse(published))
        }),
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{article, scenario};
    use proptest::prelude::*;

    fn titles(ordered: &[&Article]) -> Vec<String> {
        ordered.iter().map(|a| a.title.clone()).collect()
    }

    #[test]
    fn test_scenario_orders() {
        let feed = scenario();
        let all: Vec<&Article> = feed.iter().collect();
        assert_eq!(titles(&order(all.clone(), SortKey::Views)), vec!["Beta", "Alpha"]);
        assert_eq!(titles(&order(all, SortKey::Date)), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_views_and_date_can_disagree() {
        let feed = vec![
            article("Old hit", "x", 900, "2020-01-01"),
            article("New flop", "x", 1, "2024-01-01"),
        ];
        let all: Vec<&Article> = feed.iter().collect();
        assert_eq!(titles(&order(all.clone(), SortKey::Views)), vec!["Old hit", "New flop"]);
        assert_eq!(titles(&order(all, SortKey::Date)), vec!["New flop", "Old hit"]);
    }

    #[test]
    fn test_view_ties_are_stable() {
        let feed = vec![
            article("first", "x", 5, "2024-01-01"),
            article("second", "x", 5, "2024-01-01"),
            article("third", "x", 7, "2024-01-01"),
        ];
        let all: Vec<&Article> = feed.iter().collect();
        assert_eq!(titles(&order(all, SortKey::Views)), vec!["third", "first", "second"]);
    }

    #[test]
    fn test_unparseable_dates_sort_last_in_input_order() {
        let feed = vec![
            article("bad one", "x", 0, "not a date"),
            article("old", "x", 0, "2023-01-01"),
            article("bad two", "x", 0, ""),
            article("new", "x", 0, "2024-01-01T10:00:00Z"),
        ];
        let all: Vec<&Article> = feed.iter().collect();
        assert_eq!(
            titles(&order(all, SortKey::Date)),
            vec!["new", "old", "bad one", "bad two"]
        );
    }

    #[test]
    fn test_mixed_date_formats_compare_chronologically() {
        let feed = vec![
            article("midnight", "x", 0, "2024-06-01"),
            article("noon", "x", 0, "2024-06-01 12:00:00"),
            article("offset", "x", 0, "2024-06-01T23:00:00-02:00"),
        ];
        let all: Vec<&Article> = feed.iter().collect();
        assert_eq!(
            titles(&order(all, SortKey::Date)),
            vec!["offset", "noon", "midnight"]
        );
    }

    #[test]
    fn test_order_empty() {
        assert!(order(Vec::new(), SortKey::Date).is_empty());
    }

    fn arb_article() -> impl Strategy<Value = Article> {
        (
            0u64..100,
            2000i32..2030,
            1u32..13,
            1u32..29,
            prop::bool::weighted(0.1),
        )
            .prop_map(|(views, y, m, d, broken)| {
                let date = if broken {
                    "??".to_string()
                } else {
                    format!("{y:04}-{m:02}-{d:02}")
                };
                article("t", "x", views, &date)
            })
    }

    proptest! {
        #[test]
        fn prop_views_non_increasing(feed in prop::collection::vec(arb_article(), 0..30)) {
            let ordered = order(feed.iter().collect(), SortKey::Views);
            prop_assert_eq!(ordered.len(), feed.len());
            for pair in ordered.windows(2) {
                prop_assert!(pair[0].views >= pair[1].views);
            }
        }

        #[test]
        fn prop_dates_non_increasing(feed in prop::collection::vec(arb_article(), 0..30)) {
            let ordered = order(feed.iter().collect(), SortKey::Date);
            prop_assert_eq!(ordered.len(), feed.len());
            for pair in ordered.windows(2) {
                match (pair[0].published_at(), pair[1].published_at()) {
                    (Some(a), Some(b)) => prop_assert!(a >= b),
                    (None, Some(_)) => prop_assert!(false, "undated article before dated one"),
                    _ => {}
                }
            }
        }
    }
}
