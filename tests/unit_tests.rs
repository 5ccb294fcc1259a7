// Unit tests for the Play Board engine public API

use playboard_engine::core::{
    age::{AgeBand, AgeBounds},
    compute_insights, compute_needs, parse_query, score_and_filter_products,
};
use playboard_engine::models::{ParsedQuery, Product};
use playboard_engine::services::{CacheKey, CatalogCache};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_newborn_and_teen_bands() {
    for age in [0.0, 0.5, 1.0, 1.49] {
        assert_eq!(AgeBand::from_years(age).map(AgeBand::label), Some("Newborn to 18 months"));
    }
    for age in [12.0, 12.9] {
        assert_eq!(AgeBand::from_years(age).map(AgeBand::label), Some("10 to Early Teens"));
    }
    for age in [13.0, 13.5, 17.0, 40.0] {
        assert_eq!(AgeBand::from_years(age).map(AgeBand::label), Some("Preteens to Older Teens"));
    }
    assert_eq!(AgeBand::from_years(-1.0), None);
}

#[test]
fn test_overlapping_windows_first_match_wins() {
    assert_eq!(AgeBand::from_years(2.5), Some(AgeBand::EighteenMonthsToThree));
    assert_eq!(AgeBand::from_years(3.0), Some(AgeBand::TwoToFive));
    assert_eq!(AgeBand::from_years(10.0), Some(AgeBand::EightToEleven));
    assert_eq!(AgeBand::from_years(12.0), Some(AgeBand::TenToEarlyTeens));
    assert_eq!(AgeBand::from_years(13.0), Some(AgeBand::PreteensToOlderTeens));
}

#[test]
fn test_parse_empty_query() {
    assert_eq!(parse_query(""), ParsedQuery::default());
    assert!(!parse_query("   ").has_results);
}

#[test]
fn test_parse_seven_year_old() {
    let parsed = parse_query("7-year-old who loves building");

    assert_eq!(parsed.age_range.as_deref(), Some("5 to 8 years"));
    assert!(parsed.categories.contains(&"building".to_string()));
    assert!(parsed.play_types.contains(&"building_toys".to_string()));
    assert!(parsed.has_results);
}

#[test]
fn test_parse_toddler_into_sensory_play() {
    let parsed = parse_query("Toddler into sensory play");

    assert_eq!(parsed.age_range.as_deref(), Some("18 months to 3 years"));
    assert!(parsed.categories.contains(&"sensory".to_string()));
}

#[test]
fn test_parse_is_idempotent() {
    let query = "my 4 to 6 year old likes dinosaurs, puzzles and art";
    assert_eq!(parse_query(query), parse_query(query));
}

#[test]
fn test_parse_unrecognized_text() {
    let parsed = parse_query("something completely different");
    assert!(parsed.age_range.is_none());
    assert!(parsed.categories.is_empty());
    assert!(!parsed.has_results);
}

#[test]
fn test_insights_capped_at_three() {
    assert!(compute_insights(&[]).is_empty());

    let everything = tags(&[
        "access_to_toys",
        "transforming",
        "trajectory",
        "enveloping",
        "connecting",
        "books",
    ]);
    assert_eq!(compute_insights(&everything).len(), 3);
    assert_eq!(compute_needs(&everything).len(), 6);
}

#[test]
fn test_unknown_tags_produce_nothing() {
    assert!(compute_insights(&tags(&["juggling"])).is_empty());
}

#[test]
fn test_age_range_parser() {
    assert_eq!(
        AgeBounds::parse_or(Some("4-7 years"), AgeBounds::ALL_AGES),
        AgeBounds::new(4.0, 7.0)
    );
    assert_eq!(
        AgeBounds::parse_or(Some("6 months"), AgeBounds::ALL_AGES),
        AgeBounds::new(0.5, 0.5)
    );
    assert_eq!(
        AgeBounds::parse_or(Some("3\u{2013}5 years"), AgeBounds::ALL_AGES),
        AgeBounds::new(3.0, 5.0)
    );
}

#[test]
fn test_age_range_defaults_per_call_site() {
    assert_eq!(AgeBounds::parse_or(None, AgeBounds::ALL_AGES), AgeBounds::new(0.0, 99.0));
    assert_eq!(AgeBounds::parse_or(Some(""), AgeBounds::ALL_AGES), AgeBounds::new(0.0, 99.0));
    assert_eq!(AgeBounds::parse_or(None, AgeBounds::SHOP_DEFAULT), AgeBounds::new(0.0, 24.0));
}

#[test]
fn test_scorer_never_returns_out_of_range_products() {
    let catalog = vec![
        Product::new("1", "Dollhouse", &["Dolls"], Some("8-12 years")),
        Product::new("2", "Shape Sorter", &["Fine Motor"], Some("1-3 years")),
        Product::new("3", "Climbing Arch", &["Gross Motor"], Some("1-6 years")),
    ];
    let needs = tags(&["nurturing-dolls", "gross-motor-climb"]);

    let ranked = score_and_filter_products(2, &needs, &catalog);
    let ids: Vec<_> = ranked.iter().map(|p| p.product.id.as_str()).collect();

    assert_eq!(ids, vec!["3", "2"]);
    assert!(ranked.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
}

#[test]
fn test_scorer_output_capped_at_six() {
    let catalog: Vec<Product> = (0..10)
        .map(|i| Product::new(&format!("p{}", i), "Blocks", &["Building"], None))
        .collect();

    let ranked = score_and_filter_products(5, &tags(&["building-foundations"]), &catalog);
    assert_eq!(ranked.len(), 6);
    assert_eq!(ranked[0].product.id, "p0");
    assert!(ranked.iter().all(|p| p.relevance_score == 2));
}

#[test]
fn test_scorer_without_needs_only_filters_by_age() {
    let catalog = vec![
        Product::new("1", "Blocks", &["Building"], Some("3-6 years")),
        Product::new("2", "Rattle", &["Sensory"], Some("0-12 months")),
    ];

    let ranked = score_and_filter_products(4, &[], &catalog);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].relevance_score, 0);
    assert!(score_and_filter_products(4, &[], &[]).is_empty());
}

#[test]
fn test_catalog_cache_round_trip() {
    let cache = CatalogCache::new(4, 60);
    let key = CacheKey::catalog("http://catalog.test");

    let cached = tokio_test::block_on(async {
        cache
            .insert(&key, vec![Product::new("1", "Blocks", &["Building"], None)])
            .await;
        cache.get(&key).await
    });

    assert_eq!(cached.unwrap()[0].name, "Blocks");
    assert_eq!(cache.stats().hit_count, 1);
}
