/// Grouping and aggregation engine tests
///
/// Run with: cargo test --test projection_tests
use accountbook::view::{NO_URL_GROUP, project, url_keys};
use accountbook::{AccountData, AccountRecord, BalanceFilter, FilterConfig, RecordId};
use std::collections::HashSet;

/// The three-record working set used throughout.
fn records() -> Vec<AccountRecord> {
    vec![
        AccountRecord::new(
            RecordId::from("u1"),
            AccountData::new("u1", "pw")
                .url("a.com")
                .phone("111")
                .balance(5.0)
                .code_requested(true),
        ),
        AccountRecord::new(
            RecordId::from("u2"),
            AccountData::new("u2", "pw")
                .url("a.com")
                .phone("222")
                .balance(0.0)
                .phone_verified(true),
        ),
        AccountRecord::new(
            RecordId::from("u3"),
            AccountData::new("u3", "pw")
                .url("b.com")
                .phone("333")
                .balance(10.0),
        ),
    ]
}

fn ids(group: &accountbook::UrlGroup) -> Vec<&str> {
    group.accounts.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_default_filter_groups_and_stats() {
    let view = project(&records(), &FilterConfig::default());

    assert_eq!(view.groups.len(), 2);
    assert_eq!(view.groups[0].key, "a.com");
    assert_eq!(ids(&view.groups[0]), vec!["u1", "u2"]);
    assert_eq!(view.groups[1].key, "b.com");
    assert_eq!(ids(&view.groups[1]), vec!["u3"]);

    assert_eq!(view.stats.total, 3);
    assert_eq!(view.stats.with_balance, 2);
    assert_eq!(view.stats.with_code, 1);
    assert_eq!(view.stats.with_phone_verified, 1);
    assert_eq!(view.stats.total_balance, 15.0);
}

#[test]
fn test_has_money_filter() {
    let config = FilterConfig::default().with_balance(BalanceFilter::HasMoney);
    let view = project(&records(), &config);

    assert_eq!(view.groups.len(), 2);
    assert_eq!(ids(&view.groups[0]), vec!["u1"]);
    assert_eq!(ids(&view.groups[1]), vec!["u3"]);
    assert_eq!(view.stats.total, 2);
    assert_eq!(view.stats.total_balance, 15.0);
}

#[test]
fn test_url_filter_restricts_groups() {
    let config = FilterConfig::default().with_url("a.com");
    let view = project(&records(), &config);

    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].key, "a.com");
    assert_eq!(ids(&view.groups[0]), vec!["u1", "u2"]);
    assert_eq!(view.stats.total, 2);
}

#[test]
fn test_search_matches_phone_of_one_record() {
    let config = FilterConfig::default().with_search("222");
    let view = project(&records(), &config);

    assert_eq!(view.stats.total, 1);
    assert_eq!(ids(&view.groups[0]), vec!["u2"]);
}

#[test]
fn test_empty_url_lands_in_sentinel_group() {
    let mut set = records();
    set.push(AccountRecord::new(
        RecordId::from("u4"),
        AccountData::new("u4", "pw"),
    ));

    let view = project(&set, &FilterConfig::default());
    let keys: Vec<&str> = view.groups.iter().map(|g| g.key.as_str()).collect();

    // "No URL" sorts per normal string comparison among the other keys.
    assert_eq!(keys, vec![NO_URL_GROUP, "a.com", "b.com"]);
    assert_eq!(ids(view.group(NO_URL_GROUP).unwrap()), vec!["u4"]);
}

// Every filtered record lands in exactly one group; nothing is lost or
// duplicated.
#[test]
fn test_grouping_is_a_partition() {
    let set = records();
    let view = project(&set, &FilterConfig::default());

    let grouped: Vec<&str> = view.groups.iter().flat_map(ids).collect();
    assert_eq!(grouped.len(), set.len());
    assert_eq!(
        grouped.iter().collect::<HashSet<_>>().len(),
        set.len()
    );
    assert_eq!(
        view.stats.total,
        view.groups.iter().map(|g| g.accounts.len()).sum::<usize>()
    );
}

#[test]
fn test_projection_is_idempotent() {
    let set = records();
    let config = FilterConfig::default().with_search("u");

    let first = project(&set, &config);
    let second = project(&set, &config);

    assert_eq!(first, second);
}

#[test]
fn test_empty_input_yields_empty_projection() {
    let view = project(&[], &FilterConfig::default().with_url("a.com"));

    assert!(view.is_empty());
    assert_eq!(view.stats.total, 0);
    assert_eq!(view.stats.with_balance, 0);
    assert_eq!(view.stats.with_code, 0);
    assert_eq!(view.stats.with_phone_verified, 0);
    assert_eq!(view.stats.total_balance, 0.0);
}

#[test]
fn test_filtered_out_everything_yields_zero_groups() {
    let config = FilterConfig::default().with_search("no-such-user");
    let view = project(&records(), &config);

    assert!(view.groups.is_empty());
    assert_eq!(view.stats, Default::default());
}

#[test]
fn test_stats_cover_filtered_set_not_full_store() {
    let config = FilterConfig::default().with_url("b.com");
    let view = project(&records(), &config);

    assert_eq!(view.stats.total, 1);
    assert_eq!(view.stats.total_balance, 10.0);
}

#[test]
fn test_url_keys_are_sorted_and_distinct() {
    let mut set = records();
    set.push(AccountRecord::new(
        RecordId::from("u4"),
        AccountData::new("u4", "pw"),
    ));

    assert_eq!(url_keys(&set), vec![NO_URL_GROUP, "a.com", "b.com"]);
}
