use super::*;

#[test]
fn deals_href_without_selection_is_bare_path() {
    assert_eq!(deals_href(ViewType::Board, None, None, &DealFilter::default()), "/deal/board");
    assert_eq!(deals_href(ViewType::Calendar, None, None, &DealFilter::default()), "/deal/calendar");
}

#[test]
fn deals_href_keeps_selection_before_filters() {
    let filter = DealFilter { search: Some("acme".into()), next_week: true, ..DealFilter::default() };
    assert_eq!(
        deals_href(ViewType::Board, Some("b1"), Some("p1"), &filter),
        "/deal/board?id=b1&pipelineId=p1&search=acme&nextWeek=true"
    );
}

#[test]
fn deals_href_encodes_values() {
    let filter = DealFilter { start_date: Some("2024-05-01 09:30".into()), ..DealFilter::default() };
    let href = deals_href(ViewType::Board, Some("b1"), None, &filter);
    assert_eq!(href, "/deal/board?id=b1&startDate=2024-05-01+09%3A30");
}

#[test]
fn deals_href_round_trips_through_from_query() {
    let filter = DealFilter {
        search: Some("big deal".into()),
        company_ids: vec!["c1".into(), "c2".into()],
        no_close_date: true,
        ..DealFilter::default()
    };
    let href = deals_href(ViewType::Board, Some("b1"), Some("p1"), &filter);
    let query = href.split_once('?').map(|(_, q)| q).unwrap_or_default();
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    let parsed = DealFilter::from_query(|key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()));
    assert_eq!(parsed, filter);
}
