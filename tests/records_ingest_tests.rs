use racechart::core::{
    build_roster, extract_results_id, filter_by_distance, filter_finishers, parse_results_json,
    results_json_url, search_roster, unique_distances,
};

const EXPORT: &str = r#"[
    {"msc": "1", "czasnetto": "01:32:10,000", "start": "09:00:00", "nazwisko": "Kowalski",
     "imie": "Jan", "numer": 101, "katw": "M30", "odleglosc": "21097.00", "plec": "M"},
    {"msc": 2, "czasnetto": "01:35:44,250", "start": "09:00:12", "nazwisko": "Nowak",
     "imie": "Ewa", "numer": "17", "katw": "K30", "odleglosc": "21097.00"},
    {"msc": "1", "czasnetto": "00:41:02,000", "start": "10:00", "nazwisko": "Wisniewski",
     "imie": "Piotr", "numer": "301", "odleglosc": "10000.00"},
    {"msc": "0", "czasnetto": "", "start": "", "nazwisko": "Zielinska", "imie": "Anna",
     "numer": "55", "odleglosc": "10000.00"},
    {"msc": null, "czasnetto": null}
]"#;

#[test]
fn export_parses_mixed_field_types() {
    let records = parse_results_json(EXPORT).expect("valid export");
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].bib.as_deref(), Some("101"));
    assert_eq!(records[1].placing.as_deref(), Some("2"));
    assert_eq!(records[4].net_time, None);
    assert_eq!(filter_finishers(&records).len(), 3);
}

#[test]
fn distances_are_sorted_and_labelled() {
    let records = parse_results_json(EXPORT).expect("valid export");
    let distances = unique_distances(&records);
    let labels: Vec<&str> = distances.iter().map(|option| option.label.as_str()).collect();
    assert_eq!(distances[0].value, "10000.00");
    assert_eq!(labels[0], "10 km");
    assert!(labels[1].starts_with("Half Marathon"));
    assert_eq!(filter_by_distance(&records, "10000.00").len(), 2);
}

#[test]
fn roster_search_finds_runners_by_name_and_bib() {
    let records = parse_results_json(EXPORT).expect("valid export");
    let roster = build_roster(&records);
    assert_eq!(roster.len(), 4);

    let by_name = search_roster(&roster, "ewa");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].display_name, "Nowak Ewa (K30) 21.10km #17");

    let by_bib = search_roster(&roster, "301");
    assert_eq!(by_bib[0].name, "Wisniewski Piotr");
}

#[test]
fn results_page_maps_to_json_export() {
    let page = "https://wyniki.datasport.pl/results4711/index.php?lang=en";
    assert_eq!(
        results_json_url(page).expect("datasport url"),
        "https://wyniki.datasport.pl/results4711/results.json"
    );
    assert_eq!(extract_results_id(page).as_deref(), Some("results4711"));
    assert!(results_json_url("https://example.org/results4711/").is_err());
}

#[test]
fn malformed_export_is_invalid_data() {
    assert!(parse_results_json("{not json").is_err());
    assert!(parse_results_json(r#"{"msc": "1"}"#).is_err());
}
