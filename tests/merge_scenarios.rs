use chrono::{Duration, Utc};
use matchlink::{match_stats, LinkConfig, MatchMethod, MatchSession, RecordLinker};
use serde_json::{json, Value};

fn linker() -> RecordLinker {
    RecordLinker::new(LinkConfig::default()).expect("default config is valid")
}

fn fresh_session() -> MatchSession {
    MatchSession::new(Utc::now().date_naive())
}

fn inplay(home: &str, away: &str, event_id: &str) -> Value {
    json!({
        "marker": format!("a:{event_id}:{home}"),
        "raw_event_data": {
            "team1": home,
            "team2": away,
            "eventId": event_id,
        }
    })
}

fn prematch(home: &str, away: &str, fi: &str) -> Value {
    json!({
        "marker": format!("b:{fi}:{home}"),
        "FI": fi,
        "players": { "home": home, "away": away },
    })
}

#[test]
fn scenario_id_match() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[inplay("Roger Federer", "Rafael Nadal", "123")],
        &[prematch("R. Federer", "R. Nadal", "abc123")],
        &mut session,
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].method, MatchMethod::Id);
    assert!(merged[0].is_matched());
}

#[test]
fn scenario_fuzzy_fallback_increments_session() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[inplay("N. Djokovic", "R. Nadal", "no-digits")],
        &[prematch("Novak Djokovic", "Rafael Nadal", "also-none")],
        &mut session,
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].method, MatchMethod::Fuzzy);
    assert_eq!(session.fuzzy_fallback_count, 1);
}

#[test]
fn scenario_unmatched_extra_record() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[
            inplay("N. Djokovic", "R. Nadal", "ev-1"),
            inplay("Somebody Obscure", "Nobody Famous", "ev-2"),
        ],
        &[prematch("Novak Djokovic", "Rafael Nadal", "900001")],
        &mut session,
    );
    // One matched pair plus the extra record on its own.
    assert_eq!(merged.len(), 2);
    let stats = match_stats(&merged, &session);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.unmatched_a, 1);
    assert_eq!(stats.unmatched_b, 0);
    assert!(merged
        .iter()
        .any(|r| r.method == MatchMethod::UnmatchedA && r.home == "Somebody Obscure"));
}

#[test]
fn scenario_daily_reset_zeroes_before_new_increments() {
    let linker = linker();
    let mut session = fresh_session();

    linker.merge(
        &[inplay("N. Djokovic", "R. Nadal", "x")],
        &[prematch("Novak Djokovic", "Rafael Nadal", "y")],
        &mut session,
    );
    assert_eq!(session.fuzzy_fallback_count, 1);

    // Simulate the session having last been reset yesterday.
    session.last_reset_date = Utc::now().date_naive() - Duration::days(1);
    linker.merge(
        &[inplay("A. Zverev", "C. Alcaraz", "x")],
        &[prematch("Alexander Zverev", "Carlos Alcaraz", "y")],
        &mut session,
    );
    // Yesterday's count was dropped before today's fuzzy match was recorded.
    assert_eq!(session.fuzzy_fallback_count, 1);
    assert_eq!(session.last_reset_date, Utc::now().date_naive());
}

#[test]
fn cardinality_law() {
    let linker = linker();
    let mut session = fresh_session();
    let list_a = vec![
        inplay("N. Djokovic", "R. Nadal", "101"),
        inplay("R. Federer", "A. Murray", "102"),
        inplay("Unknown One", "Unknown Two", "103"),
    ];
    let list_b = vec![
        prematch("Novak Djokovic", "Rafael Nadal", "101"),
        prematch("Stranger A", "Stranger B", "888"),
    ];
    let merged = linker.merge(&list_a, &list_b, &mut session);
    let stats = match_stats(&merged, &session);

    assert_eq!(
        merged.len(),
        stats.matched + stats.unmatched_a + stats.unmatched_b
    );
    assert!(stats.matched <= list_a.len().min(list_b.len()));
    assert_eq!(
        merged.len(),
        list_a.len() + list_b.len() - stats.matched
    );
}

#[test]
fn conservation_law_no_loss_no_duplication() {
    let linker = linker();
    let mut session = fresh_session();
    let list_a = vec![
        inplay("N. Djokovic", "R. Nadal", "201"),
        inplay("R. Federer", "A. Murray", "202"),
    ];
    let list_b = vec![
        prematch("Novak Djokovic", "Rafael Nadal", "201"),
        prematch("Lonely Player", "Other Player", "777"),
        prematch("Another Lonely", "Pair Here", "778"),
    ];
    let merged = linker.merge(&list_a, &list_b, &mut session);

    let mut seen_a: Vec<String> = merged
        .iter()
        .filter_map(|r| r.provider_a.as_ref())
        .map(|p| p["marker"].as_str().unwrap().to_string())
        .collect();
    let mut seen_b: Vec<String> = merged
        .iter()
        .filter_map(|r| r.provider_b.as_ref())
        .map(|p| p["marker"].as_str().unwrap().to_string())
        .collect();
    seen_a.sort();
    seen_b.sort();

    let mut want_a: Vec<String> = list_a
        .iter()
        .map(|p| p["marker"].as_str().unwrap().to_string())
        .collect();
    let mut want_b: Vec<String> = list_b
        .iter()
        .map(|p| p["marker"].as_str().unwrap().to_string())
        .collect();
    want_a.sort();
    want_b.sort();

    assert_eq!(seen_a, want_a);
    assert_eq!(seen_b, want_b);
}

#[test]
fn precedence_law_id_beats_fuzzy() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[inplay("N. Djokovic", "R. Nadal", "42")],
        &[
            // Fuzzy-equivalent names, no shared ids.
            prematch("Novak Djokovic", "Rafael Nadal", "none"),
            // Dissimilar names, shared id.
            prematch("Qualifier One", "Qualifier Two", "42"),
        ],
        &mut session,
    );
    assert_eq!(merged[0].method, MatchMethod::Id);
    assert_eq!(session.fuzzy_fallback_count, 0);
}

#[test]
fn swapped_home_away_still_links() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[inplay("R. Nadal", "N. Djokovic", "no-id")],
        &[prematch("Novak Djokovic", "Rafael Nadal", "none")],
        &mut session,
    );
    assert_eq!(merged[0].method, MatchMethod::Fuzzy);
    assert_eq!(merged[0].home, "Novak Djokovic");
}

#[test]
fn unmatched_b_records_keep_list_order() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[],
        &[
            prematch("First Home", "First Away", "1"),
            prematch("Second Home", "Second Away", "2"),
        ],
        &mut session,
    );
    assert_eq!(merged.len(), 2);
    assert!(merged
        .iter()
        .all(|r| r.method == MatchMethod::UnmatchedB));
    assert_eq!(merged[0].home, "First Home");
    assert_eq!(merged[1].home, "Second Home");
}

#[test]
fn empty_inputs_produce_empty_output() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(&[], &[], &mut session);
    assert!(merged.is_empty());
    let stats = match_stats(&merged, &session);
    assert_eq!(stats.matched, 0);
    assert_eq!(stats.unmatched_a + stats.unmatched_b, 0);
}

#[test]
fn merged_records_serialize_flat() {
    let linker = linker();
    let mut session = fresh_session();
    let merged = linker.merge(
        &[inplay("Roger Federer", "Rafael Nadal", "55")],
        &[prematch("R. Federer", "R. Nadal", "55")],
        &mut session,
    );
    let value = serde_json::to_value(&merged).unwrap();
    assert_eq!(value[0]["method"], "id");
    assert!(value[0]["provider_a"].is_object());
    assert!(value[0]["provider_b"].is_object());
}
