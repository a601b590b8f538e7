//! Tests for the statistics service layer.

use tempfile::NamedTempFile;

use cricsaga_stats::{MatchOutcome, ScorecardRepository, StatsService};

fn setup_service() -> (NamedTempFile, StatsService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ScorecardRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, StatsService::new(repo))
}

#[test]
fn test_save_scorecard_generates_match_id() {
    let (_db, service) = setup_service();
    service
        .register_player(401, None, Some("Tara".to_string()))
        .expect("Register failed");

    let payload = serde_json::json!({"full_text": "MATCH COMPLETE"});
    let saved = service
        .save_scorecard(401, Some("Evening Game".to_string()), None, &payload)
        .expect("Save failed");

    assert!(saved.match_id().starts_with('M'));
    assert_eq!(saved.match_name().as_deref(), Some("Evening Game"));

    let matches = service.get_matches(401, 10).expect("List failed");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_id(), saved.match_id());
}

#[test]
fn test_full_match_flow_updates_stats() {
    let (_db, service) = setup_service();
    service
        .register_player(402, Some("uma_b".to_string()), Some("Uma".to_string()))
        .expect("Register failed");

    let payload = serde_json::json!({"full_text": "MATCH COMPLETE"});
    let scorecard = service
        .save_scorecard(402, None, Some("classic".to_string()), &payload)
        .expect("Save failed");

    service
        .record_performance(scorecard.match_id().clone(), 402, 64, 2, 7, 1)
        .expect("Record failed");
    service
        .finalize_match(402, MatchOutcome::Won)
        .expect("Finalize failed");

    let stats = service
        .get_stats(402)
        .expect("Query failed")
        .expect("Stats missing");
    assert_eq!(*stats.total_runs(), 64);
    assert_eq!(*stats.total_wickets(), 2);
    assert_eq!(*stats.fifties(), 1);
    assert_eq!(*stats.total_matches(), 1);
    assert_eq!(*stats.total_wins(), 1);
    assert_eq!(*stats.best_score(), 64);

    let history = service.get_history(402, 5).expect("History failed");
    assert_eq!(history.len(), 1);
    assert_eq!(*history[0].0.runs_scored(), 64);
}

#[test]
fn test_delete_scorecard_via_service() {
    let (_db, service) = setup_service();
    service
        .register_player(403, None, Some("Vik".to_string()))
        .expect("Register failed");

    let payload = serde_json::json!({});
    let scorecard = service
        .save_scorecard(403, None, None, &payload)
        .expect("Save failed");

    assert!(
        service
            .delete_scorecard(scorecard.match_id(), 403)
            .expect("Delete failed")
    );
    assert!(service.get_matches(403, 10).expect("List failed").is_empty());
}

#[test]
fn test_stats_for_unregistered_player_is_none() {
    let (_db, service) = setup_service();
    let stats = service.get_stats(404).expect("Query failed");
    assert!(stats.is_none());
}
