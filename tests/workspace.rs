//! Integration tests for roster management, game records, scores, timer and CSV import.

use chrono::{Duration, TimeZone, Utc};
use score_tracker_web::{
    import_roster_csv, read_roster_csv, GameStatus, PlayerId, ScoreError, Team, Workspace,
};

fn workspace_with_players(n: usize) -> (Workspace, Vec<PlayerId>) {
    let mut ws = Workspace::new();
    let ids = (0..n)
        .map(|i| ws.add_player(format!("P{i}")).unwrap().id)
        .collect();
    (ws, ids)
}

#[test]
fn add_player_trims_and_rejects_duplicates() {
    let mut ws = Workspace::new();
    assert_eq!(ws.add_player("  Alice ").unwrap().name, "Alice");
    assert_eq!(ws.add_player("alice"), Err(ScoreError::DuplicatePlayerName));
    assert_eq!(ws.add_player("   "), Err(ScoreError::EmptyName));
    assert_eq!(ws.players.len(), 1);
}

#[test]
fn duplicate_names_compare_beyond_ascii() {
    let mut ws = Workspace::new();
    ws.add_player("Émile").unwrap();
    assert_eq!(ws.add_player("émile"), Err(ScoreError::DuplicatePlayerName));
    assert_eq!(ws.players.len(), 1);
}

#[test]
fn rename_player_keeps_own_name_allowed() {
    let (mut ws, ids) = workspace_with_players(2);
    ws.rename_player(ids[0], "p0").unwrap();
    assert_eq!(ws.player(ids[0]).unwrap().name, "p0");
    assert_eq!(ws.rename_player(ids[0], "P1"), Err(ScoreError::DuplicatePlayerName));
}

#[test]
fn remove_player_blocked_while_in_game() {
    let (mut ws, ids) = workspace_with_players(5);
    let game_id = ws
        .create_game_from_ids([ids[0], ids[1]], [ids[2], ids[3]])
        .unwrap()
        .id;
    assert_eq!(ws.remove_player(ids[0]), Err(ScoreError::PlayerInGame(ids[0])));
    ws.remove_player(ids[4]).unwrap();
    ws.delete_game(game_id).unwrap();
    ws.remove_player(ids[0]).unwrap();
    assert_eq!(ws.players.len(), 3);
}

#[test]
fn create_game_validates_players() {
    let (mut ws, ids) = workspace_with_players(4);
    assert_eq!(
        ws.create_game_from_ids([ids[0], ids[0]], [ids[2], ids[3]]).map(|_| ()),
        Err(ScoreError::InvalidTeams)
    );
    let stranger = uuid::Uuid::new_v4();
    assert_eq!(
        ws.create_game_from_ids([ids[0], ids[1]], [ids[2], stranger]).map(|_| ()),
        Err(ScoreError::PlayerNotFound(stranger))
    );
    assert!(ws.games.is_empty());
}

#[test]
fn scores_and_switch_sides_reminder() {
    let (mut ws, ids) = workspace_with_players(4);
    ws.set_switch_sides_every(3);
    let game_id = ws
        .create_game_from_ids([ids[0], ids[1]], [ids[2], ids[3]])
        .unwrap()
        .id;
    let game = ws.game_mut(game_id).unwrap();

    game.add_point(Team::One).unwrap();
    game.add_point(Team::Two).unwrap();
    assert!(!game.switch_sides_due);
    game.add_point(Team::One).unwrap();
    assert_eq!((game.score_1, game.score_2), (2, 1));
    assert!(game.switch_sides_due);

    game.acknowledge_switch();
    assert!(!game.switch_sides_due);

    game.remove_point(Team::Two).unwrap();
    game.remove_point(Team::Two).unwrap();
    assert_eq!(game.score_2, 0);

    game.set_score(4, 2).unwrap();
    assert!(game.switch_sides_due);
}

#[test]
fn scores_saturate_at_the_top_of_the_range() {
    let (mut ws, ids) = workspace_with_players(4);
    ws.set_switch_sides_every(2);
    let game_id = ws
        .create_game_from_ids([ids[0], ids[1]], [ids[2], ids[3]])
        .unwrap()
        .id;
    let game = ws.game_mut(game_id).unwrap();

    // Total of 2^32 does not fit in u32 and is a multiple of 2.
    game.set_score(u32::MAX, 1).unwrap();
    assert!(game.switch_sides_due);

    game.set_score(u32::MAX, 0).unwrap();
    assert!(!game.switch_sides_due);
    game.add_point(Team::One).unwrap();
    assert_eq!(game.score_1, u32::MAX);

    game.set_score(0, u32::MAX).unwrap();
    game.add_point(Team::Two).unwrap();
    assert_eq!(game.score_2, u32::MAX);
}

#[test]
fn finished_game_is_frozen() {
    let (mut ws, ids) = workspace_with_players(4);
    let game_id = ws
        .create_game_from_ids([ids[0], ids[1]], [ids[2], ids[3]])
        .unwrap()
        .id;
    let game = ws.game_mut(game_id).unwrap();
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    game.start_timer(t0).unwrap();
    game.finish(t0 + Duration::seconds(90)).unwrap();

    assert_eq!(game.status, GameStatus::Finished);
    assert!(!game.timer.is_running());
    assert_eq!(game.timer.elapsed(t0 + Duration::hours(1)), Duration::seconds(90));
    assert_eq!(game.add_point(Team::One), Err(ScoreError::InvalidState));
    assert_eq!(game.start_timer(t0), Err(ScoreError::InvalidState));
    assert_eq!(game.finish(t0), Err(ScoreError::InvalidState));
}

#[test]
fn timer_accumulates_across_pauses() {
    let (mut ws, ids) = workspace_with_players(4);
    let game_id = ws
        .create_game_from_ids([ids[0], ids[1]], [ids[2], ids[3]])
        .unwrap()
        .id;
    let game = ws.game_mut(game_id).unwrap();
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

    game.start_timer(t0).unwrap();
    game.start_timer(t0 + Duration::seconds(5)).unwrap();
    game.pause_timer(t0 + Duration::seconds(10)).unwrap();
    game.pause_timer(t0 + Duration::seconds(20)).unwrap();
    assert_eq!(game.timer.elapsed(t0 + Duration::seconds(30)), Duration::seconds(10));

    game.start_timer(t0 + Duration::seconds(60)).unwrap();
    assert_eq!(game.timer.elapsed(t0 + Duration::seconds(65)), Duration::seconds(15));

    game.reset_timer().unwrap();
    assert_eq!(game.timer.elapsed(t0 + Duration::seconds(70)), Duration::zero());
    assert!(!game.timer.is_running());
}

#[test]
fn delete_unknown_game() {
    let mut ws = Workspace::new();
    let id = uuid::Uuid::new_v4();
    assert_eq!(ws.delete_game(id), Err(ScoreError::GameNotFound(id)));
}

#[test]
fn csv_import_reads_name_column() {
    let data = "team,name\nred,Alice\nblue,  Bob \n,\ngreen,Carol\n";
    let names = read_roster_csv(data.as_bytes()).unwrap();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);

    let mut ws = Workspace::new();
    let added = import_roster_csv(&mut ws, data.as_bytes()).unwrap();
    assert_eq!(added.len(), 3);
    assert_eq!(ws.players.len(), 3);
}

#[test]
fn csv_import_requires_name_header() {
    assert!(matches!(
        read_roster_csv("player\nAlice\n".as_bytes()),
        Err(ScoreError::Import(_))
    ));
}

#[test]
fn csv_import_adds_nothing_when_a_name_is_rejected() {
    let mut ws = Workspace::new();
    let result = import_roster_csv(&mut ws, "name\nAlice\nALICE\nBob\n".as_bytes());
    assert_eq!(result, Err(ScoreError::DuplicatePlayerName));
    assert!(ws.players.is_empty());

    ws.add_player("Bob").unwrap();
    let result = import_roster_csv(&mut ws, "name\nAlice\nbob\n".as_bytes());
    assert_eq!(result, Err(ScoreError::DuplicatePlayerName));
    assert_eq!(ws.players.len(), 1);
}
