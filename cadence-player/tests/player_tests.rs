//! Integration tests for player construction and playlist linkage
//!
//! Covers:
//! - Track validation at construction
//! - Initial playlist order, head/tail/cursor placement
//! - Append linkage under heavy concurrency
//! - Skip behavior through the public API

use std::time::Duration;

use cadence_player::playback::{Playlist, MIN_TRACK_DURATION};
use cadence_player::{Error, Player, Track, TrackError};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

fn track(name: &str, secs: u64) -> Track {
    Track::new(name, Duration::from_secs(secs)).unwrap()
}

/// Walk the chain both ways and check every link agrees
fn assert_valid_chain(playlist: &Playlist) -> Vec<String> {
    let head = playlist.head();
    let tail = playlist.tail();
    assert_eq!(head.is_none(), playlist.is_empty());
    assert_eq!(tail.is_none(), playlist.is_empty());

    if let (Some(head), Some(tail)) = (head, tail) {
        assert_eq!(playlist.prev_of(head), None, "head must not have prev");
        assert_eq!(playlist.next_of(tail), None, "tail must not have next");
    }

    let forward: Vec<String> = playlist.iter().map(|t| t.name().to_string()).collect();
    let mut backward: Vec<String> = playlist.iter_rev().map(|t| t.name().to_string()).collect();
    backward.reverse();

    assert_eq!(forward.len(), playlist.len());
    assert_eq!(forward, backward);
    forward
}

// ============================================================================
// Track validation
// ============================================================================

#[test]
fn test_track_validation() {
    assert_eq!(
        Track::new("", Duration::from_secs(5)).unwrap_err(),
        TrackError::EmptyName
    );
    assert!(matches!(
        Track::new("short", Duration::from_millis(500)),
        Err(TrackError::TooShort { .. })
    ));
    assert!(Track::new("exact", MIN_TRACK_DURATION).is_ok());
    assert!(Track::new("long", Duration::from_secs(3600)).is_ok());
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_empty_player() {
    let player = Player::new(Vec::new());
    let playlist = player.playlist().await;

    assert!(player.is_empty().await);
    assert_eq!(playlist.head(), None);
    assert_eq!(playlist.tail(), None);
    assert_eq!(playlist.cursor(), None);
    assert_eq!(player.current_track().await, None);
}

#[tokio::test]
async fn test_initial_tracks_in_order() {
    let tracks = vec![track("One", 30), track("Two", 11), track("Three", 3)];
    let player = Player::new(tracks.clone());
    let playlist = player.playlist().await;

    let head = playlist.head().unwrap();
    let tail = playlist.tail().unwrap();
    assert_eq!(playlist.track(head), Some(&tracks[0]));
    assert_eq!(playlist.track(tail), Some(&tracks[2]));
    assert_eq!(playlist.cursor(), Some(head));

    let second = playlist.next_of(head).unwrap();
    assert_eq!(playlist.track(second), Some(&tracks[1]));
    assert_eq!(playlist.prev_of(second), Some(head));
    assert_eq!(playlist.next_of(second), Some(tail));

    assert_eq!(assert_valid_chain(&playlist), vec!["One", "Two", "Three"]);
    assert_eq!(player.tracks().await, tracks);
}

#[test]
fn test_try_new_reports_failing_index() {
    let result = Player::try_new([
        ("fine", Duration::from_secs(10)),
        ("also fine", Duration::from_secs(2)),
        ("", Duration::from_secs(2)),
    ]);

    match result {
        Err(Error::InvalidInitialTrack { index, source }) => {
            assert_eq!(index, 2);
            assert_eq!(source, TrackError::EmptyName);
        }
        other => panic!("expected InvalidInitialTrack, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_try_new_error_message_names_index() {
    let err = Player::try_new([("tiny", Duration::from_millis(10))]).unwrap_err();
    assert!(err.to_string().contains("index 0"), "got: {}", err);
}

// ============================================================================
// AddSong
// ============================================================================

#[tokio::test]
async fn test_add_song_appends_at_tail() {
    let player = Player::new([track("some song", 1)]);

    player.add_song(track("another song", 1)).await;
    let playlist = player.playlist().await;
    let tail = playlist.tail().unwrap();
    assert_eq!(playlist.track(tail).unwrap().name(), "another song");
    assert_eq!(
        playlist.track(playlist.prev_of(tail).unwrap()).unwrap().name(),
        "some song"
    );
    assert_eq!(playlist.track(playlist.head().unwrap()).unwrap().name(), "some song");

    player.add_song(track("some another song", 1)).await;
    let playlist = player.playlist().await;
    let tail = playlist.tail().unwrap();
    assert_eq!(playlist.track(tail).unwrap().name(), "some another song");
    assert_eq!(
        playlist.track(playlist.prev_of(tail).unwrap()).unwrap().name(),
        "another song"
    );
    assert_eq!(playlist.track(playlist.head().unwrap()).unwrap().name(), "some song");
    assert_valid_chain(&playlist);
}

#[tokio::test]
async fn test_add_song_to_empty_sets_cursor() {
    let player = Player::default();

    player.add_song(track("first", 1)).await;

    let playlist = player.playlist().await;
    assert_eq!(playlist.head(), playlist.tail());
    assert_eq!(playlist.cursor(), playlist.head());
    assert_eq!(player.current_track().await.unwrap().name(), "first");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_add_song_loses_nothing() {
    const COUNT: usize = 100_000;

    let player = Player::default();
    let mut join_set = JoinSet::new();

    for i in 0..COUNT {
        let player = player.clone();
        join_set.spawn(async move {
            let song = Track::new(i.to_string(), Duration::from_secs(1)).unwrap();
            player.add_song(song).await;
        });
    }

    while let Some(result) = join_set.join_next().await {
        result.expect("Task panicked");
    }

    let playlist = player.playlist().await;
    assert_eq!(playlist.len(), COUNT);

    let names = assert_valid_chain(&playlist);
    assert_eq!(names.len(), COUNT);

    let mut seen: Vec<usize> = names.iter().map(|n| n.parse().unwrap()).collect();
    seen.sort_unstable();
    assert!(seen.iter().copied().eq(0..COUNT), "every track linked exactly once");

    // Count from the cursor as well
    let mut count = 1;
    let mut node = playlist.cursor().unwrap();
    while let Some(next) = playlist.next_of(node) {
        count += 1;
        node = next;
    }
    assert_eq!(count, COUNT);
}

// ============================================================================
// Skipping through the public API
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_skip_forward_and_back() {
    let player = Player::new([track("A", 30), track("B", 30), track("C", 30)]);
    let cancel = CancellationToken::new();

    player.next(&cancel).await.unwrap();
    assert_eq!(player.cursor_position().await, Some(1));
    player.next(&cancel).await.unwrap();
    player.next(&cancel).await.unwrap();
    assert_eq!(player.cursor_position().await, Some(2), "next clamps at the last track");

    player.prev(&cancel).await.unwrap();
    player.prev(&cancel).await.unwrap();
    player.prev(&cancel).await.unwrap();
    assert_eq!(player.cursor_position().await, Some(0), "prev clamps at the first track");
    assert!(player.is_playing().await);

    cancel.cancel();
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert!(!player.is_playing().await);
    assert_eq!(player.elapsed().await, Duration::ZERO);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clones_share_state() {
    let player = Player::new([track("A", 30)]);
    let other = player.clone();
    let cancel = CancellationToken::new();

    other.play(&cancel).await.unwrap();
    assert!(player.is_playing().await);

    player.add_song(track("B", 30)).await;
    assert_eq!(other.len().await, 2);

    cancel.cancel();
}
