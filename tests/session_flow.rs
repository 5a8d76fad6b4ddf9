use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use cardr::queue::{DeckStore, QueueManager};

fn write_deck(dir: &Path, all: &str, learned: &str, unlearned: &str) {
    fs::write(dir.join("questions.txt"), all).unwrap();
    fs::write(dir.join("learned_questions.txt"), learned).unwrap();
    fs::write(dir.join("unlearned_questions.txt"), unlearned).unwrap();
}

fn read_set(path: &Path) -> HashSet<String> {
    fs::read_to_string(path)
        .unwrap()
        .split_inclusive('\n')
        .map(str::to_string)
        .collect()
}

fn ordered_manager(dir: &Path) -> QueueManager {
    let mut manager =
        QueueManager::with_rng(DeckStore::new(dir), SmallRng::seed_from_u64(3));
    manager.set_shuffle(false);
    manager
}

/// Read the current queue order by cycling every card once. `skip` is
/// length-preserving, so after `len` skips the queue is back to the same
/// cards (with streaks reset).
fn cycle_order(manager: &mut QueueManager) -> Vec<String> {
    let len = manager.unlearned_count();
    let mut order = Vec::with_capacity(len);
    for _ in 0..len {
        order.push(manager.current_card().unwrap().to_string());
        manager.skip_current().unwrap();
    }
    order
}

#[test]
fn accepting_through_a_new_session_drains_the_deck() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "", "", "A\nB\nC\n");
    let mut manager = ordered_manager(dir.path());
    manager.learn_new().unwrap();

    let mut steps = 0;
    while manager.current_card().is_some() {
        manager.accept_current().unwrap();
        steps += 1;
        assert!(steps < 100, "session did not drain");
    }

    assert_eq!(manager.learned_count(), 3);
    assert_eq!(manager.unlearned_count(), 0);
    assert_eq!(manager.in_process_count(), 0);

    let learned = read_set(&dir.path().join("learned_questions.txt"));
    assert_eq!(
        learned,
        HashSet::from(["A\n".to_string(), "B\n".to_string(), "C\n".to_string()])
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("unlearned_questions.txt")).unwrap(),
        ""
    );
}

#[test]
fn first_accept_resurfaces_the_card_at_the_back_of_a_short_queue() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "", "", "A\nB\nC\n");
    let mut manager = ordered_manager(dir.path());
    manager.learn_new().unwrap();

    manager.accept_current().unwrap();
    assert_eq!(manager.in_process_count(), 1);
    assert_eq!(manager.current_card(), Some("B\n"));

    // The target depth is 4, the queue behind the card holds 2, so the
    // card lands at the very back.
    manager.skip_current().unwrap();
    manager.skip_current().unwrap();
    assert_eq!(manager.current_card(), Some("A\n"));
}

#[test]
fn all_mode_sessions_keep_learned_and_unlearned_a_partition() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "A\nB\n", "A\n", "B\n");
    let mut manager = ordered_manager(dir.path());
    manager.repeat_all().unwrap();

    // Fail the front card, then answer correctly until something promotes.
    manager.fail_current().unwrap();
    let mut steps = 0;
    while manager.learned_count() == 0 {
        manager.accept_current().unwrap();
        steps += 1;
        assert!(steps < 100, "no promotion happened");
    }

    let learned = read_set(&dir.path().join("learned_questions.txt"));
    let unlearned = read_set(&dir.path().join("unlearned_questions.txt"));
    let union: HashSet<String> = learned.union(&unlearned).cloned().collect();
    assert_eq!(
        union,
        HashSet::from(["A\n".to_string(), "B\n".to_string()])
    );
    assert!(learned.is_disjoint(&unlearned));
}

#[test]
fn restarting_a_session_discards_memory_but_keeps_writes() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "", "X\n", "A\nB\n");
    let mut manager = ordered_manager(dir.path());
    manager.learn_new().unwrap();

    // Promote A, then restart mid-session.
    for _ in 0..4 {
        while manager.current_card() != Some("A\n") {
            manager.skip_current().unwrap();
        }
        manager.accept_current().unwrap();
    }
    manager.accept_current().unwrap();
    assert_eq!(manager.learned_count(), 1);
    assert_eq!(manager.in_process_count(), 1);

    manager.learn_new().unwrap();
    assert_eq!(manager.learned_count(), 0);
    assert_eq!(manager.in_process_count(), 0);
    // The restarted queue only holds what the unlearned file still lists.
    assert_eq!(manager.unlearned_count(), 1);
    assert_eq!(manager.current_card(), Some("B\n"));
    assert_eq!(
        fs::read_to_string(dir.path().join("learned_questions.txt")).unwrap(),
        "X\nA\n"
    );
}

#[test]
fn shuffled_load_is_reproducible_for_the_same_seed() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "A\nB\nC\nD\nE\nF\n", "", "");

    let mut first =
        QueueManager::with_rng(DeckStore::new(dir.path()), SmallRng::seed_from_u64(99));
    first.repeat_all().unwrap();
    let mut second =
        QueueManager::with_rng(DeckStore::new(dir.path()), SmallRng::seed_from_u64(99));
    second.repeat_all().unwrap();

    assert_eq!(cycle_order(&mut first), cycle_order(&mut second));
}

#[test]
fn old_mode_promotion_leaves_files_untouched() {
    let dir = TempDir::new().unwrap();
    write_deck(dir.path(), "A\n", "A\n", "");
    let mut manager = ordered_manager(dir.path());
    manager.repeat_old().unwrap();

    for _ in 0..4 {
        manager.accept_current().unwrap();
    }
    assert_eq!(manager.learned_count(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("learned_questions.txt")).unwrap(),
        "A\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("unlearned_questions.txt")).unwrap(),
        ""
    );
}
