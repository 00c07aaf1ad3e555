use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::petri_net::Phase;
use crate::traffic_queues::{TrafficQueues, TrafficRecord};

fn state(queues: [u32; 4], phase: Phase) -> WorldState {
    WorldState { queues, phase }
}

fn greedy() -> QAgent {
    QAgent::new(0.1, 0.9, 0.0)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_equal_states_share_a_key() {
    let a = state([1, 2, 3, 4], Phase::NorthSouth);
    let b = state([1, 2, 3, 4], Phase::NorthSouth);
    assert_eq!(state_key(&a), state_key(&b));
    assert_ne!(
        state_key(&a),
        state_key(&state([1, 2, 3, 4], Phase::EastWest))
    );
    assert_ne!(
        state_key(&a),
        state_key(&state([4, 3, 2, 1], Phase::NorthSouth))
    );
}

#[test]
fn test_unseen_state_values_are_zero() {
    let agent = QAgent::default();
    let s = state([0, 0, 0, 0], Phase::NorthSouth);
    for action in AgentAction::ALL {
        assert_eq!(agent.value(&s, action), 0.0);
    }
    assert!(agent.table().is_empty());
}

#[test]
fn test_update_applies_one_step_rule() {
    let mut agent = greedy();
    let s = state([5, 5, 0, 0], Phase::NorthSouth);
    let s2 = state([4, 4, 1, 0], Phase::NorthSouth);

    agent.update(&s, AgentAction::SwitchPhase, -2.0, &s2);
    assert_close(agent.value(&s, AgentAction::SwitchPhase), -0.2);
    assert_eq!(agent.value(&s, AgentAction::ExtendCurrent), 0.0);

    // Give the successor a positive value and bootstrap from it.
    let s3 = state([0, 0, 0, 0], Phase::EastWest);
    agent.update(&s2, AgentAction::ExtendCurrent, 1.0, &s3);
    assert_close(agent.value(&s2, AgentAction::ExtendCurrent), 0.1);

    agent.update(&s, AgentAction::ExtendCurrent, 0.0, &s2);
    assert_close(agent.value(&s, AgentAction::ExtendCurrent), 0.1 * 0.9 * 0.1);
}

#[test]
fn test_table_grows_on_first_write_only() {
    let mut agent = greedy();
    let s = state([1, 0, 0, 0], Phase::NorthSouth);
    let s2 = state([2, 0, 0, 0], Phase::NorthSouth);

    agent.update(&s, AgentAction::ExtendCurrent, -1.0, &s2);
    assert_eq!(agent.table().len(), 1);
    agent.update(&s, AgentAction::SwitchPhase, -1.0, &s2);
    assert_eq!(agent.table().len(), 1);
    agent.update(&s2, AgentAction::SwitchPhase, -1.0, &s);
    assert_eq!(agent.table().len(), 2);
}

#[test]
fn test_greedy_choice_follows_values() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut agent = greedy();
    let s = state([3, 3, 9, 9], Phase::NorthSouth);
    let next = state([2, 2, 9, 9], Phase::NorthSouth);

    agent.update(&s, AgentAction::ExtendCurrent, -5.0, &next);
    assert_eq!(
        agent.choose_action(&s, &AgentAction::ALL, &mut rng),
        AgentAction::SwitchPhase
    );

    agent.update(&s, AgentAction::SwitchPhase, -50.0, &next);
    assert_eq!(
        agent.choose_action(&s, &AgentAction::ALL, &mut rng),
        AgentAction::ExtendCurrent
    );
}

#[test]
fn test_greedy_choice_is_repeatable() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut agent = greedy();
    let s = state([6, 1, 0, 2], Phase::EastWest);
    agent.update(&s, AgentAction::SwitchPhase, -1.0, &s);
    let first = agent.choose_action(&s, &AgentAction::ALL, &mut rng);
    for _ in 0..50 {
        assert_eq!(agent.choose_action(&s, &AgentAction::ALL, &mut rng), first);
    }
}

#[test]
fn test_ties_go_to_first_available() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let agent = greedy();
    let s = state([0, 0, 0, 0], Phase::EastWest);
    assert_eq!(
        agent.choose_action(&s, &AgentAction::ALL, &mut rng),
        AgentAction::ExtendCurrent
    );
    let reversed = [AgentAction::SwitchPhase, AgentAction::ExtendCurrent];
    assert_eq!(
        agent.choose_action(&s, &reversed, &mut rng),
        AgentAction::SwitchPhase
    );
}

#[test]
fn test_choice_stays_within_available() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let explorer = QAgent::new(0.1, 0.9, 1.0);
    let s = state([1, 1, 1, 1], Phase::NorthSouth);
    for _ in 0..100 {
        assert_eq!(
            explorer.choose_action(&s, &[AgentAction::SwitchPhase], &mut rng),
            AgentAction::SwitchPhase
        );
    }
}

#[test]
fn test_full_exploration_tries_both_actions() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let explorer = QAgent::new(0.1, 0.9, 1.0);
    let s = state([1, 1, 1, 1], Phase::NorthSouth);
    let picks: Vec<AgentAction> = (0..200)
        .map(|_| explorer.choose_action(&s, &AgentAction::ALL, &mut rng))
        .collect();
    assert!(picks.contains(&AgentAction::ExtendCurrent));
    assert!(picks.contains(&AgentAction::SwitchPhase));
}

#[test]
fn test_non_finite_exploration_rate_falls_back() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut agent = QAgent::new(0.1, 0.9, f64::NAN);
    let s = state([2, 2, 2, 2], Phase::NorthSouth);
    for _ in 0..100 {
        let action = agent.choose_action(&s, &AgentAction::ALL, &mut rng);
        assert!(AgentAction::ALL.contains(&action));
    }
    agent.exploration_rate = f64::INFINITY;
    let action = agent.choose_action(&s, &AgentAction::ALL, &mut rng);
    assert!(AgentAction::ALL.contains(&action));
}

#[test]
fn test_empty_available_falls_back_to_extend() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let agent = QAgent::default();
    let s = state([0, 0, 0, 0], Phase::NorthSouth);
    assert_eq!(
        agent.choose_action(&s, &[], &mut rng),
        AgentAction::ExtendCurrent
    );
}

#[test]
fn test_reward_is_negative_mean_wait() {
    let record = |vehicles, wait_time| TrafficRecord {
        vehicles,
        wait_time,
        last_update: 0.0,
    };
    let light = TrafficQueues::from_records([record(2, 2.0); 4]);
    let heavy = TrafficQueues::from_records([record(2, 10.0); 4]);

    assert_eq!(reward(&TrafficQueues::default()), 0.0);
    assert_eq!(reward(&light), -1.0);
    assert_eq!(reward(&heavy), -5.0);
    assert!(reward(&heavy) < reward(&light));
}

#[test]
fn test_observed_state_reads_queue_lengths() {
    let queues = TrafficQueues::from_records([
        TrafficRecord {
            vehicles: 7,
            ..Default::default()
        },
        TrafficRecord::default(),
        TrafficRecord {
            vehicles: 2,
            ..Default::default()
        },
        TrafficRecord::default(),
    ]);
    let observed = WorldState::observe(&queues, Phase::EastWest);
    assert_eq!(observed.queues, [7, 0, 2, 0]);
    assert_eq!(observed.phase, Phase::EastWest);
}

#[test]
fn test_action_names() {
    assert_eq!(AgentAction::ExtendCurrent.name(), "extend_current");
    assert_eq!(AgentAction::SwitchPhase.name(), "switch_phase");
}
