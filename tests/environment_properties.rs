//! Whole-hand properties of the environment under random play.

use blackjack_q::blackjack::{
    Action, Environment, Shoe, StateIndex,
    env::{DealerPhase, LOSS_REWARD, PUSH_REWARD, WIN_REWARD, settle},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn sorted(cards: &[blackjack_q::Card]) -> Vec<blackjack_q::Card> {
    let mut cards = cards.to_vec();
    cards.sort();
    cards
}

fn play_random_hand(env: &mut Environment, rng: &mut StdRng) -> i32 {
    while !env.turn_finished() {
        let action = if rng.random_bool(0.5) {
            Action::Hit
        } else {
            Action::Stand
        };
        env.apply_action(action).unwrap();
    }
    env.terminal_reward().unwrap()
}

#[test]
fn shoe_multiset_survives_many_hands() {
    for decks in [1, 2, 6] {
        let base = Shoe::base_multiset(decks);
        let mut env = Environment::with_seed(decks, decks as u64).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for hand in 0..2_000 {
            if hand % 2 == 0 {
                let start = StateIndex::from_raw(rng.random_range(1..361)).unwrap();
                env.initialize_forced(start).unwrap();
            }
            env.shuffle_and_deal().unwrap();
            play_random_hand(&mut env, &mut rng);
            assert_eq!(sorted(env.shoe().cards()), base);
        }
    }
}

#[test]
fn finished_hands_obey_dealer_and_reward_rules() {
    let mut env = Environment::with_seed(6, 1).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let mut seen = [false; 3];

    for _ in 0..5_000 {
        env.shuffle_and_deal().unwrap();
        let reward = play_random_hand(&mut env, &mut rng);

        let player = env.player_hand().value();
        let dealer = env.dealer_hand().value();
        assert_eq!(DealerPhase::of(dealer), DealerPhase::Done);
        assert!(dealer.total >= 17);
        assert!(!(dealer.total == 17 && dealer.soft));
        assert_eq!(reward, settle(player, dealer));

        if player.is_bust() {
            assert_eq!(reward, LOSS_REWARD);
            assert!(env.current_state().is_none());
        }
        seen[match reward {
            WIN_REWARD => 0,
            PUSH_REWARD => 1,
            _ => 2,
        }] = true;
    }
    assert_eq!(seen, [true; 3]);
}

#[test]
fn one_deck_shoe_handles_long_hit_streaks() {
    let mut env = Environment::with_seed(1, 8).unwrap();
    for raw in 1..361 {
        env.initialize_forced(StateIndex::from_raw(raw).unwrap())
            .unwrap();
        env.shuffle_and_deal().unwrap();
        while !env.turn_finished() {
            env.apply_action(Action::Hit).unwrap();
        }
        assert!(env.player_hand().is_bust());
        assert_eq!(env.terminal_reward().unwrap(), LOSS_REWARD);
    }
}
