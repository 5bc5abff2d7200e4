//! Card effect behavior, resolved through the generic machinery.

use std::rc::Rc;

use provincial::sets;
use provincial::{
    CardHandle, Decider, Destination, Game, GameBuilder, GreedyDecider, HookPoint, NullDecider,
    PlayerId, ScriptedDecider,
};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn game_with(p0: Rc<dyn Decider>, p1: Rc<dyn Decider>) -> Game {
    GameBuilder::new()
        .player("Alice", p0)
        .player("Bob", p1)
        .expansion(sets::base_set())
        .expansion(sets::seaside_set())
        .kingdom([
            "Cellar", "Chapel", "Moat", "Village", "Workshop", "Militia", "Smithy", "Bridge",
            "Merchant", "Witch", "Throne Room", "Harbinger", "Moneylender", "Council Room",
            "Caravan", "Wharf", "Fishing Village",
        ])
        .seed(7)
        .build()
        .unwrap()
}

fn null_game() -> Game {
    game_with(Rc::new(NullDecider), Rc::new(NullDecider))
}

fn put_in_hand(game: &mut Game, player: PlayerId, name: &str) -> CardHandle {
    let card = game.supply().sample(name).unwrap();
    game.gain_card(player, &card, &Destination::Hand).unwrap();
    card
}

#[test]
fn test_smithy_draws_three() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Smithy");
    assert_eq!(game.player(P0).hand().len(), 6);

    game.play_card(P0, "Smithy", true).unwrap();

    let p = game.player(P0);
    assert_eq!(p.hand().len(), 8); // 6 - smithy + 3 drawn
    assert_eq!(p.deck().len(), 2);
    assert_eq!(p.playmat().count_name("Smithy"), 1);
    assert_eq!(p.state.actions, 0);
    assert_eq!(p.actions_played(), 1);
}

#[test]
fn test_village_enables_chains() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Village");
    put_in_hand(&mut game, P0, "Smithy");

    game.play_card(P0, "Village", true).unwrap();
    assert_eq!(game.player(P0).state.actions, 2);

    game.play_card(P0, "Smithy", true).unwrap();
    assert_eq!(game.player(P0).state.actions, 1);
    assert_eq!(game.player(P0).actions_played(), 2);
}

#[test]
fn test_treasures_accumulate_coins() {
    let mut game = null_game();
    let silver = put_in_hand(&mut game, P0, "Silver");
    let gold = put_in_hand(&mut game, P0, "Gold");

    game.exact_play(P0, &silver, true).unwrap();
    game.exact_play(P0, &gold, true).unwrap();

    let p = game.player(P0);
    assert_eq!(p.state.coins, 5);
    assert_eq!(p.playmat().len(), 2);
    // Treasures do not consume actions
    assert_eq!(p.state.actions, 1);
}

#[test]
fn test_witch_curses_opponents() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Witch");
    let before = game.player(P0).hand().len();

    game.play_card(P0, "Witch", true).unwrap();

    assert_eq!(game.player(P0).hand().len(), before - 1 + 2);
    assert_eq!(game.player(P1).discard_pile().count_name("Curse"), 1);
    assert_eq!(game.player(P1).cards_owned(), 11);
    assert_eq!(game.player(P1).score(), 3 - 1); // 3 Estates - 1 Curse
}

#[test]
fn test_witch_skips_sold_out_curse_pile() {
    let mut game = null_game();
    let curse = game.supply().sample("Curse").unwrap();
    while game.supply().pile_len("Curse") != Some(0) {
        game.gain_card(P0, &curse, &Destination::Discard).unwrap();
    }

    put_in_hand(&mut game, P0, "Witch");
    game.play_card(P0, "Witch", true).unwrap();

    assert_eq!(game.player(P1).discard_pile().count_name("Curse"), 0);
}

#[test]
fn test_moat_blocks_the_attack() {
    // Bob will reveal his Moat
    let bob = ScriptedDecider::new().will_answer(true);
    let mut game = game_with(Rc::new(NullDecider), Rc::new(bob));

    put_in_hand(&mut game, P1, "Moat");
    put_in_hand(&mut game, P0, "Witch");

    game.play_card(P0, "Witch", true).unwrap();

    assert_eq!(game.player(P1).discard_pile().count_name("Curse"), 0);
    assert_eq!(game.player(P1).cards_owned(), 11); // just the Moat
}

#[test]
fn test_militia_forces_discard_to_three() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Militia");

    game.play_card(P0, "Militia", true).unwrap();

    assert_eq!(game.player(P0).state.coins, 2);
    assert_eq!(game.player(P1).hand().len(), 3);
    assert_eq!(game.player(P1).discard_pile().len(), 2);
}

#[test]
fn test_cellar_sifts() {
    let alice = ScriptedDecider::new().will_discard(&["Copper", "Copper"]);
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Cellar");

    game.play_card(P0, "Cellar", true).unwrap();

    let p = game.player(P0);
    // Discard two, draw two: hand size unchanged after playing Cellar
    assert_eq!(p.hand().len(), 5);
    assert_eq!(p.state.actions, 1); // 1 - 1 + 1
    assert_eq!(p.discard_pile().count_name("Copper"), 2);
    assert_eq!(p.deck().len(), 3);
}

#[test]
fn test_chapel_trashes_up_to_four() {
    let alice = ScriptedDecider::new().will_trash(&["Copper", "Copper"]);
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Chapel");

    game.play_card(P0, "Chapel", true).unwrap();

    assert_eq!(game.trash().len(), 2);
    assert_eq!(game.player(P0).cards_owned(), 9);
    assert_eq!(game.player(P0).total_cards(), 9);
}

#[test]
fn test_moneylender_converts_copper() {
    let alice = ScriptedDecider::new().will_answer(true);
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Moneylender");
    let coppers_before = game.player(P0).hand().count_name("Copper");

    game.play_card(P0, "Moneylender", true).unwrap();

    assert_eq!(game.player(P0).state.coins, 3);
    assert_eq!(game.trash().count_name("Copper"), 1);
    assert_eq!(
        game.player(P0).hand().count_name("Copper"),
        coppers_before - 1
    );
}

#[test]
fn test_moneylender_declined() {
    let alice = ScriptedDecider::new().will_answer(false);
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Moneylender");

    game.play_card(P0, "Moneylender", true).unwrap();

    assert_eq!(game.player(P0).state.coins, 0);
    assert!(game.trash().is_empty());
}

#[test]
fn test_workshop_gains() {
    let alice = ScriptedDecider::new().will_gain("Silver");
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Workshop");

    game.play_card(P0, "Workshop", true).unwrap();

    assert_eq!(game.player(P0).discard_pile().count_name("Silver"), 1);
    assert_eq!(game.player(P0).cards_owned(), 12);
}

#[test]
fn test_bridge_reduces_costs_for_the_turn() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Bridge");

    game.play_card(P0, "Bridge", true).unwrap();

    let p = game.player(P0);
    assert_eq!(p.state.coins, 1);
    assert_eq!(p.state.buys, 2);
    assert_eq!(p.state.cost_reduction, 1);

    let silver = game.supply().sample("Silver").unwrap();
    assert_eq!(game.card_cost(&silver).coins, 2);

    // Reduction disappears with the next turn
    game.start_turn(P0).unwrap();
    assert_eq!(game.card_cost(&silver).coins, 3);
}

#[test]
fn test_harbinger_topdecks_from_discard() {
    let alice = ScriptedDecider::new().will_topdeck(&["Silver"]);
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));

    let silver = game.supply().sample("Silver").unwrap();
    game.gain_card(P0, &silver, &Destination::Discard).unwrap();
    put_in_hand(&mut game, P0, "Harbinger");

    game.play_card(P0, "Harbinger", true).unwrap();

    assert_eq!(game.player(P0).deck().top().unwrap().name(), "Silver");
    assert!(game.player(P0).discard_pile().is_empty());
}

#[test]
fn test_throne_room_doubles_an_action() {
    let alice = ScriptedDecider::new().will_multi_play("Smithy");
    let mut game = game_with(Rc::new(alice), Rc::new(NullDecider));
    put_in_hand(&mut game, P0, "Throne Room");
    put_in_hand(&mut game, P0, "Smithy");

    game.play_card(P0, "Throne Room", true).unwrap();

    let p = game.player(P0);
    // 7 in hand - throne - smithy + 5 drawn (deck ran dry at five)
    assert_eq!(p.hand().len(), 10);
    assert!(p.deck().is_empty());
    // Throne Room once, Smithy twice
    assert_eq!(p.actions_played(), 3);
    assert_eq!(p.playmat().count_name("Smithy"), 1);
}

#[test]
fn test_council_room_benefits_everyone() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Council Room");
    let bob_before = game.player(P1).hand().len();

    game.play_card(P0, "Council Room", true).unwrap();

    assert_eq!(game.player(P0).state.buys, 2);
    assert_eq!(game.player(P1).hand().len(), bob_before + 1);
}

#[test]
fn test_merchant_rewards_first_silver_only() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Merchant");
    let silver = put_in_hand(&mut game, P0, "Silver");
    put_in_hand(&mut game, P0, "Silver");

    game.play_card(P0, "Merchant", true).unwrap();
    assert_eq!(game.player(P0).state.coins, 0);

    game.exact_play(P0, &silver, true).unwrap();
    assert_eq!(game.player(P0).state.coins, 3); // 2 + 1 bonus

    game.exact_play(P0, &silver, true).unwrap();
    assert_eq!(game.player(P0).state.coins, 5); // no second bonus
}

#[test]
fn test_merchant_bonus_expires_with_the_turn() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Merchant");
    game.play_card(P0, "Merchant", true).unwrap();
    assert!(game.hooks().contains(HookPoint::OnPlay, "Merchant"));

    // End the turn without ever playing a Silver
    game.end_turn(P0).unwrap();

    assert!(!game.hooks().contains(HookPoint::OnPlay, "Merchant"));
    assert!(!game.hooks().contains(HookPoint::TurnEnd, "Merchant expiry"));
}

#[test]
fn test_caravan_draws_next_turn_then_retires() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Caravan");

    game.play_card(P0, "Caravan", true).unwrap();
    assert!(game.hooks().contains(HookPoint::TurnStart, "Caravan"));

    game.cleanup_phase(P0).unwrap();
    // The Caravan stayed out through cleanup
    assert_eq!(game.player(P0).playmat().count_name("Caravan"), 1);
    assert_eq!(game.player(P0).hand().len(), 5);

    game.start_turn(P0).unwrap();
    // Normal hand of five plus the duration draw
    assert_eq!(game.player(P0).hand().len(), 6);
    assert!(!game.hooks().contains(HookPoint::TurnStart, "Caravan"));

    // A second turn start does not re-fire the spent effect
    let hand_now = game.player(P0).hand().len();
    game.start_turn(P0).unwrap();
    assert_eq!(game.player(P0).hand().len(), hand_now);

    // The released Caravan is swept by the next cleanup
    game.cleanup_phase(P0).unwrap();
    assert_eq!(game.player(P0).playmat().count_name("Caravan"), 0);
}

#[test]
fn test_wharf_carries_cards_and_buys() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Wharf");

    game.play_card(P0, "Wharf", true).unwrap();
    game.cleanup_phase(P0).unwrap();
    game.start_turn(P0).unwrap();

    let p = game.player(P0);
    assert_eq!(p.hand().len(), 7);
    assert_eq!(p.state.buys, 2);
}

#[test]
fn test_fishing_village_carries_actions_and_coins() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Fishing Village");

    game.play_card(P0, "Fishing Village", true).unwrap();
    assert_eq!(game.player(P0).state.actions, 2); // 1 - 1 + 2
    assert_eq!(game.player(P0).state.coins, 1);

    game.cleanup_phase(P0).unwrap();
    game.start_turn(P0).unwrap();

    let p = game.player(P0);
    assert_eq!(p.state.actions, 2);
    assert_eq!(p.state.coins, 1);
}

#[test]
fn test_duration_does_not_fire_on_opponents_turn() {
    let mut game = null_game();
    put_in_hand(&mut game, P0, "Caravan");
    game.play_card(P0, "Caravan", true).unwrap();
    game.cleanup_phase(P0).unwrap();

    // Bob's turn start leaves Alice's hook armed
    game.start_turn(P1).unwrap();
    assert!(game.hooks().contains(HookPoint::TurnStart, "Caravan"));
    assert_eq!(game.player(P0).hand().len(), 5);

    game.start_turn(P0).unwrap();
    assert_eq!(game.player(P0).hand().len(), 6);
}

#[test]
fn test_potion_economy() {
    let mut game = GameBuilder::new()
        .player("Alice", Rc::new(GreedyDecider))
        .player("Bob", Rc::new(NullDecider))
        .expansion(sets::base_set())
        .expansion(sets::alchemy_set())
        .kingdom(["Familiar", "Village", "Smithy"])
        .seed(11)
        .build()
        .unwrap();

    let familiar = game.supply().sample("Familiar").unwrap();

    // Coins alone cannot buy a potion-cost card
    game.player_mut(P0).state.coins = 5;
    assert!(game.buy_card(P0, &familiar).is_err());

    game.player_mut(P0).state.potions = 1;
    game.buy_card(P0, &familiar).unwrap();

    let p = game.player(P0);
    assert_eq!(p.state.potions, 0);
    assert_eq!(p.state.coins, 2);
    assert_eq!(p.discard_pile().count_name("Familiar"), 1);

    // Playing a Potion yields the potion currency
    let potion = game.supply().sample("Potion").unwrap();
    game.gain_card(P0, &potion, &Destination::Hand).unwrap();
    game.exact_play(P0, &potion, true).unwrap();
    assert_eq!(game.player(P0).state.potions, 1);
}
