//! Effect-registry firing semantics, observed through real game events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use provincial::sets;
use provincial::{
    Destination, Game, GameBuilder, GameError, HookPoint, HookVerdict, NullDecider, PlayerId,
};

const P0: PlayerId = PlayerId::new(0);

fn game() -> Game {
    GameBuilder::new()
        .player("Alice", Rc::new(NullDecider))
        .player("Bob", Rc::new(NullDecider))
        .expansion(sets::base_set())
        .kingdom(["Village", "Smithy", "Market", "Witch", "Moat"])
        .seed(13)
        .build()
        .unwrap()
}

#[test]
fn test_hooks_fire_in_registration_order() {
    let mut game = game();
    let order = Rc::new(RefCell::new(Vec::new()));

    let o = Rc::clone(&order);
    game.hooks_mut().register_turn_start("first", move |_, _| {
        o.borrow_mut().push("first");
        Ok(HookVerdict::Keep)
    });
    let o = Rc::clone(&order);
    game.hooks_mut().register_turn_start("second", move |_, _| {
        o.borrow_mut().push("second");
        Ok(HookVerdict::Keep)
    });

    game.start_turn(P0).unwrap();

    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

#[test]
fn test_one_shot_hook_unregisters_itself() {
    let mut game = game();
    let fired = Rc::new(Cell::new(0));

    let f = Rc::clone(&fired);
    game.hooks_mut().register_turn_start("one-shot", move |_, _| {
        f.set(f.get() + 1);
        Ok(HookVerdict::Unregister)
    });

    game.start_turn(P0).unwrap();
    assert_eq!(fired.get(), 1);
    assert!(!game.hooks().contains(HookPoint::TurnStart, "one-shot"));

    game.start_turn(P0).unwrap();
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_persistent_hook_fires_every_turn() {
    let mut game = game();
    let fired = Rc::new(Cell::new(0));

    let f = Rc::clone(&fired);
    game.hooks_mut().register_turn_start("every-turn", move |_, _| {
        f.set(f.get() + 1);
        Ok(HookVerdict::Keep)
    });

    game.start_turn(P0).unwrap();
    game.start_turn(P0).unwrap();
    game.start_turn(P0).unwrap();

    assert_eq!(fired.get(), 3);
    assert!(game.hooks().contains(HookPoint::TurnStart, "every-turn"));
}

#[test]
fn test_hook_registered_during_a_pass_waits_for_the_next() {
    let mut game = game();
    let order = Rc::new(RefCell::new(Vec::new()));

    let o = Rc::clone(&order);
    game.hooks_mut().register_turn_start("parent", move |g, _| {
        o.borrow_mut().push("parent");
        let o2 = Rc::clone(&o);
        g.hooks_mut().register_turn_start("child", move |_, _| {
            o2.borrow_mut().push("child");
            Ok(HookVerdict::Unregister)
        });
        Ok(HookVerdict::Unregister)
    });

    game.start_turn(P0).unwrap();
    assert_eq!(*order.borrow(), vec!["parent"]);
    assert!(game.hooks().contains(HookPoint::TurnStart, "child"));

    game.start_turn(P0).unwrap();
    assert_eq!(*order.borrow(), vec!["parent", "child"]);
}

#[test]
fn test_hook_removed_mid_pass_does_not_fire() {
    let mut game = game();
    let order = Rc::new(RefCell::new(Vec::new()));

    let o = Rc::clone(&order);
    game.hooks_mut().register_turn_start("assassin", move |g, _| {
        o.borrow_mut().push("assassin");
        g.hooks_mut().unregister(HookPoint::TurnStart, "victim");
        Ok(HookVerdict::Keep)
    });
    let o = Rc::clone(&order);
    game.hooks_mut().register_turn_start("victim", move |_, _| {
        o.borrow_mut().push("victim");
        Ok(HookVerdict::Keep)
    });

    game.start_turn(P0).unwrap();

    assert_eq!(*order.borrow(), vec!["assassin"]);
    assert!(!game.hooks().contains(HookPoint::TurnStart, "victim"));
}

#[test]
fn test_buying_fires_buy_then_gain() {
    let mut game = game();
    let events = Rc::new(RefCell::new(Vec::new()));

    let e = Rc::clone(&events);
    game.hooks_mut().register_on_buy("watch-buys", move |_, _, card| {
        e.borrow_mut().push(format!("buy {}", card.name()));
        Ok(HookVerdict::Keep)
    });
    let e = Rc::clone(&events);
    game.hooks_mut().register_on_gain("watch-gains", move |_, _, card| {
        e.borrow_mut().push(format!("gain {}", card.name()));
        Ok(HookVerdict::Keep)
    });

    game.player_mut(P0).state.coins = 2;
    let estate = game.supply().sample("Estate").unwrap();
    game.buy_card(P0, &estate).unwrap();

    assert_eq!(*events.borrow(), vec!["buy Estate", "gain Estate"]);

    // A plain gain fires only the gain hook
    game.gain_card(P0, &estate, &Destination::Discard).unwrap();
    assert_eq!(
        *events.borrow(),
        vec!["buy Estate", "gain Estate", "gain Estate"]
    );
}

#[test]
fn test_draw_and_shuffle_hooks() {
    let mut game = game();
    let draws = Rc::new(Cell::new(0));
    let shuffles = Rc::new(Cell::new(0));

    let d = Rc::clone(&draws);
    game.hooks_mut().register_on_draw("count-draws", move |_, _, _| {
        d.set(d.get() + 1);
        Ok(HookVerdict::Keep)
    });
    let s = Rc::clone(&shuffles);
    game.hooks_mut().register_on_shuffle("count-shuffles", move |_, _| {
        s.set(s.get() + 1);
        Ok(HookVerdict::Keep)
    });

    game.draw_cards(P0, 3).unwrap();
    assert_eq!(draws.get(), 3);
    assert_eq!(shuffles.get(), 0);

    // Hand (8) and deck (2) cycle through cleanup: the five-card redraw
    // must reshuffle.
    game.cleanup_phase(P0).unwrap();
    assert_eq!(shuffles.get(), 1);
}

#[test]
fn test_discard_hook_fires_per_discarded_card() {
    let mut game = game();
    let discards = Rc::new(Cell::new(0));

    let d = Rc::clone(&discards);
    game.hooks_mut()
        .register_on_discard("count-discards", move |_, _, _| {
            d.set(d.get() + 1);
            Ok(HookVerdict::Keep)
        });

    let copper = game.supply().sample("Copper").unwrap();
    game.gain_card(P0, &copper, &Destination::Hand).unwrap();
    game.discard_from_hand(P0, &copper).unwrap();
    assert_eq!(discards.get(), 1);

    // Absent card: silent no-op, no event
    let witch = game.supply().sample("Witch").unwrap();
    game.discard_from_hand(P0, &witch).unwrap();
    assert_eq!(discards.get(), 1);
}

#[test]
fn test_hook_error_propagates_and_hook_survives() {
    let mut game = game();

    game.hooks_mut().register_turn_start("faulty", |_, _| {
        Err(GameError::InvalidGameSetup("handler exploded".into()))
    });

    assert!(game.start_turn(P0).is_err());
    assert!(game.hooks().contains(HookPoint::TurnStart, "faulty"));
}

#[test]
fn test_gain_hook_may_gain_recursively() {
    let mut game = game();
    let fired = Rc::new(Cell::new(0));

    // Gaining a Gold also gains a Silver. The nested gain fires the
    // category again, but this handler is lent out while it runs, so it
    // cannot re-enter itself.
    let f = Rc::clone(&fired);
    game.hooks_mut().register_on_gain("gold-bonus", move |g, who, card| {
        if card.name() != "Gold" {
            return Ok(HookVerdict::Keep);
        }
        f.set(f.get() + 1);
        let silver = g.supply().sample("Silver").unwrap();
        g.gain_card(who, &silver, &Destination::Discard)?;
        Ok(HookVerdict::Keep)
    });

    let gold = game.supply().sample("Gold").unwrap();
    game.gain_card(P0, &gold, &Destination::Discard).unwrap();

    assert_eq!(fired.get(), 1);
    assert_eq!(game.player(P0).discard_pile().count_name("Gold"), 1);
    assert_eq!(game.player(P0).discard_pile().count_name("Silver"), 1);
    assert_eq!(game.player(P0).cards_owned(), 12);
}
