//! The effect registry.
//!
//! Card effects extend the engine by attaching named handlers to future
//! game events, so the engine never carries a case per card. Eight
//! categories exist today; adding one means adding a [`HookList`] field
//! to [`HookRegistry`] and a fire call site, with no change to existing
//! card code.
//!
//! ## Firing discipline
//!
//! Handlers fire in registration order (FIFO). A firing pass snapshots
//! the registered ids up front and lends each handler out of its slot
//! while it runs, so a handler may:
//!
//! - unregister itself by returning [`HookVerdict::Unregister`] (the
//!   usual way a one-shot "next turn" effect retires),
//! - unregister other hooks by name,
//! - register new hooks (they do not fire until the next pass),
//! - recursively invoke any game operation, including ones that fire the
//!   same category,
//!
//! and the pass will never invoke a handler that was removed earlier in
//! the pass, nor re-enter a handler that is currently running.

use crate::cards::CardHandle;
use crate::error::Result;
use crate::game::Game;
use crate::player::PlayerId;

/// What a handler wants done with its registration after it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookVerdict {
    /// Stay registered for the next event.
    Keep,
    /// Remove this registration; the handler's purpose is exhausted.
    Unregister,
}

/// Result type every handler returns.
pub type HookResult = Result<HookVerdict>;

/// Handler for player-scoped events (turn start, turn end, shuffle).
pub type PlayerHookFn = Box<dyn FnMut(&mut Game, PlayerId) -> HookResult>;

/// Handler for card-scoped events (play, gain, buy, discard, draw).
/// The card argument is the card the event is about.
pub type CardHookFn = Box<dyn FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult>;

/// Stable identifier assigned at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookId(pub u32);

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hook({})", self.0)
    }
}

/// The event categories handlers can listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HookPoint {
    TurnStart,
    TurnEnd,
    OnPlay,
    OnGain,
    OnBuy,
    OnDiscard,
    OnDraw,
    OnShuffle,
}

impl HookPoint {
    /// Every category, in firing-documentation order.
    pub const ALL: [Self; 8] = [
        Self::TurnStart,
        Self::TurnEnd,
        Self::OnPlay,
        Self::OnGain,
        Self::OnBuy,
        Self::OnDiscard,
        Self::OnDraw,
        Self::OnShuffle,
    ];
}

struct HookEntry<F> {
    id: HookId,
    name: String,
    /// `None` while the handler is lent out to a firing pass.
    handler: Option<F>,
}

/// One category's registrations, in FIFO order.
pub struct HookList<F> {
    entries: Vec<HookEntry<F>>,
}

impl<F> Default for HookList<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> HookList<F> {
    fn register(&mut self, id: HookId, name: String, handler: F) {
        self.entries.push(HookEntry {
            id,
            name,
            handler: Some(handler),
        });
    }

    /// Remove every registration with `name`. Idempotent.
    pub fn unregister(&mut self, name: &str) {
        self.entries.retain(|e| e.name != name);
    }

    /// Whether any registration with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in firing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Ids currently registered, in firing order.
    pub(crate) fn snapshot_ids(&self) -> Vec<HookId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Lend the handler out for invocation. `None` when the entry is
    /// gone or its handler is already lent out (a nested pass).
    pub(crate) fn take_handler(&mut self, id: HookId) -> Option<F> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)?
            .handler
            .take()
    }

    /// Return a lent handler. No-op when the entry was unregistered by
    /// name while the handler ran.
    pub(crate) fn restore_handler(&mut self, id: HookId, handler: F) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.handler = Some(handler);
        }
    }

    /// Drop the entry with `id`, if it still exists.
    pub(crate) fn remove(&mut self, id: HookId) {
        self.entries.retain(|e| e.id != id);
    }
}

/// All hook registrations for one game.
///
/// The registry exclusively owns the handlers; card effects address them
/// by name after registration, never by direct reference.
#[derive(Default)]
pub struct HookRegistry {
    next_id: u32,
    pub(crate) turn_start: HookList<PlayerHookFn>,
    pub(crate) turn_end: HookList<PlayerHookFn>,
    pub(crate) on_shuffle: HookList<PlayerHookFn>,
    pub(crate) on_play: HookList<CardHookFn>,
    pub(crate) on_gain: HookList<CardHookFn>,
    pub(crate) on_buy: HookList<CardHookFn>,
    pub(crate) on_discard: HookList<CardHookFn>,
    pub(crate) on_draw: HookList<CardHookFn>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a turn-start handler.
    pub fn register_turn_start(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.turn_start.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register a turn-end handler.
    pub fn register_turn_end(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.turn_end.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-shuffle handler.
    pub fn register_on_shuffle(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_shuffle.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-play handler.
    pub fn register_on_play(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_play.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-gain handler.
    pub fn register_on_gain(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_gain.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-buy handler.
    pub fn register_on_buy(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_buy.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-discard handler.
    pub fn register_on_discard(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_discard.register(id, name.into(), Box::new(handler));
        id
    }

    /// Register an on-draw handler.
    pub fn register_on_draw(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Game, PlayerId, &CardHandle) -> HookResult + 'static,
    ) -> HookId {
        let id = self.alloc_id();
        self.on_draw.register(id, name.into(), Box::new(handler));
        id
    }

    /// Remove every registration with `name` in `point`. Idempotent.
    pub fn unregister(&mut self, point: HookPoint, name: &str) {
        match point {
            HookPoint::TurnStart => self.turn_start.unregister(name),
            HookPoint::TurnEnd => self.turn_end.unregister(name),
            HookPoint::OnShuffle => self.on_shuffle.unregister(name),
            HookPoint::OnPlay => self.on_play.unregister(name),
            HookPoint::OnGain => self.on_gain.unregister(name),
            HookPoint::OnBuy => self.on_buy.unregister(name),
            HookPoint::OnDiscard => self.on_discard.unregister(name),
            HookPoint::OnDraw => self.on_draw.unregister(name),
        }
    }

    /// Whether `point` has a registration named `name`.
    #[must_use]
    pub fn contains(&self, point: HookPoint, name: &str) -> bool {
        match point {
            HookPoint::TurnStart => self.turn_start.contains(name),
            HookPoint::TurnEnd => self.turn_end.contains(name),
            HookPoint::OnShuffle => self.on_shuffle.contains(name),
            HookPoint::OnPlay => self.on_play.contains(name),
            HookPoint::OnGain => self.on_gain.contains(name),
            HookPoint::OnBuy => self.on_buy.contains(name),
            HookPoint::OnDiscard => self.on_discard.contains(name),
            HookPoint::OnDraw => self.on_draw.contains(name),
        }
    }

    /// Number of registrations in `point`.
    #[must_use]
    pub fn len(&self, point: HookPoint) -> usize {
        match point {
            HookPoint::TurnStart => self.turn_start.len(),
            HookPoint::TurnEnd => self.turn_end.len(),
            HookPoint::OnShuffle => self.on_shuffle.len(),
            HookPoint::OnPlay => self.on_play.len(),
            HookPoint::OnGain => self.on_gain.len(),
            HookPoint::OnBuy => self.on_buy.len(),
            HookPoint::OnDiscard => self.on_discard.len(),
            HookPoint::OnDraw => self.on_draw.len(),
        }
    }

    /// Whether no handlers are registered anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        HookPoint::ALL.iter().all(|&p| self.len(p) == 0)
    }
}
