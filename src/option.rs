//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Per-option negotiation state machine.
//!
//! An [`OptionBase`] owns one side's four-state negotiation machine
//! (`Inactive`/`WantActive`/`Active`/`WantInactive`) and forwards
//! activation callbacks and subnegotiation payloads to a concrete
//! [`ConcreteOption`]. A single generic type stands in for both the
//! "we offer" and "we request" halves of a symmetric option pair
//! (e.g. `echo::client` / `echo::server`) via [`Perspective`].

use crate::element::{Element, Verb};

/// Which pair of verbs an [`OptionBase`] emits versus reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Perspective {
    /// We emit WILL/WONT and react to DO/DONT (e.g. `echo::server`).
    WeOffer,
    /// We emit DO/DONT and react to WILL/WONT (e.g. `echo::client`).
    WeRequest,
}

impl Perspective {
    fn request_verb(self) -> Verb {
        match self {
            Perspective::WeOffer => Verb::Will,
            Perspective::WeRequest => Verb::Do,
        }
    }

    fn refuse_verb(self) -> Verb {
        match self {
            Perspective::WeOffer => Verb::Wont,
            Perspective::WeRequest => Verb::Dont,
        }
    }

    fn expected_positive(self) -> Verb {
        match self {
            Perspective::WeOffer => Verb::Do,
            Perspective::WeRequest => Verb::Will,
        }
    }

    fn expected_negative(self) -> Verb {
        match self {
            Perspective::WeOffer => Verb::Dont,
            Perspective::WeRequest => Verb::Wont,
        }
    }
}

/// The four-state per-side negotiation machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NegotiationState {
    /// Neither side has asked for the option.
    #[default]
    Inactive,
    /// We asked to activate; awaiting the peer's reply.
    WantActive,
    /// The option is active on this side.
    Active,
    /// We asked to deactivate; awaiting the peer's reply.
    WantInactive,
}

/// Reported to [`OptionBase::set_on_state_change`] whenever the
/// option's activity actually changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    /// True if the option just became active, false if it just
    /// became inactive.
    pub active: bool,
    /// True if the peer initiated this transition (as opposed to us).
    pub remote_initiated: bool,
    /// True if this transition is a rejection of a local activation
    /// request (we asked, peer refused).
    pub rejected: bool,
}

/// A concrete Telnet option's payload behavior, independent of the
/// negotiation state machine that activates it.
pub trait ConcreteOption {
    /// Handles an inbound subnegotiation payload. Called only while
    /// the owning [`OptionBase`] is `Active`.
    fn on_subnegotiation(&mut self, content: &[u8], emit: &mut dyn FnMut(Element));
}

/// Type-erased capability set a [`crate::session::Session`] dispatches
/// through, independent of the concrete option type.
pub trait OptionHandle {
    /// The option code this handle was installed under.
    fn code(&self) -> u8;
    /// Injects an inbound negotiation verb.
    fn negotiate(&mut self, verb: Verb, emit: &mut dyn FnMut(Element));
    /// Injects an inbound subnegotiation payload.
    fn subnegotiate(&mut self, content: &[u8], emit: &mut dyn FnMut(Element));
    /// User-initiated request to bring the option active.
    fn activate(&mut self, emit: &mut dyn FnMut(Element));
    /// User-initiated request to bring the option inactive.
    fn deactivate(&mut self, emit: &mut dyn FnMut(Element));
}

/// Owns the four-state negotiation machine for one option code, on
/// one side, and dispatches to a concrete option.
pub struct OptionBase<O> {
    code: u8,
    perspective: Perspective,
    state: NegotiationState,
    declined_sent: bool,
    pending_activate: bool,
    pending_deactivate: bool,
    on_state_change: Option<Box<dyn FnMut(StateChange)>>,
    concrete: O,
}

impl<O: ConcreteOption> OptionBase<O> {
    /// Creates a new option base for `code`, taking `perspective` and
    /// wrapping `concrete`.
    pub fn new(code: u8, perspective: Perspective, concrete: O) -> Self {
        OptionBase {
            code,
            perspective,
            state: NegotiationState::Inactive,
            declined_sent: false,
            pending_activate: false,
            pending_deactivate: false,
            on_state_change: None,
            concrete,
        }
    }

    /// Registers a callback fired whenever this option's activity
    /// changes.
    pub fn set_on_state_change(&mut self, callback: impl FnMut(StateChange) + 'static) {
        self.on_state_change = Some(Box::new(callback));
    }

    /// The option code this base was constructed with.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// True iff this side's state is `Active`.
    pub fn active(&self) -> bool {
        self.state == NegotiationState::Active
    }

    /// The current negotiation state, mainly for tests.
    pub fn state(&self) -> NegotiationState {
        self.state
    }

    /// Read-only access to the wrapped concrete option.
    pub fn inner(&self) -> &O {
        &self.concrete
    }

    /// Mutable access to the wrapped concrete option.
    pub fn inner_mut(&mut self) -> &mut O {
        &mut self.concrete
    }

    fn fire(&mut self, change: StateChange) {
        if let Some(callback) = self.on_state_change.as_mut() {
            callback(change);
        }
    }

    fn send(&self, verb: Verb, emit: &mut dyn FnMut(Element)) {
        emit(Element::negotiation(verb, self.code));
    }

    /// User-initiated request to bring the option active.
    pub fn activate(&mut self, emit: &mut dyn FnMut(Element)) {
        match self.state {
            NegotiationState::Inactive => {
                self.send(self.perspective.request_verb(), emit);
                self.state = NegotiationState::WantActive;
                self.declined_sent = false;
            }
            NegotiationState::WantActive | NegotiationState::Active => {}
            NegotiationState::WantInactive => {
                self.pending_activate = true;
            }
        }
    }

    /// User-initiated request to bring the option inactive.
    pub fn deactivate(&mut self, emit: &mut dyn FnMut(Element)) {
        match self.state {
            NegotiationState::Inactive => {}
            NegotiationState::WantActive => {
                self.pending_deactivate = true;
            }
            NegotiationState::Active => {
                self.send(self.perspective.refuse_verb(), emit);
                self.state = NegotiationState::WantInactive;
            }
            NegotiationState::WantInactive => {}
        }
    }

    /// Injects an inbound negotiation verb, as the session would on
    /// receiving an `Element::Negotiation` addressed to this option.
    pub fn negotiate(&mut self, verb: Verb, emit: &mut dyn FnMut(Element)) {
        if verb == self.perspective.expected_positive() {
            self.on_positive(emit);
        } else if verb == self.perspective.expected_negative() {
            self.on_negative(emit);
        } else {
            tracing::warn!(
                code = self.code,
                verb = %verb,
                "negotiation verb does not match this option's perspective; ignoring"
            );
        }
    }

    fn on_positive(&mut self, emit: &mut dyn FnMut(Element)) {
        match self.state {
            NegotiationState::Inactive => {
                self.send(self.perspective.request_verb(), emit);
                self.state = NegotiationState::Active;
                self.fire(StateChange {
                    active: true,
                    remote_initiated: true,
                    rejected: false,
                });
            }
            NegotiationState::WantActive => {
                self.state = NegotiationState::Active;
                self.fire(StateChange {
                    active: true,
                    remote_initiated: false,
                    rejected: false,
                });
                if self.pending_deactivate {
                    self.pending_deactivate = false;
                    self.send(self.perspective.refuse_verb(), emit);
                    self.state = NegotiationState::WantInactive;
                }
            }
            NegotiationState::Active => {
                // Already active: an unsolicited confirmation. Emit nothing.
            }
            NegotiationState::WantInactive => {
                tracing::warn!(
                    code = self.code,
                    "peer re-asserted the option while we are deactivating; ignoring"
                );
            }
        }
    }

    fn on_negative(&mut self, emit: &mut dyn FnMut(Element)) {
        match self.state {
            NegotiationState::Inactive => {
                if !self.declined_sent {
                    self.send(self.perspective.refuse_verb(), emit);
                    self.declined_sent = true;
                }
            }
            NegotiationState::WantActive => {
                self.state = NegotiationState::Inactive;
                self.declined_sent = false;
                self.fire(StateChange {
                    active: false,
                    remote_initiated: false,
                    rejected: true,
                });
                self.resume_pending_activate(emit);
            }
            NegotiationState::Active => {
                self.state = NegotiationState::Inactive;
                self.declined_sent = false;
                self.send(self.perspective.refuse_verb(), emit);
                self.fire(StateChange {
                    active: false,
                    remote_initiated: true,
                    rejected: false,
                });
                self.resume_pending_activate(emit);
            }
            NegotiationState::WantInactive => {
                self.state = NegotiationState::Inactive;
                self.declined_sent = false;
                self.fire(StateChange {
                    active: false,
                    remote_initiated: false,
                    rejected: false,
                });
                self.resume_pending_activate(emit);
            }
        }
    }

    fn resume_pending_activate(&mut self, emit: &mut dyn FnMut(Element)) {
        if self.pending_activate {
            self.pending_activate = false;
            self.send(self.perspective.request_verb(), emit);
            self.state = NegotiationState::WantActive;
        }
    }

    /// Injects an inbound subnegotiation payload, dropping it
    /// silently unless this side is `Active`.
    pub fn subnegotiate(&mut self, content: &[u8], emit: &mut dyn FnMut(Element)) {
        if self.active() {
            self.concrete.on_subnegotiation(content, emit);
        }
    }
}

impl<O: ConcreteOption> OptionHandle for OptionBase<O> {
    fn code(&self) -> u8 {
        self.code()
    }

    fn negotiate(&mut self, verb: Verb, emit: &mut dyn FnMut(Element)) {
        OptionBase::negotiate(self, verb, emit)
    }

    fn subnegotiate(&mut self, content: &[u8], emit: &mut dyn FnMut(Element)) {
        OptionBase::subnegotiate(self, content, emit)
    }

    fn activate(&mut self, emit: &mut dyn FnMut(Element)) {
        OptionBase::activate(self, emit)
    }

    fn deactivate(&mut self, emit: &mut dyn FnMut(Element)) {
        OptionBase::deactivate(self, emit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mute;
    impl ConcreteOption for Mute {
        fn on_subnegotiation(&mut self, _content: &[u8], _emit: &mut dyn FnMut(Element)) {}
    }

    fn collect(f: impl FnOnce(&mut dyn FnMut(Element))) -> Vec<Element> {
        let mut out = Vec::new();
        f(&mut |e| out.push(e));
        out
    }

    #[test]
    fn inactive_recv_will_on_we_request_activates_and_sends_do() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let emitted = collect(|emit| opt.negotiate(Verb::Will, emit));
        assert_eq!(emitted, vec![Element::negotiation(Verb::Do, 1)]);
        assert!(opt.active());
    }

    #[test]
    fn duplicate_will_after_active_emits_nothing() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let _ = collect(|emit| opt.negotiate(Verb::Will, emit));
        let emitted = collect(|emit| opt.negotiate(Verb::Will, emit));
        assert!(emitted.is_empty());
    }

    #[test]
    fn activate_then_recv_will_completes_without_resending() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let first = collect(|emit| opt.activate(emit));
        assert_eq!(first, vec![Element::negotiation(Verb::Do, 1)]);
        assert_eq!(opt.state(), NegotiationState::WantActive);
        let second = collect(|emit| opt.negotiate(Verb::Will, emit));
        assert!(second.is_empty());
        assert!(opt.active());
    }

    #[test]
    fn we_offer_activates_on_do() {
        let mut opt = OptionBase::new(1, Perspective::WeOffer, Mute);
        let emitted = collect(|emit| opt.negotiate(Verb::Do, emit));
        assert_eq!(emitted, vec![Element::negotiation(Verb::Will, 1)]);
        assert!(opt.active());
    }

    #[test]
    fn repeated_wont_while_inactive_only_replies_once() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let first = collect(|emit| opt.negotiate(Verb::Wont, emit));
        assert_eq!(first, vec![Element::negotiation(Verb::Dont, 1)]);
        let second = collect(|emit| opt.negotiate(Verb::Wont, emit));
        assert!(second.is_empty());
    }

    #[test]
    fn active_then_recv_wont_deactivates_with_acknowledgement() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let _ = collect(|emit| opt.negotiate(Verb::Will, emit));
        assert!(opt.active());
        let emitted = collect(|emit| opt.negotiate(Verb::Wont, emit));
        assert_eq!(emitted, vec![Element::negotiation(Verb::Dont, 1)]);
        assert!(!opt.active());
    }

    #[test]
    fn deactivate_from_active_then_peer_confirms() {
        let mut opt = OptionBase::new(1, Perspective::WeRequest, Mute);
        let _ = collect(|emit| opt.negotiate(Verb::Will, emit));
        let request = collect(|emit| opt.deactivate(emit));
        assert_eq!(request, vec![Element::negotiation(Verb::Dont, 1)]);
        assert_eq!(opt.state(), NegotiationState::WantInactive);
        let confirm = collect(|emit| opt.negotiate(Verb::Wont, emit));
        assert!(confirm.is_empty());
        assert!(!opt.active());
    }

    #[test]
    fn subnegotiate_dropped_when_not_active() {
        struct Counter(usize);
        impl ConcreteOption for Counter {
            fn on_subnegotiation(&mut self, _content: &[u8], _emit: &mut dyn FnMut(Element)) {
                self.0 += 1;
            }
        }
        let mut opt = OptionBase::new(69, Perspective::WeOffer, Counter(0));
        opt.subnegotiate(&[0x00], &mut |_| {});
        assert_eq!(opt.inner().0, 0);
    }
}
