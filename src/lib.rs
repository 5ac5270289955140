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

//! # telnetpp
//!
//! A Telnet (RFC 854) byte-stream codec paired with a pluggable
//! option-negotiation engine.
//!
//! ## Overview
//!
//! The crate is layered:
//!
//! - [`FrameCodec`]: a [`tokio_util::codec::Decoder`]/[`Encoder`] pair
//!   turning a raw Telnet byte stream into [`Element`]s (data runs,
//!   bare commands, negotiation verbs, subnegotiation payloads) and
//!   back, including `IAC IAC` escaping.
//! - [`OptionBase`]: a four-state (`Inactive`/`WantActive`/`Active`/
//!   `WantInactive`) negotiation machine for one option code on one
//!   side, generic over [`Perspective`] so a single type covers both
//!   halves of a symmetric option pair, and over a [`ConcreteOption`]
//!   carrying the option's own subnegotiation payload behavior.
//! - [`Session`]: owns a [`FrameCodec`] plus a registry of installed
//!   options, routes decoded elements to them, and surfaces plain
//!   data/commands to the caller.
//! - [`options`]: concrete options. [`options::echo`] (RFC 857, no
//!   payload) and [`options::msdp`] (MUD Server Data Protocol, option
//!   69, a recursive string/array/table value model).
//!
//! ## Usage Example
//!
//! ```rust
//! use telnetpp::{Session, Event};
//! use telnetpp::options::echo;
//!
//! let mut session = Session::new();
//! session.install(Box::new(echo::server())).unwrap();
//!
//! let mut out = Vec::new();
//! session.receive(
//!     &[0xFF, 0xFD, 0x01], // IAC DO ECHO
//!     |event: Event| println!("{event:?}"),
//!     |bytes| out.extend_from_slice(bytes),
//! );
//! assert_eq!(out, vec![0xFF, 0xFB, 0x01]); // IAC WILL ECHO
//! ```
//!
//! ## Error Handling
//!
//! [`CodecError`] covers the frame codec's own I/O-layer failures.
//! Malformed Telnet sequences (a stray `IAC <x>` inside a
//! subnegotiation) are not fatal: they're logged via `tracing::warn!`
//! and recovered from in place. [`SessionError`] covers host-caller
//! misuse (installing two options under the same code).
//!
//! ## Thread Safety
//!
//! [`Session`] and [`FrameCodec`] are **not** thread-safe. Each
//! connection owns its own instance.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 856: Telnet Binary Transmission
//! - RFC 857: Telnet Echo Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod codec;
mod consts;
mod element;
mod option;
pub mod options;
mod result;
mod session;

pub use self::codec::{FrameCodec, serialize};
pub use self::element::{Element, Verb};
pub use self::option::{ConcreteOption, NegotiationState, OptionBase, OptionHandle, Perspective, StateChange};
pub use self::result::{
    CodecError, CodecResult, SessionError, SessionResult, SubnegotiationErrorKind,
};
pub use self::session::{Event, Session};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::echo;

    #[test]
    fn end_to_end_echo_negotiation() {
        let mut session = Session::new();
        session.install(Box::new(echo::server())).unwrap();

        let mut out = Vec::new();
        session.receive(&[0xFF, 0xFD, 0x01], |_| {}, |bytes| out.extend_from_slice(bytes));
        assert_eq!(out, vec![0xFF, 0xFB, 0x01]);

        // A second identical DO produces no further bytes: already active.
        let mut out2 = Vec::new();
        session.receive(&[0xFF, 0xFD, 0x01], |_| {}, |bytes| out2.extend_from_slice(bytes));
        assert!(out2.is_empty());
    }
}
