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

//! The session: owns per-code option instances and routes parsed
//! elements to them.

use crate::codec::FrameCodec;
use crate::element::{Element, Verb};
use crate::option::OptionHandle;
use crate::result::{SessionError, SessionResult};
use bytes::{Bytes, BytesMut};
use std::collections::{HashMap, HashSet};
use tokio_util::codec::Encoder;

/// An inbound event surfaced to the host application: plain data or
/// a bare command byte. Negotiations and subnegotiations are routed
/// to their option instead of reaching the caller directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A run of plain data octets.
    Data(Bytes),
    /// A single command byte.
    Command(u8),
}

fn refusal_for(verb: Verb) -> Verb {
    match verb {
        Verb::Will => Verb::Dont,
        Verb::Do => Verb::Wont,
        Verb::Wont => Verb::Dont,
        Verb::Dont => Verb::Wont,
    }
}

/// Owns a [`FrameCodec`] and a registry of [`OptionHandle`]s keyed by
/// option code. Single-threaded, synchronous; see the crate docs for
/// the concurrency model.
#[derive(Default)]
pub struct Session {
    codec: FrameCodec,
    options: HashMap<u8, Box<dyn OptionHandle>>,
    refused_unregistered: HashSet<(u8, Verb)>,
}

impl Session {
    /// Creates a new session with no options installed.
    pub fn new() -> Session {
        Session::default()
    }

    /// Registers `option` under its own code. Fails if an option is
    /// already registered for that code.
    pub fn install(&mut self, option: Box<dyn OptionHandle>) -> SessionResult<()> {
        let code = option.code();
        if self.options.contains_key(&code) {
            return Err(SessionError::AlreadyRegistered(code));
        }
        self.options.insert(code, option);
        Ok(())
    }

    /// True iff an option is registered under `code`.
    pub fn has_option(&self, code: u8) -> bool {
        self.options.contains_key(&code)
    }

    /// Mutable access to a registered option, for driving
    /// `activate`/`deactivate` directly.
    pub fn option_mut(&mut self, code: u8) -> Option<&mut Box<dyn OptionHandle>> {
        self.options.get_mut(&code)
    }

    fn encode_and_emit(&mut self, elements: Vec<Element>, emit_out: &mut dyn FnMut(&[u8])) {
        let mut buf = BytesMut::new();
        for element in elements {
            self.codec
                .encode(element, &mut buf)
                .expect("encoding never fails");
        }
        if !buf.is_empty() {
            emit_out(&buf);
        }
    }

    /// Drives the frame codec over `bytes`, surfacing `Data`/`Command`
    /// elements via `on_event` and writing any outbound bytes produced
    /// by option negotiation/subnegotiation via `emit_out`.
    pub fn receive(
        &mut self,
        bytes: &[u8],
        mut on_event: impl FnMut(Event),
        mut emit_out: impl FnMut(&[u8]),
    ) {
        let mut elements = Vec::new();
        self.codec.feed(bytes, &mut |element| elements.push(element));

        for element in elements {
            match element {
                Element::Data(data) => on_event(Event::Data(data)),
                Element::Command(byte) => on_event(Event::Command(byte)),
                Element::Negotiation {
                    request,
                    option_code,
                } => {
                    let mut out = Vec::new();
                    if let Some(option) = self.options.get_mut(&option_code) {
                        option.negotiate(request, &mut |e| out.push(e));
                    } else {
                        let key = (option_code, request);
                        if !self.refused_unregistered.contains(&key) {
                            self.refused_unregistered.insert(key);
                            out.push(Element::negotiation(refusal_for(request), option_code));
                        }
                    }
                    self.encode_and_emit(out, &mut emit_out);
                }
                Element::Subnegotiation {
                    option_code,
                    content,
                } => {
                    if let Some(option) = self.options.get_mut(&option_code) {
                        let mut out = Vec::new();
                        option.subnegotiate(&content, &mut |e| out.push(e));
                        self.encode_and_emit(out, &mut emit_out);
                    }
                }
            }
        }
    }
}
