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

//! The frame codec: the byte-by-byte state machine that turns a raw
//! Telnet byte stream into a sequence of [`Element`]s and back.

use crate::consts;
use crate::element::{Element, Verb};
use crate::result::CodecError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Internal decoder state. Mirrors the state machine in the crate's
/// framing rules: `Normal`, `SeenIac`, `Negotiating`, and the three
/// subnegotiation states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecoderState {
    Normal,
    SeenIac,
    Negotiating(Verb),
    SbOptionCode,
    SbPayload(u8),
    SbPayloadIac(u8),
}

/// Parses a Telnet byte stream into [`Element`]s and serializes
/// `Element`s back to wire bytes.
///
/// `FrameCodec` implements `tokio_util::codec::{Decoder, Encoder}` so
/// it can drive a `Framed` transport directly. [`FrameCodec::feed`]
/// is provided for callers that already own their own buffer and
/// just want a closure invoked per decoded element.
#[derive(Debug)]
pub struct FrameCodec {
    state: DecoderState,
    data_buffer: BytesMut,
    payload_buffer: BytesMut,
    input_buffer: BytesMut,
}

impl Default for FrameCodec {
    fn default() -> Self {
        FrameCodec {
            state: DecoderState::Normal,
            data_buffer: BytesMut::new(),
            payload_buffer: BytesMut::new(),
            input_buffer: BytesMut::new(),
        }
    }
}

impl FrameCodec {
    /// Creates a new, empty frame codec.
    pub fn new() -> FrameCodec {
        FrameCodec::default()
    }

    /// Feeds `bytes` to the codec, invoking `emit` once per complete
    /// `Element` recognized, in input order. Any trailing incomplete
    /// bytes are retained internally and resumed on the next call.
    pub fn feed(&mut self, bytes: &[u8], emit: &mut dyn FnMut(Element)) {
        self.input_buffer.extend_from_slice(bytes);
        let mut buf = std::mem::take(&mut self.input_buffer);
        loop {
            match self.decode(&mut buf) {
                Ok(Some(element)) => emit(element),
                Ok(None) => break,
                Err(_) => break,
            }
        }
        self.input_buffer = buf;
    }

    fn flush_data_run(&mut self) -> Option<Element> {
        if self.data_buffer.is_empty() {
            None
        } else {
            let run = self.data_buffer.split().freeze();
            Some(Element::Data(run))
        }
    }
}

impl Decoder for FrameCodec {
    type Item = Element;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Element>, CodecError> {
        loop {
            if !src.has_remaining() {
                return Ok(if self.state == DecoderState::Normal {
                    self.flush_data_run()
                } else {
                    None
                });
            }
            let byte = src.get_u8();
            match self.state {
                DecoderState::Normal => {
                    if byte == consts::IAC {
                        self.state = DecoderState::SeenIac;
                        if let Some(element) = self.flush_data_run() {
                            return Ok(Some(element));
                        }
                    } else {
                        self.data_buffer.put_u8(byte);
                    }
                }
                DecoderState::SeenIac => {
                    self.state = DecoderState::Normal;
                    match byte {
                        consts::IAC => self.data_buffer.put_u8(consts::IAC),
                        consts::SE => {
                            tracing::warn!("received stray IAC SE outside a subnegotiation");
                        }
                        consts::SB => self.state = DecoderState::SbOptionCode,
                        other => {
                            if let Some(verb) = Verb::from_u8(other) {
                                self.state = DecoderState::Negotiating(verb);
                            } else {
                                return Ok(Some(Element::Command(other)));
                            }
                        }
                    }
                }
                DecoderState::Negotiating(verb) => {
                    self.state = DecoderState::Normal;
                    return Ok(Some(Element::negotiation(verb, byte)));
                }
                DecoderState::SbOptionCode => {
                    self.state = DecoderState::SbPayload(byte);
                }
                DecoderState::SbPayload(code) => {
                    if byte == consts::IAC {
                        self.state = DecoderState::SbPayloadIac(code);
                    } else {
                        self.payload_buffer.put_u8(byte);
                    }
                }
                DecoderState::SbPayloadIac(code) => match byte {
                    consts::IAC => {
                        self.payload_buffer.put_u8(consts::IAC);
                        self.state = DecoderState::SbPayload(code);
                    }
                    consts::SE => {
                        self.state = DecoderState::Normal;
                        let content = self.payload_buffer.split().freeze();
                        return Ok(Some(Element::subnegotiation(code, content)));
                    }
                    other => {
                        tracing::warn!(
                            option = code,
                            byte = format!("{other:#04X}"),
                            "malformed IAC inside subnegotiation payload; aborting subnegotiation"
                        );
                        self.payload_buffer.clear();
                        self.state = DecoderState::Normal;
                        // `other` is neither IAC nor SE (the outer match already
                        // ruled those out), so resume as if it had just followed
                        // a fresh IAC: either SB or a command/verb byte.
                        if other == consts::SB {
                            self.state = DecoderState::SbOptionCode;
                        } else if let Some(verb) = Verb::from_u8(other) {
                            self.state = DecoderState::Negotiating(verb);
                        } else {
                            return Ok(Some(Element::Command(other)));
                        }
                    }
                },
            }
        }
    }
}

fn write_escaped(dst: &mut BytesMut, bytes: &[u8]) {
    dst.reserve(bytes.len());
    for &byte in bytes {
        if byte == consts::IAC {
            dst.put_u8(consts::IAC);
            dst.put_u8(consts::IAC);
        } else {
            dst.put_u8(byte);
        }
    }
}

impl Encoder<Element> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Element, dst: &mut BytesMut) -> Result<(), CodecError> {
        match item {
            Element::Data(bytes) => write_escaped(dst, &bytes),
            Element::Command(byte) => {
                dst.put_u8(consts::IAC);
                dst.put_u8(byte);
            }
            Element::Negotiation {
                request,
                option_code,
            } => {
                dst.put_u8(consts::IAC);
                dst.put_u8(request.to_u8());
                dst.put_u8(option_code);
            }
            Element::Subnegotiation {
                option_code,
                content,
            } => {
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option_code);
                write_escaped(dst, &content);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

impl Encoder<&[u8]> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), CodecError> {
        write_escaped(dst, item);
        Ok(())
    }
}

impl Encoder<&str> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), CodecError> {
        write_escaped(dst, item.as_bytes());
        Ok(())
    }
}

/// Serializes a single `Element` to its wire encoding, independent of
/// any decoder state. Convenience for callers that only ever encode.
pub fn serialize(element: Element) -> Bytes {
    let mut dst = BytesMut::new();
    let mut codec = FrameCodec::new();
    codec
        .encode(element, &mut dst)
        .expect("encoding never fails");
    dst.freeze()
}
