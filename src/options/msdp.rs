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

//! Mud Server Data Protocol (option code 69): a recursive, typed
//! value model (string / array-of-string / table-of-variable) layered
//! on top of the option base's subnegotiation framing.

use crate::consts;
use crate::consts::option::msdp::{ARRAY_CLOSE, ARRAY_OPEN, TABLE_CLOSE, TABLE_OPEN, VAL, VAR};
use crate::element::Element;
use crate::option::{ConcreteOption, OptionBase, Perspective};
use bytes::{BufMut, Bytes, BytesMut};

/// A recursive MSDP value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// An arbitrary octet string containing no marker bytes.
    String(Bytes),
    /// An ordered sequence of strings.
    Array(Vec<Bytes>),
    /// An ordered sequence of `name: value` variables. Duplicate
    /// names are permitted and preserved in order.
    Table(Vec<Variable>),
}

impl Value {
    /// Builds a `String` value from anything convertible to `Bytes`.
    pub fn string(value: impl Into<Bytes>) -> Value {
        Value::String(value.into())
    }

    /// Builds an `Array` value from an iterator of string-convertible
    /// items.
    pub fn array<I, T>(items: I) -> Value
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Builds a `Table` value from an iterator of variables.
    pub fn table<I>(variables: I) -> Value
    where
        I: IntoIterator<Item = Variable>,
    {
        Value::Table(variables.into_iter().collect())
    }
}

/// A `(name, value)` pair. The unit of both inbound delivery
/// (`on_receive`) and outbound `send`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// The variable's name. Never contains a marker byte.
    pub name: Bytes,
    /// The variable's value.
    pub value: Value,
}

impl Variable {
    /// Builds a new variable.
    pub fn new(name: impl Into<Bytes>, value: Value) -> Variable {
        Variable {
            name: name.into(),
            value,
        }
    }
}

fn is_marker(byte: u8) -> bool {
    matches!(
        byte,
        VAR | VAL | TABLE_OPEN | TABLE_CLOSE | ARRAY_OPEN | ARRAY_CLOSE
    )
}

fn encode_value(value: &Value, out: &mut BytesMut) {
    match value {
        Value::String(bytes) => out.extend_from_slice(bytes),
        Value::Array(items) => {
            out.put_u8(ARRAY_OPEN);
            for item in items {
                out.put_u8(VAL);
                out.extend_from_slice(item);
            }
            out.put_u8(ARRAY_CLOSE);
        }
        Value::Table(variables) => {
            out.put_u8(TABLE_OPEN);
            for variable in variables {
                encode_variable(variable, out);
            }
            out.put_u8(TABLE_CLOSE);
        }
    }
}

fn encode_variable(variable: &Variable, out: &mut BytesMut) {
    out.put_u8(VAR);
    out.extend_from_slice(&variable.name);
    out.put_u8(VAL);
    encode_value(&variable.value, out);
}

/// Serializes a single variable to MSDP wire bytes (the content of a
/// `Subnegotiation(69, ...)` element, not including `IAC SB`/`IAC SE`).
pub fn encode(variable: &Variable) -> Bytes {
    let mut out = BytesMut::new();
    encode_variable(variable, &mut out);
    out.freeze()
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn read_until_marker(&mut self) -> Bytes {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if is_marker(byte) {
                break;
            }
            self.pos += 1;
        }
        Bytes::copy_from_slice(&self.data[start..self.pos])
    }

    fn parse_variable(&mut self) -> Option<Variable> {
        if self.advance()? != VAR {
            return None;
        }
        let name = self.read_until_marker();
        if self.advance()? != VAL {
            return None;
        }
        let value = self.parse_value()?;
        Some(Variable { name, value })
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek() {
            Some(TABLE_OPEN) => {
                self.pos += 1;
                self.parse_table()
            }
            Some(ARRAY_OPEN) => {
                self.pos += 1;
                self.parse_array()
            }
            _ => Some(Value::String(self.read_until_marker())),
        }
    }

    fn parse_table(&mut self) -> Option<Value> {
        let mut variables = Vec::new();
        loop {
            match self.peek() {
                Some(TABLE_CLOSE) => {
                    self.pos += 1;
                    return Some(Value::Table(variables));
                }
                Some(VAR) => variables.push(self.parse_variable()?),
                _ => return None,
            }
        }
    }

    fn parse_array(&mut self) -> Option<Value> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                Some(ARRAY_CLOSE) => {
                    self.pos += 1;
                    return Some(Value::Array(items));
                }
                Some(VAL) => {
                    self.pos += 1;
                    items.push(self.read_until_marker());
                }
                _ => return None,
            }
        }
    }
}

/// Parses `content` into a (possibly empty) sequence of top-level
/// variables. A malformed or truncated variable discards the
/// remainder of the payload; variables already parsed are returned.
pub fn parse_content(content: &[u8]) -> Vec<Variable> {
    let mut cursor = Cursor {
        data: content,
        pos: 0,
    };
    let mut variables = Vec::new();
    while cursor.peek().is_some() {
        match cursor.parse_variable() {
            Some(variable) => variables.push(variable),
            None => {
                tracing::warn!(
                    "malformed or truncated MSDP variable; discarding remainder of payload"
                );
                break;
            }
        }
    }
    variables
}

/// The MSDP option's payload behavior.
pub struct Msdp {
    on_receive: Option<Box<dyn FnMut(Variable, &mut dyn FnMut(Element))>>,
}

impl Default for Msdp {
    fn default() -> Self {
        Msdp { on_receive: None }
    }
}

impl ConcreteOption for Msdp {
    fn on_subnegotiation(&mut self, content: &[u8], emit: &mut dyn FnMut(Element)) {
        for variable in parse_content(content) {
            if let Some(callback) = self.on_receive.as_mut() {
                callback(variable, emit);
            }
        }
    }
}

impl OptionBase<Msdp> {
    /// Registers the callback fired once per top-level variable
    /// parsed out of an inbound subnegotiation.
    pub fn set_on_receive(&mut self, callback: impl FnMut(Variable, &mut dyn FnMut(Element)) + 'static) {
        self.inner_mut().on_receive = Some(Box::new(callback));
    }

    /// Serializes `variable` and delivers it as a `Subnegotiation(69, ...)`
    /// element via `emit`. Silently dropped (with a debug-level log) if
    /// this side is not `Active`.
    pub fn send(&mut self, variable: &Variable, emit: &mut dyn FnMut(Element)) {
        if !self.active() {
            tracing::debug!(code = self.code(), "MSDP send on an inactive option; dropping");
            return;
        }
        let content = encode(variable);
        emit(Element::subnegotiation(self.code(), content));
    }
}

/// Builds the `msdp::server` side: we `WILL`, the peer `DO`es.
pub fn server() -> OptionBase<Msdp> {
    OptionBase::new(consts::option::MSDP, Perspective::WeOffer, Msdp::default())
}

/// Builds the `msdp::client` side: we `DO`, the peer `WILL`s.
pub fn client() -> OptionBase<Msdp> {
    OptionBase::new(consts::option::MSDP, Perspective::WeRequest, Msdp::default())
}
