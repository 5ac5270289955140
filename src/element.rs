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

//! The `Element` sum type crossing the frame codec / session boundary.

use crate::consts;
use bytes::Bytes;
use std::fmt;

/// One of the four Telnet negotiation verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    /// "I will perform option" / accept `DO`.
    Will,
    /// Refuse / cease performing an option.
    Wont,
    /// "Please perform option" / accept `WILL`.
    Do,
    /// Refuse / request cessation of an option.
    Dont,
}

impl Verb {
    /// Maps a verb to its wire byte.
    pub fn to_u8(self) -> u8 {
        match self {
            Verb::Will => consts::WILL,
            Verb::Wont => consts::WONT,
            Verb::Do => consts::DO,
            Verb::Dont => consts::DONT,
        }
    }

    /// Maps a wire byte to a verb, if it is one of the four negotiation bytes.
    pub fn from_u8(byte: u8) -> Option<Verb> {
        match byte {
            consts::WILL => Some(Verb::Will),
            consts::WONT => Some(Verb::Wont),
            consts::DO => Some(Verb::Do),
            consts::DONT => Some(Verb::Dont),
            _ => None,
        }
    }

    /// The verb's positive counterpart is the one accepting the option
    /// (`WILL`/`DO`); `is_positive` tells them apart from `WONT`/`DONT`.
    pub fn is_positive(self) -> bool {
        matches!(self, Verb::Will | Verb::Do)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verb::Will => "WILL",
            Verb::Wont => "WONT",
            Verb::Do => "DO",
            Verb::Dont => "DONT",
        };
        write!(f, "{s}")
    }
}

/// An item crossing the frame codec / session boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// A non-empty run of plain data octets.
    Data(Bytes),
    /// A single command byte other than the five that introduce
    /// multi-byte sequences.
    Command(u8),
    /// A negotiation verb paired with the option code it addresses.
    Negotiation {
        /// Which of WILL/WONT/DO/DONT was sent.
        request: Verb,
        /// The option code the negotiation addresses.
        option_code: u8,
    },
    /// An option's subnegotiation payload, with internal `IAC IAC`
    /// already unescaped to a single `IAC`.
    Subnegotiation {
        /// The option the payload belongs to.
        option_code: u8,
        /// The unescaped payload bytes.
        content: Bytes,
    },
}

impl Element {
    /// Convenience constructor for a negotiation element.
    pub fn negotiation(request: Verb, option_code: u8) -> Element {
        Element::Negotiation {
            request,
            option_code,
        }
    }

    /// Convenience constructor for a subnegotiation element.
    pub fn subnegotiation(option_code: u8, content: impl Into<Bytes>) -> Element {
        Element::Subnegotiation {
            option_code,
            content: content.into(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Data(bytes) => write!(f, "Data({} bytes)", bytes.len()),
            Element::Command(byte) => write!(f, "Command({byte:#04X})"),
            Element::Negotiation {
                request,
                option_code,
            } => write!(f, "{request} {option_code}"),
            Element::Subnegotiation {
                option_code,
                content,
            } => write!(f, "Subnegotiation({option_code}, {} bytes)", content.len()),
        }
    }
}
