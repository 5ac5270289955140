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

//! Error types returned by the codec and session layers.
//!
//! Protocol anomalies recovered in-band (stray `SE`, malformed MSDP
//! payloads) are never surfaced here; see the crate docs for the
//! recovery rules. These types cover only conditions the `Decoder`/
//! `Encoder` impls themselves cannot recover from, and caller
//! configuration mistakes.

use std::fmt;

/// Result type for the frame codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced by the frame codec.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error from the underlying transport.
    IoError {
        /// The underlying error kind.
        kind: std::io::ErrorKind,
        /// A short description of which operation failed.
        operation: String,
    },

    /// A negotiation frame could not be processed as received.
    NegotiationError {
        /// Description of what went wrong during negotiation.
        reason: String,
        /// The frame type that caused the error, if available.
        frame_type: Option<String>,
    },

    /// A subnegotiation payload could not be decoded or encoded.
    SubnegotiationError {
        /// The option the subnegotiation was for, if known.
        option: Option<u8>,
        /// The specific reason decoding or encoding failed.
        reason: SubnegotiationErrorKind,
    },
}

/// Specific reasons a subnegotiation payload was rejected.
///
/// Malformed MSDP payloads are never reported this way — they are
/// recovered in-band (see the crate docs). This kind exists for option
/// implementations whose wire formats are rigid enough that recovery
/// isn't possible, such as a fixed-width argument too short to decode.
#[derive(Debug)]
pub enum SubnegotiationErrorKind {
    /// Insufficient data available to decode the subnegotiation.
    InsufficientData {
        /// Number of bytes required.
        required: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// An unexpected command byte was present in the payload.
    InvalidCommand {
        /// The invalid command byte.
        command: u8,
        /// Expected command bytes, if known.
        expected: Option<Vec<u8>>,
    },

    /// An invalid DO/DONT/WILL/WONT verb byte was present in the payload.
    InvalidVerb {
        /// The invalid verb byte.
        verb: u8,
    },

    /// The payload referenced an option code with no registered meaning.
    UnknownOption {
        /// The unknown option code.
        code: u8,
    },

    /// Additional data was present when none was expected.
    UnexpectedData {
        /// Description of why the data is unexpected.
        reason: String,
    },

    /// The payload ended before a multi-byte field was complete.
    IncompleteData {
        /// Description of what data is incomplete.
        description: String,
    },

    /// Encoding failed due to insufficient buffer space.
    EncodingFailed {
        /// Number of bytes required.
        required: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A reason not covered by the other variants.
    Other {
        /// Description of the error.
        description: String,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::IoError { kind, operation } => {
                write!(f, "I/O error during {operation}: {kind:?}")
            }
            CodecError::NegotiationError { reason, frame_type } => {
                if let Some(frame_type) = frame_type {
                    write!(f, "negotiation error ({frame_type}): {reason}")
                } else {
                    write!(f, "negotiation error: {reason}")
                }
            }
            CodecError::SubnegotiationError { option, reason } => {
                if let Some(option) = option {
                    write!(f, "subnegotiation error for option {option}: {reason}")
                } else {
                    write!(f, "subnegotiation error: {reason}")
                }
            }
        }
    }
}

impl fmt::Display for SubnegotiationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnegotiationErrorKind::InsufficientData { required, available } => {
                write!(f, "insufficient data (required: {required}, available: {available})")
            }
            SubnegotiationErrorKind::InvalidCommand { command, expected } => {
                if let Some(expected) = expected {
                    write!(f, "invalid command {command:#04X} (expected one of: {expected:?})")
                } else {
                    write!(f, "invalid command {command:#04X}")
                }
            }
            SubnegotiationErrorKind::InvalidVerb { verb } => {
                write!(f, "invalid verb {verb:#04X}")
            }
            SubnegotiationErrorKind::UnknownOption { code } => {
                write!(f, "unknown option code {code}")
            }
            SubnegotiationErrorKind::UnexpectedData { reason } => {
                write!(f, "unexpected data: {reason}")
            }
            SubnegotiationErrorKind::IncompleteData { description } => {
                write!(f, "incomplete data: {description}")
            }
            SubnegotiationErrorKind::EncodingFailed { required, available } => {
                write!(f, "encoding failed (required: {required}, available: {available})")
            }
            SubnegotiationErrorKind::Other { description } => write!(f, "{description}"),
        }
    }
}

impl std::error::Error for CodecError {}
impl std::error::Error for SubnegotiationErrorKind {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::IoError {
            kind: err.kind(),
            operation: "codec operation".to_string(),
        }
    }
}

/// Result type for session-level operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors produced by the session layer.
#[derive(Debug)]
pub enum SessionError {
    /// `install` was called for an option code that already has a
    /// registered handler.
    AlreadyRegistered(u8),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyRegistered(code) => {
                write!(f, "option {code} is already registered")
            }
        }
    }
}

impl std::error::Error for SessionError {}
