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

//! Wire-level byte constants for the Telnet protocol and the options
//! implemented in this crate.

/// Interpret As Command.
pub const IAC: u8 = 0xFF;
/// Begin subnegotiation.
pub const SB: u8 = 0xFA;
/// End subnegotiation.
pub const SE: u8 = 0xF0;
/// "I will perform option" / accept `DO`.
pub const WILL: u8 = 0xFB;
/// Refuse / cease performing an option.
pub const WONT: u8 = 0xFC;
/// "Please perform option" / accept `WILL`.
pub const DO: u8 = 0xFD;
/// Refuse / request cessation of an option.
pub const DONT: u8 = 0xFE;

/// No Operation.
pub const NOP: u8 = 0xF1;
/// Data Mark, used in conjunction with Synch.
pub const DATA_MARK: u8 = 0xF2;
/// Break.
pub const BREAK: u8 = 0xF3;
/// Interrupt Process.
pub const INTERRUPT_PROCESS: u8 = 0xF4;
/// Abort Output.
pub const ABORT_OUTPUT: u8 = 0xF5;
/// Are You There.
pub const ARE_YOU_THERE: u8 = 0xF6;
/// Erase Character.
pub const ERASE_CHARACTER: u8 = 0xF7;
/// Erase Line.
pub const ERASE_LINE: u8 = 0xF8;
/// Go Ahead.
pub const GO_AHEAD: u8 = 0xF9;

/// Option codes recognized by this crate.
pub mod option {
    /// RFC 857 Echo.
    pub const ECHO: u8 = 1;
    /// Mud Server Data Protocol.
    pub const MSDP: u8 = 69;

    /// MSDP subnegotiation marker bytes.
    pub mod msdp {
        /// Introduces a variable name.
        pub const VAR: u8 = 0x01;
        /// Introduces a variable's value.
        pub const VAL: u8 = 0x02;
        /// Begins a table value.
        pub const TABLE_OPEN: u8 = 0x03;
        /// Ends a table value.
        pub const TABLE_CLOSE: u8 = 0x04;
        /// Begins an array value.
        pub const ARRAY_OPEN: u8 = 0x05;
        /// Ends an array value.
        pub const ARRAY_CLOSE: u8 = 0x06;
    }
}
