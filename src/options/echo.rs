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

//! RFC 857 Echo (option code 1). Carries no subnegotiation payload.

use crate::consts;
use crate::element::Element;
use crate::option::{ConcreteOption, OptionBase, Perspective};

/// The Echo option's payload behavior: always a no-op.
#[derive(Debug, Default)]
pub struct Echo;

impl ConcreteOption for Echo {
    fn on_subnegotiation(&mut self, _content: &[u8], _emit: &mut dyn FnMut(Element)) {
        // Echo has no subnegotiation payload; emits nothing regardless of content.
    }
}

/// Builds the `echo::client` side: we `DO`/`DONT`, the peer
/// `WILL`/`WONT`.
pub fn client() -> OptionBase<Echo> {
    OptionBase::new(consts::option::ECHO, Perspective::WeRequest, Echo)
}

/// Builds the `echo::server` side: we `WILL`/`WONT`, the peer
/// `DO`/`DONT`.
pub fn server() -> OptionBase<Echo> {
    OptionBase::new(consts::option::ECHO, Perspective::WeOffer, Echo)
}
