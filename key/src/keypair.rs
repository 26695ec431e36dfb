// Copyright 2018 Kodebox, Inc.
// This file is part of CodeChain.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;

use rustc_hex::ToHex;
use secp256k1::{PublicKey, SecretKey};

use crate::{Error, Private, Public, SECP256K1};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    private: Private,
    public: Public,
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "secret:  {}", self.private.as_bytes().to_hex())?;
        write!(f, "public:  {}", self.public.as_bytes().to_hex())
    }
}

impl KeyPair {
    /// Create a pair from secret key
    pub fn from_private(private: Private) -> Result<KeyPair, Error> {
        let context = &*SECP256K1;
        let s = SecretKey::from_slice(private.as_bytes())?;
        let pub_key = PublicKey::from_secret_key(context, &s);
        let serialized = pub_key.serialize_uncompressed();

        let keypair = KeyPair {
            private,
            public: Public::from_slice(&serialized[1..]),
        };

        Ok(keypair)
    }

    pub fn from_keypair(sec: SecretKey, publ: PublicKey) -> Self {
        let serialized = publ.serialize_uncompressed();

        KeyPair {
            private: Private::from_slice(&sec.secret_bytes()),
            public: Public::from_slice(&serialized[1..]),
        }
    }

    pub fn private(&self) -> &Private {
        &self.private
    }

    pub fn public(&self) -> &Public {
        &self.public
    }
}
