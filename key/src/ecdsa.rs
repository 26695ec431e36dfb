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
use std::ops::Deref;
use std::str::FromStr;

use rustc_hex::{FromHex, ToHex};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Error as SecpError, Message as SecpMessage, PublicKey, SecretKey};

use crate::{Error, Message, Private, Public, PUBLIC_LENGTH, SECP256K1};

pub const SIGNATURE_LENGTH: usize = 65;

/// Recoverable secp256k1 signature laid out as `r || s || v`.
#[derive(Clone, Copy)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Get a slice into the 'r' portion of the data.
    pub fn r(&self) -> &[u8] {
        &self.0[0..32]
    }

    /// Get a slice into the 's' portion of the data.
    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// Get the recovery byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidSignature)
        }
        let mut data = [0u8; SIGNATURE_LENGTH];
        data.copy_from_slice(bytes);
        Ok(Signature(data))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn to_recoverable(&self) -> Result<RecoverableSignature, Error> {
        let recovery_id = RecoveryId::from_i32(i32::from(self.v()))?;
        Ok(RecoverableSignature::from_compact(&self.0[0..64], recovery_id)?)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.debug_struct("Signature")
            .field("r", &self.r().to_hex())
            .field("s", &self.s().to_hex())
            .field("v", &self.0[64..65].to_hex())
            .finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0[..].to_hex())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.from_hex() {
            Ok(ref hex) => Signature::from_slice(hex),
            Err(_) => Err(Error::InvalidSignature),
        }
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature([0; SIGNATURE_LENGTH])
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(s: [u8; SIGNATURE_LENGTH]) -> Self {
        Signature(s)
    }
}

impl Deref for Signature {
    type Target = [u8; SIGNATURE_LENGTH];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub fn sign(private: &Private, message: &Message) -> Result<Signature, Error> {
    let context = &*SECP256K1;
    let sec = SecretKey::from_slice(private.as_bytes())?;
    let s = context.sign_ecdsa_recoverable(&SecpMessage::from_slice(message.as_bytes())?, &sec);
    let (rec_id, data) = s.serialize_compact();
    let mut data_arr = [0; SIGNATURE_LENGTH];

    // libsecp256k1 always produces a low-s signature
    data_arr[0..64].copy_from_slice(&data[0..64]);
    data_arr[64] = rec_id.to_i32() as u8;
    Ok(Signature(data_arr))
}

/// Returns `Ok(false)` when the signature is well formed but was made by another key or over
/// another message.
pub fn verify(public: &Public, signature: &Signature, message: &Message) -> Result<bool, Error> {
    let context = &*SECP256K1;
    let sig = signature.to_recoverable()?.to_standard();

    let pdata: [u8; PUBLIC_LENGTH + 1] = {
        let mut temp = [4u8; PUBLIC_LENGTH + 1];
        temp[1..].copy_from_slice(public.as_bytes());
        temp
    };

    let publ = PublicKey::from_slice(&pdata)?;
    match context.verify_ecdsa(&SecpMessage::from_slice(message.as_bytes())?, &sig, &publ) {
        Ok(_) => Ok(true),
        Err(SecpError::IncorrectSignature) => Ok(false),
        Err(x) => Err(Error::from(x)),
    }
}

pub fn recover(signature: &Signature, message: &Message) -> Result<Public, Error> {
    let context = &*SECP256K1;
    let rsig = signature.to_recoverable()?;
    let pubkey = context.recover_ecdsa(&SecpMessage::from_slice(message.as_bytes())?, &rsig)?;
    let serialized = pubkey.serialize_uncompressed();
    Ok(Public::from_slice(&serialized[1..]))
}
